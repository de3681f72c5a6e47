//! Backend commands queued from UI to backend worker.

use shared::domain::StagedFile;

pub enum BackendCommand {
    Predict { file: StagedFile },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Predict { .. } => "predict",
        }
    }
}
