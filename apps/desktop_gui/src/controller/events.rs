//! Events sent from the backend worker to the UI thread.

use shared::protocol::PredictionOutcome;

#[derive(Debug)]
pub enum UiEvent {
    Info(String),
    PredictionFinished(PredictionOutcome),
}
