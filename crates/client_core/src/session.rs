//! Page session: the selected file, panel visibility, and the submission state machine.
//!
//! Every user interaction and the request completion go through [`PageSession::dispatch`].
//! Front ends render from the accessors and carry out the returned [`Effect`]s.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use shared::{
    domain::StagedFile,
    format::{
        entrance_delay, format_confidence, format_file_size, format_probability, percent_fill,
        ConfidenceTier,
    },
    protocol::{PredictionOutcome, PredictionResult},
};
use tracing::{debug, info, warn};

use crate::PredictionClient;

/// Time given to layout before a freshly shown panel is scrolled into view.
pub const SCROLL_SETTLE_DELAY: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    UploadZone,
    FileInfo,
    Results,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Panels {
    pub upload_zone: bool,
    pub file_info: bool,
    pub results: bool,
    pub error: bool,
    pub loading: bool,
    pub submit_visible: bool,
    pub submit_enabled: bool,
    pub drag_over: bool,
}

impl Default for Panels {
    fn default() -> Self {
        Self {
            upload_zone: true,
            file_info: false,
            results: false,
            error: false,
            loading: false,
            submit_visible: true,
            submit_enabled: false,
            drag_over: false,
        }
    }
}

/// Value of the native file picker. A pick only counts as a change when the value differs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileInput {
    value: Option<PathBuf>,
}

impl FileInput {
    pub fn change(&mut self, path: impl Into<PathBuf>) -> bool {
        let path = path.into();
        if self.value.as_ref() == Some(&path) {
            return false;
        }
        self.value = Some(path);
        true
    }

    pub fn value(&self) -> Option<&Path> {
        self.value.as_deref()
    }

    pub fn clear(&mut self) {
        self.value = None;
    }
}

#[derive(Debug, Clone)]
pub enum Action {
    DragEnter,
    DragLeave,
    FilePicked { path: PathBuf, file: StagedFile },
    FileDropped(StagedFile),
    /// The front end could not read the chosen file.
    SelectionFailed(String),
    RemoveFile,
    Submit,
    PredictionFinished(PredictionOutcome),
    NewPrediction,
    Retry,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    SendPrediction(StagedFile),
    ScrollIntoView { panel: Panel, after: Duration },
    ScrollToTop,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLabel {
    pub name: String,
    pub size_text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityRow {
    pub label: String,
    pub probability: f64,
    pub fill: f32,
    pub value_text: String,
    pub entrance_delay: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultsView {
    pub label: String,
    pub confidence: f64,
    pub confidence_text: String,
    pub confidence_fill: f32,
    pub tier: ConfidenceTier,
    pub rows: Vec<ProbabilityRow>,
}

impl ResultsView {
    pub fn from_result(result: &PredictionResult) -> Self {
        let rows = result
            .probabilities
            .iter()
            .enumerate()
            .map(|(index, entry)| ProbabilityRow {
                label: entry.label.clone(),
                probability: entry.probability,
                fill: percent_fill(entry.probability),
                value_text: format_probability(entry.probability),
                entrance_delay: entrance_delay(index),
            })
            .collect();

        Self {
            label: result.predicted_label.clone(),
            confidence: result.confidence,
            confidence_text: format_confidence(result.confidence),
            confidence_fill: percent_fill(result.confidence),
            tier: ConfidenceTier::from_confidence(result.confidence),
            rows,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PageSession {
    selected: Option<StagedFile>,
    file_label: Option<FileLabel>,
    file_input: FileInput,
    phase: Phase,
    panels: Panels,
    results: Option<ResultsView>,
    error_message: Option<String>,
}

impl PageSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn panels(&self) -> Panels {
        self.panels
    }

    pub fn selected_file(&self) -> Option<&StagedFile> {
        self.selected.as_ref()
    }

    pub fn file_label(&self) -> Option<&FileLabel> {
        self.file_label.as_ref()
    }

    pub fn file_input(&self) -> &FileInput {
        &self.file_input
    }

    pub fn results(&self) -> Option<&ResultsView> {
        self.results.as_ref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn can_submit(&self) -> bool {
        self.selected.is_some() && self.phase != Phase::Submitting
    }

    pub fn dispatch(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::DragEnter => {
                self.panels.drag_over = true;
                Vec::new()
            }
            Action::DragLeave => {
                self.panels.drag_over = false;
                Vec::new()
            }
            Action::FilePicked { path, file } => {
                if !self.file_input.change(path) {
                    debug!(file = %file.name, "file input value unchanged; no selection event");
                    return Vec::new();
                }
                self.select_file(file)
            }
            Action::FileDropped(file) => {
                self.panels.drag_over = false;
                self.select_file(file)
            }
            Action::SelectionFailed(message) => self.show_error(message),
            Action::RemoveFile => {
                self.reset();
                Vec::new()
            }
            Action::Submit => self.submit(),
            Action::PredictionFinished(outcome) => self.finish(outcome),
            Action::NewPrediction => {
                self.reset();
                vec![Effect::ScrollToTop]
            }
            Action::Retry => self.retry(),
        }
    }

    /// Runs one full submission against `client`, completion included.
    pub async fn submit_with(&mut self, client: &PredictionClient) -> Vec<Effect> {
        let mut effects = Vec::new();
        for effect in self.dispatch(Action::Submit) {
            match effect {
                Effect::SendPrediction(file) => {
                    let outcome = client.predict(&file).await;
                    effects.extend(self.dispatch(Action::PredictionFinished(outcome)));
                }
                other => effects.push(other),
            }
        }
        effects
    }

    fn select_file(&mut self, file: StagedFile) -> Vec<Effect> {
        if let Err(err) = file.validate() {
            warn!(file = %file.name, mime = ?file.mime_type, "rejected file selection: {err}");
            return self.show_error(err.user_message().to_string());
        }

        info!(file = %file.name, size_bytes = file.size_bytes, "file staged");
        self.file_label = Some(FileLabel {
            name: file.name.clone(),
            size_text: format_file_size(file.size_bytes),
        });
        self.selected = Some(file);
        if self.phase != Phase::Submitting {
            self.phase = Phase::Idle;
        }

        self.panels.upload_zone = false;
        self.panels.file_info = true;
        self.panels.submit_enabled = true;
        self.panels.results = false;
        self.panels.error = false;
        Vec::new()
    }

    fn reset(&mut self) {
        self.selected = None;
        self.file_label = None;
        self.file_input.clear();
        if self.phase != Phase::Submitting {
            self.phase = Phase::Idle;
        }

        self.panels.upload_zone = true;
        self.panels.file_info = false;
        self.panels.submit_enabled = false;
        self.panels.results = false;
        self.panels.error = false;
    }

    fn submit(&mut self) -> Vec<Effect> {
        let Some(file) = self.selected.clone() else {
            debug!("submit ignored: no staged file");
            return Vec::new();
        };
        if self.phase == Phase::Submitting {
            debug!(file = %file.name, "submit ignored: request already in flight");
            return Vec::new();
        }

        self.phase = Phase::Submitting;
        self.panels.submit_visible = false;
        self.panels.loading = true;
        self.panels.results = false;
        self.panels.error = false;
        vec![Effect::SendPrediction(file)]
    }

    fn finish(&mut self, outcome: PredictionOutcome) -> Vec<Effect> {
        // Cleanup runs before either branch.
        self.panels.loading = false;
        self.panels.submit_visible = true;

        match outcome {
            PredictionOutcome::Success(result) => {
                self.phase = Phase::Succeeded;
                self.show_results(&result)
            }
            PredictionOutcome::Failure(message) => {
                self.phase = Phase::Failed;
                self.show_error(message)
            }
        }
    }

    fn retry(&mut self) -> Vec<Effect> {
        self.panels.error = false;
        if self.selected.is_some() {
            self.submit()
        } else {
            self.reset();
            Vec::new()
        }
    }

    fn show_results(&mut self, result: &PredictionResult) -> Vec<Effect> {
        self.results = Some(ResultsView::from_result(result));
        self.panels.results = true;
        self.panels.error = false;
        vec![Effect::ScrollIntoView {
            panel: Panel::Results,
            after: SCROLL_SETTLE_DELAY,
        }]
    }

    fn show_error(&mut self, message: String) -> Vec<Effect> {
        self.error_message = Some(message);
        self.panels.error = true;
        self.panels.results = false;
        vec![Effect::ScrollIntoView {
            panel: Panel::Error,
            after: SCROLL_SETTLE_DELAY,
        }]
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
