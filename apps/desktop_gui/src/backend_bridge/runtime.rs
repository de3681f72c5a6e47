//! Backend worker: owns the tokio runtime and the prediction client.

use std::thread;

use client_core::PredictionClient;
use crossbeam_channel::{Receiver, Sender};
use shared::{error::NETWORK_ERROR_MESSAGE, protocol::PredictionOutcome};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

/// Reports the outcome of one request exactly once.
///
/// If the request ends without calling [`CompletionGuard::complete`] (a panic in the
/// worker, for instance), dropping the guard reports a network failure instead, so the
/// page never stays in its loading state because of the worker.
pub struct CompletionGuard {
    ui_tx: Sender<UiEvent>,
    file_name: String,
    reported: bool,
}

impl CompletionGuard {
    pub fn arm(ui_tx: Sender<UiEvent>, file_name: impl Into<String>) -> Self {
        Self {
            ui_tx,
            file_name: file_name.into(),
            reported: false,
        }
    }

    pub fn complete(mut self, outcome: PredictionOutcome) {
        self.reported = true;
        self.report(outcome);
    }

    fn report(&self, outcome: PredictionOutcome) {
        if self
            .ui_tx
            .send(UiEvent::PredictionFinished(outcome))
            .is_err()
        {
            tracing::warn!(file = %self.file_name, "ui event channel closed; dropping prediction outcome");
        }
    }
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        if !self.reported {
            tracing::error!(file = %self.file_name, "prediction request ended without an outcome");
            self.report(PredictionOutcome::Failure(NETWORK_ERROR_MESSAGE.to_string()));
        }
    }
}

pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    client: PredictionClient,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build backend runtime: {err}");
                let _ = ui_tx.try_send(UiEvent::Info(format!(
                    "Backend worker startup failure: {err}"
                )));
                return;
            }
        };

        runtime.block_on(async move {
            let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::Predict { file } => {
                        let guard = CompletionGuard::arm(ui_tx.clone(), file.name.clone());
                        let outcome = client.predict(&file).await;
                        guard.complete(outcome);
                    }
                }
            }
            tracing::debug!("ui command channel closed; backend worker exiting");
        });
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;

    #[test]
    fn completed_guard_reports_its_outcome_once() {
        let (ui_tx, ui_rx) = bounded(4);
        let guard = CompletionGuard::arm(ui_tx, "cat.wav");
        guard.complete(PredictionOutcome::Failure("File too short".to_string()));

        let events: Vec<_> = ui_rx.try_iter().collect();
        assert_eq!(events.len(), 1);
        assert!(matches!(
            &events[0],
            UiEvent::PredictionFinished(PredictionOutcome::Failure(message)) if message == "File too short"
        ));
    }

    #[test]
    fn dropped_guard_reports_network_failure() {
        let (ui_tx, ui_rx) = bounded(4);
        drop(CompletionGuard::arm(ui_tx, "cat.wav"));

        let event = ui_rx.try_recv().expect("failure reported");
        assert!(matches!(
            event,
            UiEvent::PredictionFinished(PredictionOutcome::Failure(message)) if message == NETWORK_ERROR_MESSAGE
        ));
    }

    #[test]
    fn guard_reports_when_request_panics() {
        let (ui_tx, ui_rx) = bounded(4);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || {
            let _guard = CompletionGuard::arm(ui_tx, "cat.wav");
            panic!("transport exploded");
        }));

        assert!(result.is_err());
        assert!(matches!(
            ui_rx.try_recv(),
            Ok(UiEvent::PredictionFinished(PredictionOutcome::Failure(_)))
        ));
    }
}
