//! Routes session actions: backend requests go to the worker queue, the rest back to the UI.

use std::collections::VecDeque;

use client_core::{Action, Effect, PageSession};
use crossbeam_channel::{Sender, TrySendError};
use shared::{error::NETWORK_ERROR_MESSAGE, protocol::PredictionOutcome};

use crate::backend_bridge::commands::BackendCommand;

const QUEUE_FULL_MESSAGE: &str = "Request queue is full; please retry.";

/// Queues `cmd` for the worker. A command that cannot be queued yields the action that
/// completes the submission with a failure.
pub fn dispatch_backend_command(cmd_tx: &Sender<BackendCommand>, cmd: BackendCommand) -> Option<Action> {
    let cmd_name = cmd.name();
    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            None
        }
        Err(TrySendError::Full(_)) => {
            tracing::warn!(command = cmd_name, "ui->backend command queue is full");
            Some(Action::PredictionFinished(PredictionOutcome::Failure(
                QUEUE_FULL_MESSAGE.to_string(),
            )))
        }
        Err(TrySendError::Disconnected(_)) => {
            tracing::error!(command = cmd_name, "ui->backend command queue disconnected");
            Some(Action::PredictionFinished(PredictionOutcome::Failure(
                NETWORK_ERROR_MESSAGE.to_string(),
            )))
        }
    }
}

/// Dispatches `action` and any follow-ups; returns the effects the UI must carry out.
pub fn run_action(
    session: &mut PageSession,
    cmd_tx: &Sender<BackendCommand>,
    action: Action,
) -> Vec<Effect> {
    let mut ui_effects = Vec::new();
    let mut pending = VecDeque::from([action]);
    while let Some(action) = pending.pop_front() {
        for effect in session.dispatch(action) {
            match effect {
                Effect::SendPrediction(file) => {
                    if let Some(follow_up) =
                        dispatch_backend_command(cmd_tx, BackendCommand::Predict { file })
                    {
                        pending.push_back(follow_up);
                    }
                }
                other => ui_effects.push(other),
            }
        }
    }
    ui_effects
}
