use std::sync::Arc;

use shared::{
    domain::StagedFile,
    error::NETWORK_ERROR_MESSAGE,
    protocol::PredictionOutcome,
};
use tracing::{error, info};

pub mod config;
pub mod error;
pub mod session;
pub mod transport;

pub use crate::config::{load_settings, ClientSettings};
pub use crate::error::{SettingsError, TransportError};
pub use crate::session::{Action, Effect, PageSession, Panel, Panels, Phase};
pub use crate::transport::{HttpPredictionTransport, PredictionTransport};

/// Turns a staged file into a displayable outcome; never fails.
#[derive(Clone)]
pub struct PredictionClient {
    transport: Arc<dyn PredictionTransport>,
}

impl PredictionClient {
    pub fn new(settings: &ClientSettings) -> Self {
        Self::with_transport(Arc::new(HttpPredictionTransport::new(settings)))
    }

    pub fn with_transport(transport: Arc<dyn PredictionTransport>) -> Self {
        Self { transport }
    }

    pub async fn predict(&self, file: &StagedFile) -> PredictionOutcome {
        let response = match self.transport.submit(file).await {
            Ok(response) => response,
            Err(err) => {
                error!(file = %file.name, "prediction request failed: {err}");
                return PredictionOutcome::Failure(NETWORK_ERROR_MESSAGE.to_string());
            }
        };

        match response.into_outcome() {
            Ok(PredictionOutcome::Success(result)) => {
                info!(
                    file = %file.name,
                    label = %result.predicted_label,
                    confidence = result.confidence,
                    classes = result.probabilities.len(),
                    "prediction succeeded"
                );
                PredictionOutcome::Success(result)
            }
            Ok(PredictionOutcome::Failure(message)) => {
                info!(file = %file.name, %message, "prediction rejected by server");
                PredictionOutcome::Failure(message)
            }
            Err(err) => {
                error!(file = %file.name, "{err}");
                PredictionOutcome::Failure(NETWORK_ERROR_MESSAGE.to_string())
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
