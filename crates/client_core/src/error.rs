use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("prediction request failed: {0}")]
    Request(#[source] reqwest::Error),
    #[error("failed to read prediction response body: {0}")]
    Body(#[source] reqwest::Error),
    #[error("prediction response is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to load client settings: {0}")]
    Load(#[from] config::ConfigError),
    #[error("invalid endpoint url '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },
    #[error("upload field name must not be empty")]
    EmptyUploadField,
}
