use thiserror::Error;

pub const INVALID_FILE_TYPE_MESSAGE: &str =
    "Invalid file type. Please upload an audio file (MP3, WAV, FLAC, OGG, M4A).";
pub const PREDICTION_FAILED_MESSAGE: &str = "Prediction failed. Please try again.";
pub const NETWORK_ERROR_MESSAGE: &str =
    "Network error. Please check your connection and try again.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid file type. Please upload an audio file (MP3, WAV, FLAC, OGG, M4A).")]
    InvalidFileType { name: String },
}

impl ValidationError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::InvalidFileType { .. } => INVALID_FILE_TYPE_MESSAGE,
        }
    }
}

/// A response that claimed success but did not carry a complete result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed prediction response: missing `{field}`")]
pub struct MalformedResponse {
    pub field: &'static str,
}
