use std::sync::Arc;

use crate::error::ValidationError;

pub const ACCEPTED_MIME_TYPES: [&str; 6] = [
    "audio/mpeg",
    "audio/mp3",
    "audio/wav",
    "audio/flac",
    "audio/ogg",
    "audio/x-m4a",
];

pub const ACCEPTED_EXTENSIONS: [&str; 5] = [".mp3", ".wav", ".flac", ".ogg", ".m4a"];

/// Extensions without the leading dot, for native file dialog filters.
pub fn accepted_extension_names() -> impl Iterator<Item = &'static str> {
    ACCEPTED_EXTENSIONS
        .iter()
        .map(|ext| ext.trim_start_matches('.'))
}

/// An audio file the user has selected but not yet submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    pub name: String,
    pub size_bytes: u64,
    pub mime_type: Option<String>,
    pub bytes: Arc<[u8]>,
}

impl StagedFile {
    pub fn from_parts(
        name: impl Into<String>,
        mime_type: Option<String>,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Self {
        let bytes = bytes.into();
        Self {
            name: name.into(),
            size_bytes: bytes.len() as u64,
            mime_type: mime_type.filter(|mime| !mime.is_empty()),
            bytes,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_audio_file(&self.name, self.mime_type.as_deref())
    }
}

/// Lowercased text after the last `.`, prefixed with `.`.
///
/// A name without any dot yields the whole name, so a bare `mp3` reads as `.mp3`.
pub fn file_extension(name: &str) -> String {
    let last = name.rsplit('.').next().unwrap_or(name);
    format!(".{}", last.to_ascii_lowercase())
}

pub fn is_accepted_mime(mime: &str) -> bool {
    ACCEPTED_MIME_TYPES.contains(&mime)
}

pub fn is_accepted_extension(name: &str) -> bool {
    let extension = file_extension(name);
    ACCEPTED_EXTENSIONS.contains(&extension.as_str())
}

/// MIME detection is unreliable across platforms, so either check is sufficient.
pub fn validate_audio_file(name: &str, mime_type: Option<&str>) -> Result<(), ValidationError> {
    let mime_ok = mime_type.is_some_and(is_accepted_mime);
    if mime_ok || is_accepted_extension(name) {
        Ok(())
    } else {
        Err(ValidationError::InvalidFileType {
            name: name.to_string(),
        })
    }
}
