use std::path::PathBuf;

/// All errors that can occur in gemscribe.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0} environment variable not set")]
    MissingApiKey(String),

    #[error("audio file not found: {path}")]
    AudioNotFound { path: PathBuf },

    #[error("invalid option: {0}")]
    InvalidOption(String),

    #[error("upload failed: {0}")]
    Upload(String),

    #[error("Gemini API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("response contained no transcription text")]
    EmptyTranscript,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
