use std::time::Duration;

use crate::error::{Error, Result};

/// Environment variable holding the API credential.
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Environment variable overriding the default model.
pub const MODEL_VAR: &str = "GEMINI_MODEL";

/// Environment variable overriding the API base URL.
pub const BASE_URL_VAR: &str = "GEMINI_BASE_URL";

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-001";

/// Instruction sent alongside the uploaded audio.
pub const DEFAULT_PROMPT: &str = "Please transcribe this audio file accurately:";

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_CHUNK_BYTES: u64 = 10 * 1024 * 1024;

/// Configuration for the transcriber.
///
/// Built once at program entry (usually via [`Config::from_env`]) and passed
/// into [`Transcriber::new`](crate::Transcriber::new); nothing reads the
/// process environment after construction.
#[derive(Debug, Clone)]
pub struct Config {
    /// Gemini API key, sent as the `x-goog-api-key` header.
    pub api_key: String,
    /// Model identifier used for the generation call.
    pub model: String,
    /// Instruction text sent as the first content part.
    pub prompt: String,
    /// API base URL. Overridable for testing against a local server.
    pub base_url: String,
    /// HTTP timeout for each request. None means no timeout.
    pub timeout: Option<Duration>,
    /// Chunk size in bytes for the chunked transcription path.
    pub chunk_bytes: u64,
}

impl Config {
    /// Create a configuration with the given API key and all defaults.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            prompt: DEFAULT_PROMPT.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            chunk_bytes: DEFAULT_CHUNK_BYTES,
        }
    }

    /// Build a configuration from the environment.
    ///
    /// Requires `GEMINI_API_KEY`; a missing or empty value is
    /// [`Error::MissingApiKey`]. `GEMINI_MODEL` and `GEMINI_BASE_URL`, when
    /// set and non-empty, override the default model and API base URL.
    pub fn from_env() -> Result<Self> {
        Self::from_env_vars(API_KEY_VAR, MODEL_VAR, BASE_URL_VAR)
    }

    fn from_env_vars(key_var: &str, model_var: &str, base_var: &str) -> Result<Self> {
        let api_key = std::env::var(key_var)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| Error::MissingApiKey(key_var.to_string()))?;

        let mut config = Config::new(api_key);
        if let Ok(model) = std::env::var(model_var) {
            if !model.trim().is_empty() {
                config.model = model;
            }
        }
        if let Ok(url) = std::env::var(base_var) {
            if !url.trim().is_empty() {
                config = config.base_url(url);
            }
        }
        Ok(config)
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Set the API base URL. A trailing slash is stripped.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the chunk size in megabytes. Must be non-zero.
    pub fn chunk_size_mb(self, mb: u64) -> Result<Self> {
        self.chunk_size_bytes(mb.saturating_mul(1024 * 1024))
    }

    /// Set the chunk size in bytes. Must be non-zero.
    pub fn chunk_size_bytes(mut self, bytes: u64) -> Result<Self> {
        if bytes == 0 {
            return Err(Error::InvalidOption("chunk size must be non-zero".into()));
        }
        self.chunk_bytes = bytes;
        Ok(self)
    }
}
