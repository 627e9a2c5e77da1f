//! Audio transcription via the Gemini API — local file in, transcript out.
//!
//! **gemscribe** reads an audio file, uploads it to the Gemini Files API,
//! issues one generation request asking the model to transcribe it, and
//! returns the text. Large files can be split into byte chunks that are
//! transcribed sequentially and recombined in order.
//!
//! # Quick start
//!
//! ```rust,no_run
//! # #[tokio::main]
//! # async fn main() -> gemscribe::Result<()> {
//! // Reads GEMINI_API_KEY (and optionally GEMINI_MODEL) once, up front
//! let config = gemscribe::Config::from_env()?;
//!
//! let text = gemscribe::transcribe_file("meeting.mp3", &config).await?;
//! println!("{text}");
//! # Ok(())
//! # }
//! ```
//!
//! See the [README](https://github.com/gemscribe/gemscribe) for CLI usage.

pub(crate) mod chunk;
pub(crate) mod client;
pub mod config;
pub mod error;
pub(crate) mod media;
pub(crate) mod transcribe;

pub use config::Config;
pub use error::{Error, Result};
pub use transcribe::Transcriber;

use std::path::Path;

/// Transcribe a local audio file in a single upload + generation call.
pub async fn transcribe_file(path: impl AsRef<Path>, config: &Config) -> Result<String> {
    Transcriber::new(config.clone())?.transcribe(path).await
}

/// Transcribe a local audio file, chunking per [`Config::chunk_bytes`].
pub async fn transcribe_file_chunked(path: impl AsRef<Path>, config: &Config) -> Result<String> {
    Transcriber::new(config.clone())?.transcribe_chunked(path).await
}
