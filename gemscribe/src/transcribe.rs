use std::path::Path;

use tracing::{debug, info};

use crate::chunk;
use crate::client::GeminiClient;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::media;

/// Transcribes local audio files through the Gemini API.
///
/// Each transcription is one upload followed by one generation request per
/// chunk, sequentially, with nothing cached or retried.
pub struct Transcriber {
    client: GeminiClient,
}

impl Transcriber {
    pub fn new(config: Config) -> Result<Self> {
        Ok(Self {
            client: GeminiClient::new(config)?,
        })
    }

    /// Transcribe the whole file in a single upload + generation call.
    ///
    /// The file is read fully into memory and its bytes submitted as-is; the
    /// returned text is the model's response verbatim.
    pub async fn transcribe(&self, path: impl AsRef<Path>) -> Result<String> {
        let path = path.as_ref();
        let bytes = read_audio(path)?;
        let mime = media::mime_for_path(path);
        self.transcribe_bytes(bytes, mime, &display_name(path)).await
    }

    /// Transcribe the file, splitting it into byte chunks of at most
    /// [`Config::chunk_bytes`] each.
    ///
    /// A file that fits in one chunk goes through the exact same path as
    /// [`Self::transcribe`]; larger files are transcribed chunk by chunk in
    /// order and the transcripts recombined.
    pub async fn transcribe_chunked(&self, path: impl AsRef<Path>) -> Result<String> {
        let path = path.as_ref();
        let bytes = read_audio(path)?;
        let mime = media::mime_for_path(path);
        let chunk_bytes = self.client.config().chunk_bytes as usize;

        let chunks = chunk::split(&bytes, chunk_bytes);
        let total = chunks.len();
        if total == 1 {
            drop(chunks);
            return self.transcribe_bytes(bytes, mime, &display_name(path)).await;
        }

        info!(chunks = total, size = bytes.len(), "transcribing in chunks");
        let mut transcripts = Vec::with_capacity(total);
        for (i, part) in chunks.iter().enumerate() {
            debug!(chunk = i + 1, total, size = part.len(), "transcribing chunk");
            let name = format!("{} [chunk {}/{}]", display_name(path), i + 1, total);
            transcripts.push(self.transcribe_bytes(part.to_vec(), mime, &name).await?);
        }

        Ok(chunk::recombine(transcripts))
    }

    async fn transcribe_bytes(
        &self,
        bytes: Vec<u8>,
        mime: &str,
        display_name: &str,
    ) -> Result<String> {
        let uploaded = self.client.upload(bytes, mime, display_name).await?;
        self.client.generate(&uploaded.uri, mime).await
    }
}

/// Read the file fully into memory, failing before any network activity
/// when it doesn't exist.
fn read_audio(path: &Path) -> Result<Vec<u8>> {
    if !path.is_file() {
        return Err(Error::AudioNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(std::fs::read(path)?)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| "audio".into())
}
