//! Thin client for the two Gemini REST calls this crate needs: the media
//! upload to the Files API and the generateContent call referencing the
//! uploaded file.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{Error, Result};

const API_KEY_HEADER: &str = "x-goog-api-key";

pub(crate) struct GeminiClient {
    http: reqwest::Client,
    config: Config,
}

/// Handle to a file stored by the service after upload.
/// Its lifecycle belongs to the service; we never delete it.
pub(crate) struct UploadedFile {
    pub uri: String,
}

impl GeminiClient {
    pub(crate) fn new(config: Config) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;
        Ok(Self { http, config })
    }

    pub(crate) fn config(&self) -> &Config {
        &self.config
    }

    /// Upload raw audio bytes via the simple media upload. One HTTP request.
    pub(crate) async fn upload(
        &self,
        bytes: Vec<u8>,
        mime: &str,
        display_name: &str,
    ) -> Result<UploadedFile> {
        let url = format!("{}/upload/v1beta/files?uploadType=media", self.config.base_url);
        debug!(file = display_name, size = bytes.len(), mime, "uploading audio");

        let response = self
            .http
            .post(&url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .header(reqwest::header::CONTENT_TYPE, mime)
            .body(bytes)
            .send()
            .await?;
        let response = check_status(response, "upload").await?;

        let body: UploadResponse = response.json().await?;
        let uri = body
            .file
            .and_then(|f| f.uri)
            .filter(|u| !u.is_empty())
            .ok_or_else(|| Error::Upload("response carried no file URI".into()))?;

        info!(file = display_name, %uri, "upload complete");
        Ok(UploadedFile { uri })
    }

    /// Ask the model to transcribe an uploaded file. One HTTP request.
    /// Returns the concatenated text of the first candidate.
    pub(crate) async fn generate(&self, file_uri: &str, mime: &str) -> Result<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, self.config.model
        );
        debug!(model = %self.config.model, file_uri, "requesting transcription");

        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![
                    Part::text(&self.config.prompt),
                    Part::file(mime, file_uri),
                ],
            }],
        };

        let response = self
            .http
            .post(&url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(&request)
            .send()
            .await?;
        let response = check_status(response, "generate").await?;

        let body: GenerateResponse = response.json().await?;
        let content = body
            .candidates
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .ok_or(Error::EmptyTranscript)?;

        // The text comes back verbatim, empty string included; only a
        // response with no text part at all is an error.
        let texts: Vec<String> = content.parts.into_iter().filter_map(|p| p.text).collect();
        if texts.is_empty() {
            return Err(Error::EmptyTranscript);
        }
        let text = texts.concat();

        debug!(chars = text.len(), "transcription received");
        Ok(text)
    }
}

/// Map a non-success response to `Error::Api`, extracting the service's
/// error message from the body when it parses.
async fn check_status(response: reqwest::Response, call: &str) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorBody>(&body)
        .ok()
        .and_then(|b| b.error)
        .and_then(|e| e.message)
        .unwrap_or_else(|| {
            if body.is_empty() {
                format!("{call} request failed")
            } else {
                // Avoid dumping huge HTML error pages into the message
                body.chars().take(500).collect()
            }
        });

    Err(Error::Api {
        status: status.as_u16(),
        message,
    })
}

// ---- wire types ----

#[derive(Deserialize)]
struct UploadResponse {
    file: Option<FileMetadata>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileMetadata {
    uri: Option<String>,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    file_data: Option<FileData<'a>>,
}

impl<'a> Part<'a> {
    fn text(text: &'a str) -> Self {
        Self {
            text: Some(text),
            file_data: None,
        }
    }

    fn file(mime_type: &'a str, file_uri: &'a str) -> Self {
        Self {
            text: None,
            file_data: Some(FileData {
                mime_type,
                file_uri,
            }),
        }
    }
}

#[derive(Serialize)]
struct FileData<'a> {
    mime_type: &'a str,
    file_uri: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: Option<ApiErrorDetail>,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_request_shape() {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![
                    Part::text("transcribe this"),
                    Part::file("audio/mpeg", "https://example.com/files/abc"),
                ],
            }],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "transcribe this");
        assert_eq!(
            json["contents"][0]["parts"][1]["file_data"]["file_uri"],
            "https://example.com/files/abc"
        );
        assert_eq!(
            json["contents"][0]["parts"][1]["file_data"]["mime_type"],
            "audio/mpeg"
        );
        // A text part must not serialize an empty file_data, and vice versa
        assert!(json["contents"][0]["parts"][0].get("file_data").is_none());
        assert!(json["contents"][0]["parts"][1].get("text").is_none());
    }

    #[test]
    fn test_upload_response_parses() {
        let body = r#"{"file": {"name": "files/abc", "uri": "https://h/files/abc", "mimeType": "audio/mpeg"}}"#;
        let parsed: UploadResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            parsed.file.unwrap().uri.as_deref(),
            Some("https://h/files/abc")
        );
    }

    #[test]
    fn test_generate_response_parses_candidate_text() {
        let body = r#"{
            "candidates": [
                {"content": {"role": "model", "parts": [{"text": "hello "}, {"text": "world"}]}}
            ]
        }"#;
        let parsed: GenerateResponse = serde_json::from_str(body).unwrap();
        let text: String = parsed.candidates.unwrap()[0]
            .content
            .as_ref()
            .unwrap()
            .parts
            .iter()
            .filter_map(|p| p.text.clone())
            .collect();
        assert_eq!(text, "hello world");
    }

    #[test]
    fn test_api_error_body_parses() {
        let body = r#"{"error": {"code": 403, "message": "API key not valid", "status": "PERMISSION_DENIED"}}"#;
        let parsed: ApiErrorBody = serde_json::from_str(body).unwrap();
        assert_eq!(
            parsed.error.unwrap().message.as_deref(),
            Some("API key not valid")
        );
    }
}
