//! CLI behavior tests for the no-network failure paths: exit codes and the
//! single-line JSON output contract.

use std::process::Command;

use assert_cmd::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn gemscribe() -> Command {
    let mut cmd = Command::cargo_bin("gemscribe").unwrap();
    cmd.env_remove("GEMINI_API_KEY")
        .env_remove("GEMINI_MODEL")
        .env_remove("GEMINI_BASE_URL")
        .env_remove("RUST_LOG");
    cmd
}

/// Mock server answering the upload and generation calls with a fixed
/// transcript.
async fn mock_service(transcript: &str) -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/upload/v1beta/files"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "file": {
                "name": "files/abc123",
                "uri": "https://generativelanguage.googleapis.com/v1beta/files/abc123",
                "mimeType": "audio/mpeg"
            }
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.0-flash-001:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [
                {"content": {"role": "model", "parts": [{"text": transcript}]}}
            ]
        })))
        .mount(&server)
        .await;

    server
}

fn sample_file(name: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!("gemscribe_cli_{name}"));
    std::fs::write(&path, b"fake mp3 bytes").unwrap();
    path
}

fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    let stdout = String::from_utf8(output.stdout.clone()).unwrap();
    assert_eq!(stdout.lines().count(), 1, "stdout must be a single JSON line");
    serde_json::from_str(stdout.trim()).unwrap()
}

#[test]
fn missing_credential_exits_one_before_file_io() {
    // The input file does not exist either; the credential error must win
    let output = gemscribe().arg("missing.mp3").output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    let json = stdout_json(&output);
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("GEMINI_API_KEY"));
}

#[test]
fn missing_argument_exits_one() {
    let output = gemscribe().env("GEMINI_API_KEY", "test-key").output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    let json = stdout_json(&output);
    assert!(json["error"].as_str().unwrap().contains("usage"));
}

#[test]
fn missing_file_exits_one_with_not_found() {
    let output = gemscribe()
        .env("GEMINI_API_KEY", "test-key")
        .arg("/nonexistent/gemscribe_missing.mp3")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let json = stdout_json(&output);
    let message = json["error"].as_str().unwrap();
    assert!(message.contains("not found"));
    assert!(message.contains("gemscribe_missing.mp3"));
}

// Multi-thread flavor: the mock server keeps serving while the spawned
// binary blocks this thread.
#[tokio::test(flavor = "multi_thread")]
async fn success_prints_exact_json_line_and_exits_zero() {
    let server = mock_service("hello world").await;
    let audio = sample_file("success.mp3");

    let output = gemscribe()
        .env("GEMINI_API_KEY", "test-key")
        .env("GEMINI_BASE_URL", server.uri())
        .arg(&audio)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout, "{\"transcription\":\"hello world\"}\n");

    std::fs::remove_file(&audio).ok();
}

#[tokio::test(flavor = "multi_thread")]
async fn rust_log_directive_takes_effect_and_stays_off_stdout() {
    let server = mock_service("hello world").await;
    let audio = sample_file("logging.mp3");

    let output = gemscribe()
        .env("GEMINI_API_KEY", "test-key")
        .env("GEMINI_BASE_URL", server.uri())
        .env("RUST_LOG", "gemscribe=debug")
        .arg(&audio)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout, "{\"transcription\":\"hello world\"}\n");
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("uploading audio"));

    std::fs::remove_file(&audio).ok();
}

#[test]
fn zero_chunk_size_is_rejected() {
    let output = gemscribe()
        .env("GEMINI_API_KEY", "test-key")
        .args(["--chunk-size-mb", "0", "whatever.mp3"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let json = stdout_json(&output);
    assert!(json["error"].as_str().unwrap().contains("chunk size"));
}
