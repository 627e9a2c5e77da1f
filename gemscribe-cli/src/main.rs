use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use gemscribe::{Config, Transcriber};
use serde_json::json;

#[derive(Parser)]
#[command(name = "gemscribe", about = "Transcribe an audio file via the Gemini API")]
struct Cli {
    /// Path to the audio file to transcribe.
    input: Option<PathBuf>,

    /// Gemini model identifier (overrides GEMINI_MODEL).
    #[arg(short, long)]
    model: Option<String>,

    /// Instruction prompt sent alongside the audio.
    #[arg(long)]
    prompt: Option<String>,

    /// Split files into chunks of this many megabytes.
    #[arg(long, default_value = "10")]
    chunk_size_mb: u64,

    /// Transcribe in a single request regardless of file size.
    #[arg(long)]
    no_chunking: bool,

    /// HTTP timeout in seconds (no timeout if omitted).
    #[arg(long)]
    timeout: Option<u64>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins outright when set; the default applies only without it
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("gemscribe=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Credential check comes first: a missing key fails before any file I/O
    let mut config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => fail(e),
    };

    if let Some(model) = cli.model {
        config = config.model(model);
    }
    if let Some(prompt) = cli.prompt {
        config = config.prompt(prompt);
    }
    if let Some(secs) = cli.timeout {
        config = config.timeout(Duration::from_secs(secs));
    }
    config = match config.chunk_size_mb(cli.chunk_size_mb) {
        Ok(c) => c,
        Err(e) => fail(e),
    };

    let Some(input) = cli.input else {
        fail("usage: gemscribe <audio-file>");
    };

    if !input.is_file() {
        fail(format!("file not found: {}", input.display()));
    }

    let transcriber = match Transcriber::new(config) {
        Ok(t) => t,
        Err(e) => fail(e),
    };

    let result = if cli.no_chunking {
        transcriber.transcribe(&input).await
    } else {
        transcriber.transcribe_chunked(&input).await
    };

    match result {
        Ok(text) => println!("{}", json!({ "transcription": text })),
        Err(e) => fail(e),
    }
}

/// Print a single-line JSON error to stdout and exit non-zero.
/// Stdout carries only the one JSON result line; logs go to stderr.
fn fail(message: impl std::fmt::Display) -> ! {
    println!("{}", json!({ "error": message.to_string() }));
    std::process::exit(1);
}
