//! Transcribe a large file in 5 MB chunks.
//!
//! Usage: GEMINI_API_KEY=... cargo run --example chunked -- path/to/audio.mp3

#[tokio::main(flavor = "current_thread")]
async fn main() -> gemscribe::Result<()> {
    let path = std::env::args()
        .nth(1)
        .expect("usage: chunked <audio-file>");

    let config = gemscribe::Config::from_env()?.chunk_size_mb(5)?;
    let text = gemscribe::transcribe_file_chunked(&path, &config).await?;

    println!("{text}");

    Ok(())
}
