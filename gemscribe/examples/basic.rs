//! Transcribe a local audio file and print the text.
//!
//! Usage: GEMINI_API_KEY=... cargo run --example basic -- path/to/audio.mp3

#[tokio::main(flavor = "current_thread")]
async fn main() -> gemscribe::Result<()> {
    let path = std::env::args()
        .nth(1)
        .expect("usage: basic <audio-file>");

    let config = gemscribe::Config::from_env()?;
    let text = gemscribe::transcribe_file(&path, &config).await?;

    println!("{text}");

    Ok(())
}
