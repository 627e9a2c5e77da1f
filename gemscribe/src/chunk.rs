//! Byte-range splitting for the chunked transcription path.
//!
//! Chunks are contiguous byte ranges in file order; the last one may be
//! short. Recombination is ordered: a single chunk's transcript is returned
//! verbatim (so a file that fits in one chunk transcribes identically to the
//! direct path), multiple transcripts are trimmed and joined with one space.

/// Split bytes into chunks of at most `chunk_bytes` each.
///
/// Empty input yields a single empty chunk so the caller still issues
/// exactly one request.
pub(crate) fn split(bytes: &[u8], chunk_bytes: usize) -> Vec<&[u8]> {
    if bytes.is_empty() {
        return vec![bytes];
    }
    bytes.chunks(chunk_bytes).collect()
}

/// Recombine per-chunk transcripts into one text.
pub(crate) fn recombine(transcripts: Vec<String>) -> String {
    if transcripts.len() == 1 {
        return transcripts.into_iter().next().unwrap_or_default();
    }
    transcripts
        .iter()
        .map(|t| t.trim())
        .collect::<Vec<_>>()
        .join(" ")
}
