//! Phone number extraction from uploaded text and CSV files.

use tracing::warn;

/// Yield candidate phone numbers from a text or CSV blob, one per line.
///
/// Lines are trimmed. Blank lines and lines starting with `#` are skipped.
/// When a line contains a comma only the first column is taken. Numbers are
/// not validated here; [`crate::domain::is_valid_phone_number`] does that
/// when a message is built.
pub fn extract_phone_numbers(text: &str) -> impl Iterator<Item = String> + '_ {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| match line.split_once(',') {
            Some((first, _)) => first.trim(),
            None => line,
        })
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
}

/// Like [`extract_phone_numbers`] for raw file contents.
///
/// Contents that are not valid UTF-8 yield nothing; the failure is logged
/// instead of returned.
pub fn extract_phone_numbers_from_bytes(content: &[u8]) -> Vec<String> {
    match std::str::from_utf8(content) {
        Ok(text) => extract_phone_numbers(text).collect(),
        Err(err) => {
            warn!(error = %err, "uploaded file is not valid UTF-8; no numbers extracted");
            Vec::new()
        }
    }
}
