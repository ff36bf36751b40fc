/// Isolate the JSON object embedded in raw model output.
///
/// Takes everything from the first `{` to the last `}` inclusive. When either brace is
/// missing, or the last `}` comes before the first `{`, the input is returned unchanged
/// so that decoding fails with a parse error instead of a guess.
///
/// This is not a tokenizer: a stray brace in prose before or after the real object
/// widens the slice and the decode fails.
pub fn extract_json(raw_text: &str) -> &str {
    let Some(start) = raw_text.find('{') else {
        return raw_text;
    };

    match raw_text.rfind('}') {
        Some(end) if end > start => &raw_text[start..=end],
        _ => raw_text,
    }
}
