//! Header normalization shared by recognizers and the fallback scorer.

/// Normalize a raw header for recognizer matching: lowercase, strip every
/// character outside `[a-z0-9_\s-]`, collapse whitespace runs.
pub fn normalize_header(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let mut cleaned = String::with_capacity(lowered.len());
    for ch in lowered.chars() {
        if ch.is_ascii_lowercase()
            || ch.is_ascii_digit()
            || ch == '_'
            || ch == '-'
            || ch.is_whitespace()
        {
            cleaned.push(ch);
        }
    }
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Comparison form used by the fallback scorer: normalized header with
/// the remaining separators flattened to spaces, so `first_name`,
/// `First-Name` and `First Name` all compare equal.
pub fn comparison_key(raw: &str) -> String {
    normalize_header(raw)
        .replace(['_', '-'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// True if the normalized header contains `word` as a whole token,
/// treating `_` and `-` as token separators.
pub fn has_word(normalized: &str, word: &str) -> bool {
    normalized
        .split([' ', '_', '-'])
        .any(|token| token == word)
}

/// True if any of `words` appears as a whole token.
pub fn has_any_word(normalized: &str, words: &[&str]) -> bool {
    words.iter().any(|word| has_word(normalized, word))
}
