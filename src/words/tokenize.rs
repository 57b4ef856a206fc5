//! Punctuation stripping and whitespace tokenization

/// Remove every ASCII punctuation character
///
/// Non-ASCII punctuation (curly quotes, em dashes) is left in place.
pub fn strip_punctuation(text: &str) -> String {
    text.chars().filter(|c| !c.is_ascii_punctuation()).collect()
}

/// Strip punctuation, then split on whitespace
///
/// Case is preserved: `The` and `the` are different tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    strip_punctuation(text)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}
