//! Delimiter-based tokenizer for sentence mode

/// Separator set used when a request does not name its own.
pub const DEFAULT_SEPARATORS: &str = " .,;:";

/// Split `text` on every character found in `separators`.
///
/// Runs of separators never produce empty tokens, and neither do leading or
/// trailing separators. An empty `separators` set yields the whole text as a
/// single token (or nothing, for empty text).
pub fn tokenize(text: &str, separators: &str) -> Vec<String> {
    tokens(text, separators).map(str::to_owned).collect()
}

/// Borrowing variant of [`tokenize`].
pub fn tokens<'a>(text: &'a str, separators: &'a str) -> impl Iterator<Item = &'a str> + 'a {
    text.split(move |c: char| separators.contains(c))
        .filter(|token| !token.is_empty())
}
