// Text normalization: lowercase, strip punctuation, split into positioned tokens.
use once_cell::sync::Lazy;
use regex::Regex;

// Anything that is not a letter, a digit or whitespace becomes a word break.
static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\p{L}\p{N}\s]").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub position: usize,
    pub text: String,
}

/// Lowercasing is ASCII-only; uppercase letters outside ASCII pass through unchanged.
pub fn normalize(text: &str) -> Vec<Token> {
    let lowered = text.to_ascii_lowercase();
    NON_WORD
        .replace_all(&lowered, " ")
        .split_whitespace()
        .enumerate()
        .map(|(position, word)| Token {
            position,
            text: word.to_string(),
        })
        .collect()
}
