//! Search token extraction.
//!
//! A token is a lower-cased, maximal run of word characters at least
//! [`MIN_TOKEN_LEN`] characters long. Shorter runs are dropped, including
//! meaningful abbreviations like "AI" or "CS".

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

/// Minimum number of characters a word run needs to become a token.
pub const MIN_TOKEN_LEN: usize = 3;

/// Deduplicated tokens from one input. Ordered so that bound query
/// parameters come out the same way every time.
pub type TokenSet = BTreeSet<String>;

static WORD_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").expect("valid word regex"));

/// Extract the token set from raw user text. Never fails; empty or
/// whitespace-only input gives an empty set.
pub fn extract(text: &str) -> TokenSet {
    let lowered = text.to_lowercase();
    WORD_RUN
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|run| run.chars().count() >= MIN_TOKEN_LEN)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(words: &[&str]) -> TokenSet {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_empty_and_whitespace() {
        assert!(extract("").is_empty());
        assert!(extract("   ").is_empty());
        assert!(extract("\t\n ").is_empty());
    }

    #[test]
    fn test_lowercases_and_splits() {
        assert_eq!(
            extract("Can I get rice today?"),
            set(&["can", "get", "rice", "today"])
        );
    }

    #[test]
    fn test_duplicates_collapse() {
        assert_eq!(extract("Rice rice RICE"), set(&["rice"]));
    }

    #[test]
    fn test_three_char_minimum_is_exact() {
        // Two-letter abbreviations vanish. This is the intended threshold.
        assert_eq!(extract("AI lab in CS"), set(&["lab"]));
        assert_eq!(extract("ab abc"), set(&["abc"]));
    }

    #[test]
    fn test_punctuation_breaks_runs() {
        assert_eq!(
            extract("library@campus.edu"),
            set(&["library", "campus", "edu"])
        );
        assert_eq!(extract("07:30-20:00"), TokenSet::new());
    }

    #[test]
    fn test_underscore_and_digits_are_word_chars() {
        assert_eq!(extract("room_101 305"), set(&["room_101", "305"]));
    }

    #[test]
    fn test_unicode_word_runs() {
        let tokens = extract("Café MENÜ");
        assert!(tokens.contains("café"));
        assert!(tokens.contains("menü"));
    }

    #[test]
    fn test_token_properties_hold() {
        let inputs = [
            "Where is the Organic Chemistry Lab on Tue?",
            "fee payment!!! fee-payment",
            "a bb ccc dddd",
            "ÉCOLE école",
        ];
        for input in inputs {
            for token in extract(input) {
                assert!(token.chars().count() >= MIN_TOKEN_LEN, "{token}");
                assert_eq!(token, token.to_lowercase());
                assert!(
                    token.chars().all(|c| c.is_alphanumeric() || c == '_'),
                    "{token}"
                );
            }
        }
    }
}
