//! Passphrase recognizer - word-boundary segmentation and multi-word
//! detection.

use crate::types::PassphraseInfo;

/// Per-call passphrase recognizer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassphraseOptions {
    /// Minimum distinct word count for a passphrase.
    pub min_words: usize,
}

impl Default for PassphraseOptions {
    fn default() -> Self {
        Self { min_words: 4 }
    }
}

/// Segments the password into words in a single left-to-right pass.
///
/// Boundaries: explicit separators (space, hyphen, underscore), camelCase
/// transitions, and letter<->digit transitions once the accumulated token
/// has at least two runes. Words are deduplicated case-insensitively;
/// tokens shorter than two runes are discarded.
pub fn recognize_passphrase(password: &str, opts: &PassphraseOptions) -> PassphraseInfo {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;
    let mut prev: Option<char> = None;

    let mut flush = |current: &mut String, current_len: &mut usize, words: &mut Vec<String>| {
        if *current_len >= 2 {
            let word = current.to_lowercase();
            if !words.contains(&word) {
                words.push(word);
            }
        }
        current.clear();
        *current_len = 0;
    };

    for c in password.chars() {
        if c == ' ' || c == '-' || c == '_' {
            flush(&mut current, &mut current_len, &mut words);
            prev = Some(c);
            continue;
        }

        if let Some(p) = prev {
            let camel = c.is_uppercase() && (p.is_lowercase() || p.is_ascii_digit());
            let digit_boundary = current_len >= 2
                && (p.is_alphabetic() || p.is_ascii_digit())
                && (c.is_alphabetic() || c.is_ascii_digit())
                && (p.is_ascii_digit() != c.is_ascii_digit());
            if camel || digit_boundary {
                flush(&mut current, &mut current_len, &mut words);
            }
        }

        current.push(c);
        current_len += 1;
        prev = Some(c);
    }
    flush(&mut current, &mut current_len, &mut words);

    let word_count = words.len();
    PassphraseInfo {
        is_passphrase: word_count >= opts.min_words,
        word_count,
        words,
    }
}
