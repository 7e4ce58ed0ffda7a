//! Built-in blocklists and wordlist file loading.
//!
//! The built-in tables are intentionally modest; large corpora are loaded
//! by the caller through [`load_wordlist`] and supplied per call via
//! [`DictionaryOptions`](crate::DictionaryOptions).

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;

/// Most common passwords, checked for exact matches (lowercase).
const COMMON_PASSWORDS: &[&str] = &[
    "password", "123456", "12345678", "123456789", "1234567890", "qwerty",
    "abc123", "monkey", "master", "dragon", "111111", "baseball", "iloveyou",
    "trustno1", "sunshine", "letmein", "football", "shadow", "michael",
    "login", "admin", "welcome", "passw0rd", "000000", "access", "superman",
    "princess", "starwars", "freedom", "whatever", "qazwsx", "654321",
    "jordan", "harley", "ranger", "hunter", "buster", "soccer", "hockey",
    "killer", "george", "charlie", "andrew", "michelle", "jessica",
    "pepper", "daniel", "computer", "internet", "secret",
];

/// Word corpus for substring detection (lowercase), merged per call with
/// caller-supplied custom words.
const COMMON_WORDS: &[&str] = &[
    "password", "welcome", "dragon", "monkey", "shadow", "master", "login",
    "admin", "secret", "letmein", "freedom", "princess", "sunshine",
    "superman", "batman", "football", "baseball", "soccer", "hockey",
    "summer", "winter", "spring", "autumn", "orange", "purple", "silver",
    "golden", "yellow", "flower", "banana", "cookie", "coffee", "pepper",
    "ginger", "happy", "lucky", "angel", "tiger", "eagle", "horse",
    "house", "mouse", "money", "honey", "magic", "music", "ninja",
    "pirate", "wizard", "knight", "castle", "forest", "river", "ocean",
    "cloud", "storm", "thunder", "lightning", "correct", "battery",
    "staple", "charlie", "michael", "jordan", "jennifer", "jessica",
    "ashley", "nicole", "daniel", "george", "andrew", "robert", "love",
    "star", "king", "queen", "hello", "world", "computer", "internet",
    "qwerty", "trustno", "pass", "word",
];

/// Exact-match set, built once at startup.
pub(crate) static COMMON_PASSWORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| COMMON_PASSWORDS.iter().copied().collect());

/// Substring corpus sorted longest-first, built once at startup, so the
/// longest-match scan tries longer words before their substrings.
pub(crate) static CORPUS_LONGEST_FIRST: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    let mut corpus: Vec<&'static str> = COMMON_WORDS.to_vec();
    corpus.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    corpus
});

#[derive(Error, Debug)]
pub enum BlocklistError {
    #[error("wordlist file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("failed to read wordlist file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("wordlist file is empty")]
    EmptyFile,
}

/// Returns the wordlist path configured through the
/// `PWD_ANALYZER_BLOCKLIST_PATH` environment variable, if set.
pub fn custom_blocklist_path() -> Option<PathBuf> {
    std::env::var("PWD_ANALYZER_BLOCKLIST_PATH")
        .ok()
        .map(PathBuf::from)
}

/// Loads a wordlist file into lowercase entries, one per line.
///
/// Entries are trimmed and empty lines dropped. The result is meant to be
/// passed per call as a custom password or word list.
///
/// # Errors
///
/// Returns error if:
/// - File does not exist
/// - File cannot be read
/// - File is empty
///
/// # Example
///
/// ```rust,ignore
/// let path = pwd_analyzer::custom_blocklist_path()
///     .unwrap_or_else(|| "./assets/blocklist.txt".into());
/// let custom = pwd_analyzer::load_wordlist(&path)?;
/// ```
pub fn load_wordlist<P: AsRef<Path>>(path: P) -> Result<Vec<String>, BlocklistError> {
    let path = path.as_ref();

    if !path.exists() {
        #[cfg(feature = "tracing")]
        tracing::error!("Wordlist loading FAILED: FileNotFound {:?}", path);
        return Err(BlocklistError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;

    if content.trim().is_empty() {
        #[cfg(feature = "tracing")]
        tracing::error!("Wordlist loading FAILED: Empty file {:?}", path);
        return Err(BlocklistError::EmptyFile);
    }

    let words: Vec<String> = content
        .lines()
        .map(|l| l.trim().to_lowercase())
        .filter(|l| !l.is_empty())
        .collect();

    #[cfg(feature = "tracing")]
    tracing::info!("Wordlist loaded: {} entries from {:?}", words.len(), path);

    Ok(words)
}
