//! Dictionary matcher - exact blocklist membership and longest-match
//! substring detection, leet-aware, with an optional constant-time mode.

use std::collections::HashSet;

use subtle::{Choice, ConstantTimeEq};

use crate::blocklist::{COMMON_PASSWORD_SET, CORPUS_LONGEST_FIRST};
use crate::leet;
use crate::types::{Category, Finding, Severity};

/// Per-call dictionary matcher configuration.
#[derive(Debug, Clone, Copy)]
pub struct DictionaryOptions<'a> {
    /// Caller-supplied passwords merged into the exact-match set.
    pub custom_passwords: &'a [String],
    /// Caller-supplied words merged into the substring corpus.
    pub custom_words: &'a [String],
    pub leet: bool,
    /// Use fixed-time comparisons so timing does not reveal whether, or
    /// where, a match occurred.
    pub constant_time: bool,
}

impl Default for DictionaryOptions<'_> {
    fn default() -> Self {
        Self {
            custom_passwords: &[],
            custom_words: &[],
            leet: true,
            constant_time: false,
        }
    }
}

/// Checks the lowercased password against the blocklists in two stages:
/// exact membership, then longest-match substring coverage.
///
/// An exact plain-text match suppresses the leet-variant exact check; the
/// leet substring pass reports only words the plain pass did not find.
pub fn check_dictionary(lower: &str, opts: &DictionaryOptions<'_>) -> Vec<Finding> {
    let mut findings = Vec::new();

    // decoded form, only when it differs from the input
    let normalized = opts
        .leet
        .then(|| leet::normalize(lower))
        .filter(|n| n != lower);

    // stage 1: exact membership
    if is_listed(lower, opts) {
        findings.push(Finding::new(
            "dictionary.exact",
            "Matches a commonly used password",
            Category::Dictionary,
            Severity::Critical,
        ));
    } else if let Some(normalized) = &normalized {
        if is_listed(normalized, opts) {
            findings.push(Finding::new(
                "dictionary.exact_leet",
                "Matches a commonly used password once substitutions are decoded",
                Category::Dictionary,
                Severity::Critical,
            ));
        }
    }

    // stage 2: longest-match substring coverage
    let corpus = merged_corpus(opts.custom_words);
    let plain_words = substring_matches(lower, &corpus, opts.constant_time);
    for word in &plain_words {
        findings.push(Finding::new(
            "dictionary.substring",
            format!("Contains the common word '{word}'"),
            Category::Dictionary,
            Severity::High,
        ));
    }

    if let Some(normalized) = &normalized {
        let found: HashSet<&str> = plain_words.iter().map(String::as_str).collect();
        for word in substring_matches(normalized, &corpus, opts.constant_time) {
            if !found.contains(word.as_str()) {
                findings.push(Finding::new(
                    "dictionary.substring_leet",
                    format!("Contains a disguised form of the common word '{word}'"),
                    Category::Dictionary,
                    Severity::High,
                ));
            }
        }
    }

    findings
}

/// Exact membership in the built-in set union the caller's custom list.
fn is_listed(candidate: &str, opts: &DictionaryOptions<'_>) -> bool {
    if opts.constant_time {
        let mut found = Choice::from(0u8);
        for &entry in COMMON_PASSWORD_SET.iter() {
            found |= ct_str_eq(candidate, entry);
        }
        for entry in opts.custom_passwords {
            found |= ct_str_eq(candidate, entry);
        }
        return found.into();
    }

    COMMON_PASSWORD_SET.contains(candidate)
        || opts.custom_passwords.iter().any(|p| p == candidate)
}

/// Merges the built-in corpus with custom words, keeping it sorted
/// longest-first so longer words claim coverage before their substrings.
fn merged_corpus(custom_words: &[String]) -> Vec<String> {
    let mut corpus: Vec<String> = CORPUS_LONGEST_FIRST
        .iter()
        .map(|w| (*w).to_string())
        .collect();
    if !custom_words.is_empty() {
        corpus.extend(custom_words.iter().map(|w| w.to_lowercase()));
        corpus.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
        corpus.dedup();
    }
    corpus
}

/// Scans for corpus words, tracking covered rune positions so a shorter
/// word fully inside an already-matched longer word is skipped. Returns
/// distinct matched words in detection order.
fn substring_matches(haystack: &str, corpus: &[String], constant_time: bool) -> Vec<String> {
    let chars: Vec<char> = haystack.chars().collect();
    let mut covered = vec![false; chars.len()];
    let mut matched: Vec<String> = Vec::new();

    for word in corpus {
        let word_chars: Vec<char> = word.chars().collect();
        if word_chars.is_empty() || word_chars.len() > chars.len() {
            continue;
        }

        let mut reported = false;
        for start in occurrences(&chars, &word_chars, constant_time) {
            let span = start..start + word_chars.len();
            if span.clone().all(|i| covered[i]) {
                continue;
            }
            for i in span {
                covered[i] = true;
            }
            if !reported && !matched.contains(word) {
                matched.push(word.clone());
                reported = true;
            }
        }
    }

    matched
}

/// All start positions where `word` occurs in `chars`.
///
/// In constant-time mode every candidate position is compared over the
/// full word length with no early return.
fn occurrences(chars: &[char], word: &[char], constant_time: bool) -> Vec<usize> {
    let mut positions = Vec::new();
    if word.len() > chars.len() {
        return positions;
    }

    if constant_time {
        for start in 0..chars.len() {
            let mut hit = Choice::from(1u8);
            for (j, &w) in word.iter().enumerate() {
                let c = chars.get(start + j).copied().unwrap_or('\0');
                hit &= (c as u32).ct_eq(&(w as u32));
            }
            let fits = Choice::from(u8::from(start + word.len() <= chars.len()));
            if bool::from(hit & fits) {
                positions.push(start);
            }
        }
    } else {
        for start in 0..=chars.len() - word.len() {
            if &chars[start..start + word.len()] == word {
                positions.push(start);
            }
        }
    }

    positions
}

/// Fixed-time string equality: work proportional to the longer operand,
/// never returning early on a mismatch.
fn ct_str_eq(a: &str, b: &str) -> Choice {
    let a = a.as_bytes();
    let b = b.as_bytes();
    let n = a.len().max(b.len());

    let mut diff = 0u8;
    for i in 0..n {
        let x = a.get(i).copied().unwrap_or(0);
        let y = b.get(i).copied().unwrap_or(0);
        diff |= x ^ y;
    }

    diff.ct_eq(&0) & (a.len() as u64).ct_eq(&(b.len() as u64))
}
