//! Pattern detector - keyboard walks, sequences, repeated blocks and
//! leet substitutions of weak words.

use std::collections::HashSet;

use crate::layouts::LAYOUT_INDEX;
use crate::leet;
use crate::types::{Category, Finding, Severity};

/// Curated weak words targeted by the substitution check.
const SUBSTITUTION_WORDS: &[&str] = &[
    "password", "secret", "admin", "welcome", "letmein", "dragon", "master",
    "monkey", "shadow", "login", "iloveyou", "princess", "sunshine",
    "football", "baseball", "superman",
];

/// Longest repeated-block length considered; keeps the scan close to
/// linear despite the nested loop.
const MAX_BLOCK_LEN: usize = 8;

/// Cap on distinct repeated blocks reported, to bound noise.
const MAX_BLOCK_REPORTS: usize = 4;

/// Thresholds for the pattern detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternOptions {
    /// Minimum run length for keyboard walks and sequences.
    pub threshold: usize,
    pub leet: bool,
}

impl Default for PatternOptions {
    fn default() -> Self {
        Self {
            threshold: 4,
            leet: true,
        }
    }
}

/// Runs the four pattern checkers in fixed order over a lowercased copy
/// of the password: keyboard -> sequence -> block -> substitution.
pub fn check_patterns(password: &str, opts: &PatternOptions) -> Vec<Finding> {
    let lower = password.to_lowercase();
    let chars: Vec<char> = lower.chars().collect();
    let mut findings = Vec::new();

    keyboard_walks(&chars, opts.threshold, &mut findings);
    sequences(&chars, opts.threshold, &mut findings);
    repeated_blocks(&chars, &mut findings);
    if opts.leet {
        substitutions(&lower, &mut findings);
    }

    findings
}

/// Scans for contiguous runs along indexed keyboard layouts. After a
/// match the cursor advances past the matched region, so overlapping
/// sub-walks are not double-reported.
fn keyboard_walks(chars: &[char], threshold: usize, out: &mut Vec<Finding>) {
    let mut seen: HashSet<String> = HashSet::new();
    let mut i = 0;
    while i < chars.len() {
        let run = LAYOUT_INDEX.longest_run(chars, i);
        if run >= threshold {
            let matched: String = chars[i..i + run].iter().collect();
            if seen.insert(matched.clone()) {
                out.push(Finding::new(
                    "pattern.keyboard_walk",
                    format!("Contains the keyboard pattern '{matched}'"),
                    Category::Pattern,
                    Severity::Medium,
                ));
            }
            i += run;
        } else {
            i += 1;
        }
    }
}

/// Detects maximal runs where each rune differs from its predecessor by a
/// constant code point step of +-1 or +-2.
fn sequences(chars: &[char], threshold: usize, out: &mut Vec<Finding>) {
    let mut seen: HashSet<String> = HashSet::new();
    let mut i = 0;
    while i + 1 < chars.len() {
        let step = chars[i + 1] as i64 - chars[i] as i64;
        if !matches!(step, -2 | -1 | 1 | 2) {
            i += 1;
            continue;
        }

        let mut j = i + 1;
        while j + 1 < chars.len() && chars[j + 1] as i64 - chars[j] as i64 == step {
            j += 1;
        }

        let run = j - i + 1;
        if run >= threshold {
            let matched: String = chars[i..=j].iter().collect();
            if seen.insert(matched.clone()) {
                out.push(Finding::new(
                    "pattern.sequence",
                    format!("Contains the sequence '{matched}'"),
                    Category::Pattern,
                    Severity::Medium,
                ));
            }
        }
        // the run end may start a new run with a different step
        i = j;
    }
}

/// Finds substrings immediately repeated back-to-back. Single-rune blocks
/// are the rule checker's concern and are skipped here.
fn repeated_blocks(chars: &[char], out: &mut Vec<Finding>) {
    let n = chars.len();
    let mut seen: HashSet<String> = HashSet::new();

    for len in 2..=(n / 2).min(MAX_BLOCK_LEN) {
        for start in 0..=(n - 2 * len) {
            let block = &chars[start..start + len];
            if block.iter().all(|&c| c == block[0]) {
                continue;
            }
            if block == &chars[start + len..start + 2 * len] {
                let matched: String = block.iter().collect();
                if seen.insert(matched.clone()) {
                    out.push(Finding::new(
                        "pattern.repeated_block",
                        format!("Contains the repeated block '{matched}'"),
                        Category::Pattern,
                        Severity::Medium,
                    ));
                    if seen.len() >= MAX_BLOCK_REPORTS {
                        return;
                    }
                }
            }
        }
    }
}

/// Normalizes leetspeak and checks the result for curated weak words.
/// Each distinct word is reported once.
fn substitutions(lower: &str, out: &mut Vec<Finding>) {
    let normalized = leet::normalize(lower);
    if normalized == lower {
        return;
    }

    for &word in SUBSTITUTION_WORDS {
        if normalized.contains(word) {
            out.push(Finding::new(
                "pattern.leet_word",
                format!("Obfuscated form of the common word '{word}'"),
                Category::Pattern,
                Severity::Medium,
            ));
        }
    }
}
