//! Entropy estimation - three escalating models: character-pool,
//! pattern-discounted, and Markov-transition-adjusted.

use crate::config::EntropyMode;
use crate::feedback::quoted_token;
use crate::leet;
use crate::types::{CharsetProfile, Finding, PassphraseInfo};

/// Coverage weights of the pattern-discount formula. Kept for behavioral
/// compatibility; not load-bearing security constants.
const TOTAL_WEIGHT: f64 = 0.6;
const KEYBOARD_WEIGHT: f64 = 0.15;
const SEQUENCE_WEIGHT: f64 = 0.10;
const BLOCK_WEIGHT: f64 = 0.20;
const MAX_REDUCTION: f64 = 0.9;

/// Pool-based estimate: `rune_count * log2(pool_size)`, zero when either
/// factor is zero.
pub(crate) fn simple_entropy(profile: &CharsetProfile) -> f64 {
    let pool = profile.pool_size();
    if profile.rune_count == 0 || pool == 0 {
        return 0.0;
    }
    profile.rune_count as f64 * f64::from(pool).log2()
}

/// Pattern-discounted estimate: the simple value reduced by the fraction
/// of positions covered by detected patterns, floored at 10% of simple.
pub(crate) fn advanced_entropy(
    lower: &str,
    profile: &CharsetProfile,
    pattern_findings: &[Finding],
) -> f64 {
    let simple = simple_entropy(profile);
    if simple == 0.0 || pattern_findings.is_empty() {
        return simple;
    }

    let chars: Vec<char> = lower.chars().collect();
    let normalized: Vec<char> = leet::normalize(lower).chars().collect();
    let n = chars.len();

    let mut keyboard = vec![false; n];
    let mut sequence = vec![false; n];
    let mut block = vec![false; n];
    let mut total = vec![false; n];

    for finding in pattern_findings {
        let Some(token) = quoted_token(&finding.message) else {
            continue;
        };
        let token: Vec<char> = token.chars().collect();
        // leet words live in the decoded form, everything else in the input
        let haystack: &[char] = if finding.code == "pattern.leet_word" {
            &normalized
        } else {
            &chars
        };
        let per_type = match finding.code {
            "pattern.keyboard_walk" => Some(&mut keyboard),
            "pattern.sequence" => Some(&mut sequence),
            "pattern.repeated_block" => Some(&mut block),
            _ => None,
        };
        mark_occurrences(haystack, &token, &mut total, per_type);
    }

    let coverage = |bits: &[bool]| bits.iter().filter(|&&b| b).count() as f64 / n as f64;
    let reduction = (TOTAL_WEIGHT * coverage(&total)
        + KEYBOARD_WEIGHT * coverage(&keyboard)
        + SEQUENCE_WEIGHT * coverage(&sequence)
        + BLOCK_WEIGHT * coverage(&block))
    .min(MAX_REDUCTION);

    (simple * (1.0 - reduction)).max(0.1 * simple)
}

/// Marks every occurrence of `token` in both the union bitmap and the
/// per-type bitmap, when one applies.
fn mark_occurrences(
    haystack: &[char],
    token: &[char],
    total: &mut [bool],
    mut per_type: Option<&mut Vec<bool>>,
) {
    if token.is_empty() || token.len() > haystack.len() {
        return;
    }
    for start in 0..=haystack.len() - token.len() {
        if &haystack[start..start + token.len()] == token {
            for i in start..start + token.len() {
                total[i] = true;
                if let Some(bits) = per_type.as_deref_mut() {
                    bits[i] = true;
                }
            }
        }
    }
}

/// Markov-adjusted estimate: the advanced value scaled by a rune-transition
/// variability factor in [0.5, 1.5], floored at 5% of advanced.
pub(crate) fn pattern_aware_entropy(
    password: &str,
    lower: &str,
    profile: &CharsetProfile,
    pattern_findings: &[Finding],
) -> f64 {
    let advanced = advanced_entropy(lower, profile, pattern_findings);
    if advanced == 0.0 {
        return 0.0;
    }
    (advanced * transition_factor(password)).max(0.05 * advanced)
}

#[derive(PartialEq, Eq, Clone, Copy)]
enum RuneClass {
    Upper,
    Lower,
    Digit,
    Other,
}

fn rune_class(c: char) -> RuneClass {
    if c.is_uppercase() {
        RuneClass::Upper
    } else if c.is_lowercase() {
        RuneClass::Lower
    } else if c.is_ascii_digit() {
        RuneClass::Digit
    } else {
        RuneClass::Other
    }
}

/// Rune-transition variability in [0.5, 1.5]: repeated runes drag the
/// factor down, class changes and case changes push it up.
fn transition_factor(password: &str) -> f64 {
    let chars: Vec<char> = password.chars().collect();
    if chars.len() < 2 {
        return 1.0;
    }

    let transitions = (chars.len() - 1) as f64;
    let mut repeats = 0usize;
    let mut class_changes = 0usize;
    let mut case_changes = 0usize;

    for pair in chars.windows(2) {
        if pair[1] == pair[0] {
            repeats += 1;
        }
        if rune_class(pair[1]) != rune_class(pair[0]) {
            class_changes += 1;
        }
        if pair[0].is_alphabetic()
            && pair[1].is_alphabetic()
            && pair[0].is_uppercase() != pair[1].is_uppercase()
        {
            case_changes += 1;
        }
    }

    let variability = 0.4 * (1.0 - repeats as f64 / transitions)
        + 0.35 * (class_changes as f64 / transitions)
        + 0.25 * (case_changes as f64 / transitions);

    (0.5 + variability).clamp(0.5, 1.5)
}

/// Diceware model used when the input is a recognized passphrase.
pub(crate) fn passphrase_entropy(info: &PassphraseInfo, dictionary_size: u32) -> f64 {
    info.word_count as f64 * f64::from(dictionary_size).log2()
}

/// Dispatches on the configured mode; a recognized passphrase overrides
/// the mode entirely.
pub(crate) fn estimate(
    mode: EntropyMode,
    password: &str,
    lower: &str,
    profile: &CharsetProfile,
    pattern_findings: &[Finding],
    passphrase: Option<&PassphraseInfo>,
    dictionary_size: u32,
) -> f64 {
    if let Some(info) = passphrase {
        if info.is_passphrase {
            return passphrase_entropy(info, dictionary_size);
        }
    }

    match mode {
        EntropyMode::Simple => simple_entropy(profile),
        EntropyMode::Advanced => advanced_entropy(lower, profile, pattern_findings),
        EntropyMode::PatternAware => {
            pattern_aware_entropy(password, lower, profile, pattern_findings)
        }
    }
}
