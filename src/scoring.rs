//! Scoring engine - entropy base, bonuses and weighted category penalties.

use crate::config::Weights;
use crate::types::{Category, CharsetProfile, FindingSet, PassphraseInfo};

/// Entropy normalization: 128 bits maps to the full 100-point scale.
const FULL_SCALE_BITS: f64 = 128.0;

const MAX_LENGTH_BONUS: f64 = 20.0;
const MAX_CHARSET_BONUS: f64 = 9.0;
const PASSPHRASE_BONUS: f64 = 25.0;

/// Base penalty weight per finding category.
fn base_weight(category: Category) -> f64 {
    match category {
        Category::Rule => 5.0,
        Category::Pattern => 10.0,
        Category::Dictionary => 15.0,
        Category::Context => 20.0,
        Category::Breach => 25.0,
    }
}

/// Combines entropy, bonuses and weighted penalties into a 0-100 score.
///
/// Dictionary penalties are suppressed for recognized passphrases:
/// dictionary words are expected there.
pub(crate) fn compute_score(
    entropy: f64,
    profile: &CharsetProfile,
    findings: &FindingSet,
    passphrase: &PassphraseInfo,
    min_length: usize,
    weights: &Weights,
) -> u8 {
    let base = entropy * 100.0 / FULL_SCALE_BITS * Weights::effective(weights.entropy);

    let length_bonus =
        ((profile.rune_count.saturating_sub(min_length) * 2) as f64).min(MAX_LENGTH_BONUS);
    let charset_bonus =
        ((profile.class_count().saturating_sub(1) * 3) as f64).min(MAX_CHARSET_BONUS);
    let passphrase_bonus = if passphrase.is_passphrase {
        PASSPHRASE_BONUS
    } else {
        0.0
    };

    let mut penalties = 0.0;
    for category in Category::PRIORITY {
        let count = findings.count(category);
        if count == 0 {
            continue;
        }
        let weight = if category == Category::Dictionary && passphrase.is_passphrase {
            0.0
        } else {
            base_weight(category)
        };
        penalties += count as f64 * weight * Weights::effective(weights.multiplier(category));
    }

    let raw = base + length_bonus + charset_bonus + passphrase_bonus - penalties;
    raw.round().clamp(0.0, 100.0) as u8
}
