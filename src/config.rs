//! Analyzer configuration - the single settings object and its validation.

use std::time::Duration;

use thiserror::Error;

use crate::detectors::{
    ContextOptions, DictionaryOptions, PassphraseOptions, PatternOptions, RuleOptions,
};
use crate::types::Category;

/// Entropy estimation model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntropyMode {
    /// Character-pool model only.
    Simple,
    /// Pool model discounted by detected pattern coverage.
    Advanced,
    /// Advanced model adjusted by rune-transition statistics.
    #[default]
    PatternAware,
}

/// Per-category penalty multipliers plus the entropy multiplier.
///
/// A multiplier of `0.0` is interpreted as the default `1.0`, never as
/// "eliminate this penalty"; negative values are a configuration error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    pub rule: f64,
    pub pattern: f64,
    pub dictionary: f64,
    pub context: f64,
    pub breach: f64,
    pub entropy: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            rule: 1.0,
            pattern: 1.0,
            dictionary: 1.0,
            context: 1.0,
            breach: 1.0,
            entropy: 1.0,
        }
    }
}

impl Weights {
    /// Resolves the zero-means-default convention.
    pub(crate) fn effective(raw: f64) -> f64 {
        if raw == 0.0 { 1.0 } else { raw }
    }

    pub(crate) fn multiplier(&self, category: Category) -> f64 {
        match category {
            Category::Rule => self.rule,
            Category::Pattern => self.pattern,
            Category::Dictionary => self.dictionary,
            Category::Context => self.context,
            Category::Breach => self.breach,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let named = [
            ("rule", self.rule),
            ("pattern", self.pattern),
            ("dictionary", self.dictionary),
            ("context", self.context),
            ("breach", self.breach),
            ("entropy", self.entropy),
        ];
        for (name, value) in named {
            if value < 0.0 || !value.is_finite() {
                return Err(ConfigError::Weight(name, value));
            }
        }
        Ok(())
    }
}

/// Configuration rejected before analysis begins.
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("minimum length must be at least 1, got {0}")]
    MinLength(usize),
    #[error("max consecutive repeats must be at least 2, got {0}")]
    MaxRepeats(usize),
    #[error("pattern threshold must be at least 3, got {0}")]
    PatternThreshold(usize),
    #[error("minimum passphrase word count must be at least 1")]
    PassphraseWords,
    #[error("passphrase dictionary size must be at least 2, got {0}")]
    PassphraseDictionary(u32),
    #[error("weight multiplier '{0}' must be a non-negative finite number, got {1}")]
    Weight(&'static str, f64),
}

/// The single settings object consumed by [`analyze`](crate::analyze).
///
/// Values are validated before any detector runs; see [`ConfigError`] for
/// the rejected ranges.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    pub min_length: usize,
    pub require_uppercase: bool,
    pub require_lowercase: bool,
    pub require_digit: bool,
    pub require_symbol: bool,
    /// Maximum allowed run of identical runes.
    pub max_repeats: usize,
    /// Minimum run length for keyboard walks and sequences.
    pub pattern_threshold: usize,
    /// Cap on reported issues; 0 means unlimited.
    pub max_issues: usize,
    /// Extra exact-match blocklist entries.
    pub custom_passwords: Vec<String>,
    /// Extra substring-corpus entries.
    pub custom_words: Vec<String>,
    /// Personal identifiers (username, email, company name).
    pub context: Vec<String>,
    /// Enables leet-normalized variants in the pattern, dictionary and
    /// context detectors.
    pub leet: bool,
    /// Fixed-time blocklist comparisons for blocklist confidentiality.
    pub constant_time: bool,
    /// Enables passphrase recognition, the diceware entropy override and
    /// the passphrase scoring bonus.
    pub passphrase: bool,
    pub min_passphrase_words: usize,
    /// Diceware dictionary size used by the passphrase entropy model.
    pub passphrase_dictionary_size: u32,
    pub entropy_mode: EntropyMode,
    pub weights: Weights,
    /// Pads the analysis to a minimum wall-clock duration so callers
    /// cannot infer the outcome from response latency.
    pub min_execution_time: Option<Duration>,
    /// Input cap; longer passwords are silently truncated.
    pub max_runes: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            min_length: 8,
            require_uppercase: true,
            require_lowercase: true,
            require_digit: true,
            require_symbol: true,
            max_repeats: 2,
            pattern_threshold: 4,
            max_issues: 5,
            custom_passwords: Vec::new(),
            custom_words: Vec::new(),
            context: Vec::new(),
            leet: true,
            constant_time: false,
            passphrase: true,
            min_passphrase_words: 4,
            passphrase_dictionary_size: 7776,
            entropy_mode: EntropyMode::default(),
            weights: Weights::default(),
            min_execution_time: None,
            max_runes: 1024,
        }
    }
}

impl AnalyzerConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint: minimum length below 1, max
    /// repeats below 2, pattern threshold below 3, invalid passphrase
    /// settings, or a negative or non-finite weight multiplier.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_length < 1 {
            return Err(ConfigError::MinLength(self.min_length));
        }
        if self.max_repeats < 2 {
            return Err(ConfigError::MaxRepeats(self.max_repeats));
        }
        if self.pattern_threshold < 3 {
            return Err(ConfigError::PatternThreshold(self.pattern_threshold));
        }
        if self.min_passphrase_words < 1 {
            return Err(ConfigError::PassphraseWords);
        }
        if self.passphrase_dictionary_size < 2 {
            return Err(ConfigError::PassphraseDictionary(
                self.passphrase_dictionary_size,
            ));
        }
        self.weights.validate()
    }

    pub(crate) fn rule_options(&self) -> RuleOptions {
        RuleOptions {
            min_length: self.min_length,
            require_uppercase: self.require_uppercase,
            require_lowercase: self.require_lowercase,
            require_digit: self.require_digit,
            require_symbol: self.require_symbol,
            max_repeats: self.max_repeats,
        }
    }

    pub(crate) fn pattern_options(&self) -> PatternOptions {
        PatternOptions {
            threshold: self.pattern_threshold,
            leet: self.leet,
        }
    }

    pub(crate) fn dictionary_options(&self) -> DictionaryOptions<'_> {
        DictionaryOptions {
            custom_passwords: &self.custom_passwords,
            custom_words: &self.custom_words,
            leet: self.leet,
            constant_time: self.constant_time,
        }
    }

    pub(crate) fn context_options(&self) -> ContextOptions<'_> {
        ContextOptions {
            identifiers: &self.context,
            leet: self.leet,
        }
    }

    pub(crate) fn passphrase_options(&self) -> PassphraseOptions {
        PassphraseOptions {
            min_words: self.min_passphrase_words,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AnalyzerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_min_length_zero_rejected() {
        let config = AnalyzerConfig {
            min_length: 0,
            ..AnalyzerConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::MinLength(0)));
    }

    #[test]
    fn test_max_repeats_below_two_rejected() {
        let config = AnalyzerConfig {
            max_repeats: 1,
            ..AnalyzerConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::MaxRepeats(1)));
    }

    #[test]
    fn test_pattern_threshold_below_three_rejected() {
        let config = AnalyzerConfig {
            pattern_threshold: 2,
            ..AnalyzerConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::PatternThreshold(2)));
    }

    #[test]
    fn test_negative_weight_rejected() {
        let config = AnalyzerConfig {
            weights: Weights {
                dictionary: -1.0,
                ..Weights::default()
            },
            ..AnalyzerConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::Weight("dictionary", -1.0))
        );
    }

    #[test]
    fn test_nan_weight_rejected() {
        let config = AnalyzerConfig {
            weights: Weights {
                entropy: f64::NAN,
                ..Weights::default()
            },
            ..AnalyzerConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Weight("entropy", _))
        ));
    }

    #[test]
    fn test_zero_weight_is_valid() {
        let config = AnalyzerConfig {
            weights: Weights {
                pattern: 0.0,
                ..Weights::default()
            },
            ..AnalyzerConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ConfigError::MinLength(0).to_string(),
            "minimum length must be at least 1, got 0"
        );
        assert_eq!(
            ConfigError::Weight("breach", -2.0).to_string(),
            "weight multiplier 'breach' must be a non-negative finite number, got -2"
        );
    }
}
