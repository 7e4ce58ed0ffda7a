//! Credential strength analysis library
//!
//! This library evaluates the strength of a candidate credential and
//! returns a deterministic score, verdict and prioritized feedback. The
//! pipeline chains policy-rule checks, pattern detection (keyboard walks,
//! sequences, repeated blocks, leet substitutions), blocklist matching,
//! context-aware personal-information detection and passphrase
//! recognition with a three-mode entropy estimator and a weighted
//! scoring engine.
//!
//! # Features
//!
//! - `async` (default): Enables the channel-based [`analyze_tx`] wrapper
//! - `tracing`: Enables logging via tracing crate
//!
//! # Environment Variables
//!
//! - `PWD_ANALYZER_BLOCKLIST_PATH`: Optional path to a caller-managed
//!   wordlist file (see [`custom_blocklist_path`])
//!
//! # Example
//!
//! ```rust
//! use pwd_analyzer::{analyze, AnalyzerConfig};
//! use secrecy::SecretString;
//!
//! let password = SecretString::new("MyP@ssw0rd!".to_string().into());
//! let analysis = analyze(&password, &AnalyzerConfig::default())
//!     .expect("default configuration is valid");
//!
//! println!("Score: {}", analysis.score);
//! println!("Verdict: {}", analysis.verdict);
//! for issue in &analysis.issues {
//!     println!("- {}", issue.message);
//! }
//! ```

// Internal modules
mod analyzer;
mod blocklist;
mod config;
mod detectors;
mod entropy;
mod feedback;
mod layouts;
mod leet;
mod scoring;
mod types;

// Public API
pub use analyzer::{
    analyze, analyze_buffer, analyze_with_breach, BreachCheck, BreachError, BreachReport,
};
pub use blocklist::{custom_blocklist_path, load_wordlist, BlocklistError};
pub use config::{AnalyzerConfig, ConfigError, EntropyMode, Weights};
pub use detectors::{
    check_context, check_dictionary, check_patterns, check_rules, recognize_passphrase,
    ContextOptions, DictionaryOptions, PassphraseOptions, PatternOptions, RuleOptions,
};
pub use types::{
    Analysis, Category, CharsetProfile, Finding, FindingSet, PassphraseInfo, Severity, Verdict,
};

#[cfg(feature = "async")]
pub use analyzer::analyze_tx;
