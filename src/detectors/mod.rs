//! Credential detectors
//!
//! Each detector analyzes a specific aspect of credential weakness and
//! returns plain [`Finding`](crate::Finding) values; none of them retain
//! state between calls or can fail.

mod context;
mod dictionary;
mod passphrase;
mod patterns;
mod rules;

pub use context::{check_context, ContextOptions};
pub use dictionary::{check_dictionary, DictionaryOptions};
pub use passphrase::{recognize_passphrase, PassphraseOptions};
pub use patterns::{check_patterns, PatternOptions};
pub use rules::{check_rules, RuleOptions};
