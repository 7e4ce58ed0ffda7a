//! Feedback refiner - deduplication, stable priority ordering, truncation,
//! and positive-feedback synthesis.

use std::collections::HashMap;

use crate::types::{Category, CharsetProfile, Finding, FindingSet};

/// Extracts the first single-quoted token from a message, if any.
pub(crate) fn quoted_token(message: &str) -> Option<&str> {
    let start = message.find('\'')? + 1;
    let end = message[start..].find('\'')? + start;
    Some(&message[start..end])
}

/// Flattens, deduplicates and orders the findings.
///
/// Findings sharing a quoted token keep only the highest-severity one;
/// unquoted messages are never deduplicated. The result is stably sorted
/// by severity descending (ties preserve flatten order) and truncated to
/// `max_issues` (0 = unlimited).
pub(crate) fn refine(findings: &FindingSet, max_issues: usize) -> Vec<Finding> {
    let mut kept: Vec<Finding> = Vec::new();
    let mut by_token: HashMap<String, usize> = HashMap::new();

    for finding in findings.flatten() {
        match quoted_token(&finding.message).map(str::to_owned) {
            Some(token) => match by_token.get(&token) {
                Some(&idx) => {
                    if finding.severity > kept[idx].severity {
                        kept[idx] = finding;
                    }
                }
                None => {
                    by_token.insert(token, kept.len());
                    kept.push(finding);
                }
            },
            None => kept.push(finding),
        }
    }

    kept.sort_by(|a, b| b.severity.cmp(&a.severity));
    if max_issues > 0 {
        kept.truncate(max_issues);
    }
    kept
}

/// Minimum rune count worth praising.
const PRAISE_LENGTH: usize = 16;

/// Minimum entropy worth praising, in bits.
const PRAISE_ENTROPY: f64 = 60.0;

/// Synthesizes positive feedback. Independent of the issues list: each
/// message is added only when its own criterion holds.
pub(crate) fn praise(
    profile: &CharsetProfile,
    findings: &FindingSet,
    entropy: f64,
) -> Vec<String> {
    let mut suggestions = Vec::new();

    if profile.rune_count >= PRAISE_LENGTH {
        suggestions.push("Good length (16+ characters)".to_string());
    }
    if profile.class_count() >= 3 {
        suggestions.push("Good mix of character types".to_string());
    }
    if profile.rune_count > 0 && findings.count(Category::Pattern) == 0 {
        suggestions.push("No predictable patterns detected".to_string());
    }
    if profile.rune_count > 0 && findings.count(Category::Dictionary) == 0 {
        suggestions.push("No dictionary words detected".to_string());
    }
    if entropy >= PRAISE_ENTROPY {
        suggestions.push("High entropy (60+ bits)".to_string());
    }

    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Severity;

    fn finding(code: &'static str, message: &str, category: Category, severity: Severity) -> Finding {
        Finding::new(code, message, category, severity)
    }

    #[test]
    fn test_quoted_token() {
        assert_eq!(quoted_token("Contains the common word 'dragon'"), Some("dragon"));
        assert_eq!(quoted_token("no quotes here"), None);
        assert_eq!(quoted_token("dangling ' quote"), None);
        assert_eq!(quoted_token("'first' and 'second'"), Some("first"));
    }

    #[test]
    fn test_refine_dedup_keeps_highest_severity() {
        let mut set = FindingSet::default();
        set.push(finding(
            "pattern.leet_word",
            "Obfuscated form of the common word 'dragon'",
            Category::Pattern,
            Severity::Medium,
        ));
        set.push(finding(
            "dictionary.substring",
            "Contains the common word 'dragon'",
            Category::Dictionary,
            Severity::High,
        ));

        let refined = refine(&set, 0);
        assert_eq!(refined.len(), 1);
        assert_eq!(refined[0].code, "dictionary.substring");
    }

    #[test]
    fn test_refine_unquoted_never_deduplicated() {
        let mut set = FindingSet::default();
        set.push(finding("rule.a", "Missing numbers", Category::Rule, Severity::Low));
        set.push(finding("rule.b", "Missing numbers", Category::Rule, Severity::Low));

        assert_eq!(refine(&set, 0).len(), 2);
    }

    #[test]
    fn test_refine_sorted_by_severity_descending() {
        let mut set = FindingSet::default();
        set.push(finding("rule.a", "low issue", Category::Rule, Severity::Low));
        set.push(finding("pattern.a", "medium issue", Category::Pattern, Severity::Medium));
        set.push(finding("breach.a", "critical issue", Category::Breach, Severity::Critical));

        let refined = refine(&set, 0);
        let severities: Vec<Severity> = refined.iter().map(|f| f.severity).collect();
        assert_eq!(severities, vec![Severity::Critical, Severity::Medium, Severity::Low]);
    }

    #[test]
    fn test_refine_stable_for_equal_severity() {
        let mut set = FindingSet::default();
        set.push(finding("context.a", "ctx 'acme'", Category::Context, Severity::High));
        set.push(finding("dictionary.a", "dict 'dragon'", Category::Dictionary, Severity::High));

        // dictionary flattens before context; ties keep that order
        let refined = refine(&set, 0);
        assert_eq!(refined[0].code, "dictionary.a");
        assert_eq!(refined[1].code, "context.a");
    }

    #[test]
    fn test_refine_truncates() {
        let mut set = FindingSet::default();
        for _ in 0..6 {
            set.push(finding("rule.a", "Missing numbers", Category::Rule, Severity::Low));
        }
        assert_eq!(refine(&set, 3).len(), 3);
        assert_eq!(refine(&set, 0).len(), 6);
    }

    #[test]
    fn test_praise_all_criteria() {
        let profile = CharsetProfile::of("Xk9$mP2!vR7@nL4&wQzB");
        let suggestions = praise(&profile, &FindingSet::default(), 131.0);
        assert_eq!(suggestions.len(), 5);
    }

    #[test]
    fn test_praise_empty_input_gets_none() {
        let profile = CharsetProfile::of("");
        let suggestions = praise(&profile, &FindingSet::default(), 0.0);
        assert!(suggestions.is_empty());
    }

    #[test]
    fn test_praise_suppressed_by_findings() {
        let mut set = FindingSet::default();
        set.push(finding(
            "pattern.sequence",
            "Contains the sequence 'abcd'",
            Category::Pattern,
            Severity::Medium,
        ));
        let profile = CharsetProfile::of("abcdWXYZ90!@abcd");
        let suggestions = praise(&profile, &set, 30.0);
        assert!(!suggestions.iter().any(|s| s.contains("patterns")));
        assert!(suggestions.iter().any(|s| s.contains("dictionary")));
    }
}
