//! Context detector - caller-supplied personal identifiers inside the
//! password (username, email fragments, company name).

use std::collections::HashSet;

use crate::leet;
use crate::types::{Category, Finding, Severity};

/// Minimum token length worth checking; shorter fragments match too often
/// to be a signal.
const MIN_TOKEN_LEN: usize = 3;

const SEPARATORS: &[char] = &['.', '_', '-', '+', '@', ' '];

/// Per-call context detector configuration.
#[derive(Debug, Clone, Copy)]
pub struct ContextOptions<'a> {
    /// Personal identifiers supplied by the caller.
    pub identifiers: &'a [String],
    pub leet: bool,
}

impl Default for ContextOptions<'_> {
    fn default() -> Self {
        Self {
            identifiers: &[],
            leet: true,
        }
    }
}

/// Checks whether fragments of the supplied identifiers occur inside the
/// password, in plain or leet-normalized form. One finding per distinct
/// token across all identifiers.
pub fn check_context(lower: &str, opts: &ContextOptions<'_>) -> Vec<Finding> {
    if opts.identifiers.is_empty() || lower.is_empty() {
        return Vec::new();
    }

    let normalized = opts
        .leet
        .then(|| leet::normalize(lower))
        .filter(|n| n != lower);

    let mut checked: HashSet<String> = HashSet::new();
    let mut findings = Vec::new();

    for identifier in opts.identifiers {
        for token in decompose(identifier) {
            if !checked.insert(token.clone()) {
                continue;
            }
            let hit = lower.contains(&token)
                || normalized.as_deref().is_some_and(|n| n.contains(&token));
            if hit {
                findings.push(Finding::new(
                    "context.identifier",
                    format!("Contains personal information '{token}'"),
                    Category::Context,
                    Severity::High,
                ));
            }
        }
    }

    findings
}

/// Normalizes an identifier and decomposes it into sub-tokens: the whole
/// identifier, email local-part/domain components, and separator-split
/// fragments. Tokens shorter than three runes are discarded.
fn decompose(identifier: &str) -> Vec<String> {
    let norm = identifier.trim().to_lowercase();
    if norm.is_empty() {
        return Vec::new();
    }

    let mut tokens: Vec<String> = Vec::new();
    let mut push = |t: &str| {
        if t.chars().count() >= MIN_TOKEN_LEN && !tokens.iter().any(|have| have == t) {
            tokens.push(t.to_string());
        }
    };

    push(&norm);

    if let Some((local, domain)) = norm.split_once('@') {
        push(local);
        push(domain);
    }

    for fragment in norm.split(SEPARATORS) {
        push(fragment);
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find(lower: &str, identifiers: &[String]) -> Vec<Finding> {
        let opts = ContextOptions {
            identifiers,
            ..ContextOptions::default()
        };
        check_context(lower, &opts)
    }

    fn owned(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_username_in_password() {
        let findings = find("janedoe2024!", &owned(&["JaneDoe"]));
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("'janedoe'"));
    }

    #[test]
    fn test_email_decomposition() {
        let findings = find("xx-example-xx", &owned(&["jane.doe@example.com"]));
        assert!(findings.iter().any(|f| f.message.contains("'example'")));
    }

    #[test]
    fn test_email_local_part_fragment() {
        let findings = find("doe4ever", &owned(&["jane.doe@example.com"]));
        assert!(findings.iter().any(|f| f.message.contains("'doe'")));
    }

    #[test]
    fn test_short_tokens_discarded() {
        // "jd" is below the minimum token length
        let findings = find("jdjdjdjd", &owned(&["jd@example.com"]));
        assert!(!findings.iter().any(|f| f.message.contains("'jd'")));
    }

    #[test]
    fn test_leet_normalized_hit() {
        let findings = find("j4ned0e!", &owned(&["janedoe"]));
        assert_eq!(findings.len(), 1);
    }

    #[test]
    fn test_dedup_across_identifiers() {
        let findings = find(
            "acme-corp-1",
            &owned(&["bob@acme.com", "Acme Corp"]),
        );
        let acme = findings
            .iter()
            .filter(|f| f.message.contains("'acme'"))
            .count();
        assert_eq!(acme, 1);
    }

    #[test]
    fn test_no_identifiers() {
        assert!(find("anything", &[]).is_empty());
    }

    #[test]
    fn test_identifier_not_present() {
        let findings = find("xk9vmq2rt7", &owned(&["janedoe"]));
        assert!(findings.is_empty());
    }

    #[test]
    fn test_whitespace_identifier_trimmed() {
        let findings = find("acmeville", &owned(&["  acme  "]));
        assert_eq!(findings.len(), 1);
    }
}
