//! Core data model shared by the detectors and the scoring pipeline.

use std::fmt;

/// Detector category a finding belongs to.
///
/// Categories carry a fixed priority used when flattening a [`FindingSet`]
/// and when weighting penalties: breach > dictionary > context > pattern > rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Breach,
    Dictionary,
    Context,
    Pattern,
    Rule,
}

impl Category {
    /// All categories, highest priority first.
    pub const PRIORITY: [Category; 5] = [
        Category::Breach,
        Category::Dictionary,
        Category::Context,
        Category::Pattern,
        Category::Rule,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Breach => "breach",
            Category::Dictionary => "dictionary",
            Category::Context => "context",
            Category::Pattern => "pattern",
            Category::Rule => "rule",
        }
    }
}

/// Ordinal severity rank of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

/// A single structured result from one detector.
///
/// Immutable: produced once by a detector and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// Stable identifier, e.g. `"pattern.keyboard_walk"`.
    pub code: &'static str,
    /// Human-readable description of the weakness.
    pub message: String,
    pub category: Category,
    pub severity: Severity,
}

impl Finding {
    pub fn new(
        code: &'static str,
        message: impl Into<String>,
        category: Category,
        severity: Severity,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            category,
            severity,
        }
    }
}

/// Findings grouped by category, preserving within-category detection order.
#[derive(Debug, Clone, Default)]
pub struct FindingSet {
    breach: Vec<Finding>,
    dictionary: Vec<Finding>,
    context: Vec<Finding>,
    pattern: Vec<Finding>,
    rule: Vec<Finding>,
}

impl FindingSet {
    pub fn push(&mut self, finding: Finding) {
        self.bucket_mut(finding.category).push(finding);
    }

    pub fn extend(&mut self, findings: Vec<Finding>) {
        for finding in findings {
            self.push(finding);
        }
    }

    /// Number of findings in a single category.
    pub fn count(&self, category: Category) -> usize {
        self.bucket(category).len()
    }

    /// Findings of a single category in detection order.
    pub fn in_category(&self, category: Category) -> &[Finding] {
        self.bucket(category)
    }

    pub fn total(&self) -> usize {
        Category::PRIORITY
            .iter()
            .map(|&c| self.count(c))
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Flattens into a single list in fixed category priority order.
    pub fn flatten(&self) -> Vec<Finding> {
        let mut out = Vec::with_capacity(self.total());
        for category in Category::PRIORITY {
            out.extend_from_slice(self.bucket(category));
        }
        out
    }

    fn bucket(&self, category: Category) -> &Vec<Finding> {
        match category {
            Category::Breach => &self.breach,
            Category::Dictionary => &self.dictionary,
            Category::Context => &self.context,
            Category::Pattern => &self.pattern,
            Category::Rule => &self.rule,
        }
    }

    fn bucket_mut(&mut self, category: Category) -> &mut Vec<Finding> {
        match category {
            Category::Breach => &mut self.breach,
            Category::Dictionary => &mut self.dictionary,
            Category::Context => &mut self.context,
            Category::Pattern => &mut self.pattern,
            Category::Rule => &mut self.rule,
        }
    }
}

/// Character class composition of a password.
///
/// Whitespace and control characters belong to no class: a password made
/// only of whitespace has a pool size of zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CharsetProfile {
    pub has_upper: bool,
    pub has_lower: bool,
    pub has_digit: bool,
    pub has_symbol: bool,
    pub rune_count: usize,
}

impl CharsetProfile {
    /// Computes the profile in a single pass.
    pub fn of(password: &str) -> Self {
        let mut profile = Self::default();
        for c in password.chars() {
            profile.observe(c);
        }
        profile
    }

    /// Folds one rune into the profile.
    pub(crate) fn observe(&mut self, c: char) {
        self.rune_count += 1;
        if c.is_uppercase() {
            self.has_upper = true;
        } else if c.is_lowercase() {
            self.has_lower = true;
        } else if c.is_ascii_digit() {
            self.has_digit = true;
        } else if !c.is_whitespace() && !c.is_control() && !c.is_alphanumeric() {
            self.has_symbol = true;
        }
    }

    /// Sum of the sizes of the character classes present (26/26/10/32).
    pub fn pool_size(&self) -> u32 {
        let mut pool = 0;
        if self.has_upper {
            pool += 26;
        }
        if self.has_lower {
            pool += 26;
        }
        if self.has_digit {
            pool += 10;
        }
        if self.has_symbol {
            pool += 32;
        }
        pool
    }

    /// Number of distinct character classes present.
    pub fn class_count(&self) -> usize {
        [self.has_upper, self.has_lower, self.has_digit, self.has_symbol]
            .iter()
            .filter(|&&b| b)
            .count()
    }
}

/// Passphrase segmentation outcome, derived per call and never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassphraseInfo {
    pub is_passphrase: bool,
    /// Distinct lowercase word count.
    pub word_count: usize,
    /// Distinct lowercase words in first-seen order.
    pub words: Vec<String>,
}

/// Five-band verdict derived from the 0-100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verdict {
    VeryWeak,
    Weak,
    Okay,
    Strong,
    VeryStrong,
}

impl Verdict {
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=20 => Verdict::VeryWeak,
            21..=40 => Verdict::Weak,
            41..=60 => Verdict::Okay,
            61..=80 => Verdict::Strong,
            _ => Verdict::VeryStrong,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::VeryWeak => "Very Weak",
            Verdict::Weak => "Weak",
            Verdict::Okay => "Okay",
            Verdict::Strong => "Strong",
            Verdict::VeryStrong => "Very Strong",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Complete outcome of one analysis call.
///
/// Built fresh on every call and never mutated after construction; callers
/// needing caching layer it on top themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    /// Strength score, 0-100.
    pub score: u8,
    pub verdict: Verdict,
    /// Prioritized, deduplicated findings, capped at the configured maximum.
    pub issues: Vec<Finding>,
    /// Positive feedback messages.
    pub suggestions: Vec<String>,
    /// Estimated entropy in bits.
    pub entropy: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_all_classes() {
        let profile = CharsetProfile::of("aB3!");
        assert!(profile.has_lower);
        assert!(profile.has_upper);
        assert!(profile.has_digit);
        assert!(profile.has_symbol);
        assert_eq!(profile.rune_count, 4);
        assert_eq!(profile.class_count(), 4);
        assert_eq!(profile.pool_size(), 94);
    }

    #[test]
    fn test_profile_whitespace_is_not_a_symbol() {
        let profile = CharsetProfile::of("   ");
        assert!(!profile.has_symbol);
        assert_eq!(profile.pool_size(), 0);
        assert_eq!(profile.rune_count, 3);
    }

    #[test]
    fn test_profile_empty() {
        let profile = CharsetProfile::of("");
        assert_eq!(profile.rune_count, 0);
        assert_eq!(profile.pool_size(), 0);
    }

    #[test]
    fn test_verdict_bands() {
        assert_eq!(Verdict::from_score(0), Verdict::VeryWeak);
        assert_eq!(Verdict::from_score(20), Verdict::VeryWeak);
        assert_eq!(Verdict::from_score(21), Verdict::Weak);
        assert_eq!(Verdict::from_score(40), Verdict::Weak);
        assert_eq!(Verdict::from_score(41), Verdict::Okay);
        assert_eq!(Verdict::from_score(60), Verdict::Okay);
        assert_eq!(Verdict::from_score(61), Verdict::Strong);
        assert_eq!(Verdict::from_score(80), Verdict::Strong);
        assert_eq!(Verdict::from_score(81), Verdict::VeryStrong);
        assert_eq!(Verdict::from_score(100), Verdict::VeryStrong);
    }

    #[test]
    fn test_finding_set_flatten_order() {
        let mut set = FindingSet::default();
        set.push(Finding::new("rule.too_short", "too short", Category::Rule, Severity::Low));
        set.push(Finding::new(
            "dictionary.exact",
            "common password",
            Category::Dictionary,
            Severity::Critical,
        ));
        set.push(Finding::new(
            "pattern.sequence",
            "sequence",
            Category::Pattern,
            Severity::Medium,
        ));

        let flat = set.flatten();
        assert_eq!(flat.len(), 3);
        assert_eq!(flat[0].category, Category::Dictionary);
        assert_eq!(flat[1].category, Category::Pattern);
        assert_eq!(flat[2].category, Category::Rule);
    }

    #[test]
    fn test_finding_set_counts() {
        let mut set = FindingSet::default();
        assert!(set.is_empty());
        set.push(Finding::new("rule.a", "a", Category::Rule, Severity::Low));
        set.push(Finding::new("rule.b", "b", Category::Rule, Severity::Low));
        assert_eq!(set.count(Category::Rule), 2);
        assert_eq!(set.count(Category::Breach), 0);
        assert_eq!(set.total(), 2);
    }
}
