//! Leetspeak normalization table.
//!
//! Shared by the pattern, dictionary and context detectors to catch
//! obfuscated matches such as `p@ssw0rd`.

/// Substitution pairs: leet rune on the left, plain rune on the right.
const LEET_TABLE: &[(char, char)] = &[
    ('@', 'a'),
    ('4', 'a'),
    ('8', 'b'),
    ('(', 'c'),
    ('3', 'e'),
    ('6', 'g'),
    ('9', 'g'),
    ('1', 'i'),
    ('!', 'i'),
    ('0', 'o'),
    ('$', 's'),
    ('5', 's'),
    ('7', 't'),
    ('+', 't'),
    ('2', 'z'),
];

/// Maps a single rune through the substitution table; unknown runes pass
/// through unchanged.
pub(crate) fn normalize_char(c: char) -> char {
    LEET_TABLE
        .iter()
        .find(|&&(leet, _)| leet == c)
        .map(|&(_, plain)| plain)
        .unwrap_or(c)
}

/// Returns the leet-normalized form of `s`. Callers pass a lowercased
/// string; the result has the same rune count at the same positions.
pub(crate) fn normalize(s: &str) -> String {
    s.chars().map(normalize_char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_classic_substitutions() {
        assert_eq!(normalize("p@ssw0rd"), "password");
        assert_eq!(normalize("l3tm31n"), "letmein");
        assert_eq!(normalize("dr4g0n"), "dragon");
    }

    #[test]
    fn test_normalize_identity_without_leet() {
        assert_eq!(normalize("horsestaple"), "horsestaple");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_normalize_preserves_length() {
        let input = "s3cr3t-p@ss";
        assert_eq!(normalize(input).chars().count(), input.chars().count());
    }
}
