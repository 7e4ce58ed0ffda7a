//! Keyboard layout tables and the startup-built reverse index.
//!
//! Layouts are stored once in a read-only [`LazyLock`] index keyed by
//! starting rune, so the pattern detector resolves candidate walks in
//! O(1) per position without any global mutable state.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Physical key sequences on a US QWERTY layout: the letter rows, the
/// digit row (plain and shifted), and the slanted digit-to-bottom columns.
const LAYOUTS: &[&str] = &[
    "qwertyuiop",
    "asdfghjkl",
    "zxcvbnm",
    "1234567890",
    "!@#$%^&*()",
    "1qaz",
    "2wsx",
    "3edc",
    "4rfv",
    "5tgb",
    "6yhn",
    "7ujm",
    "8ik,",
    "9ol.",
    "0p;/",
];

pub(crate) struct LayoutIndex {
    /// Forward layouts followed by their reversed variants.
    sequences: Vec<Vec<char>>,
    /// Starting rune -> list of (sequence index, offset) to resume from.
    by_start: HashMap<char, Vec<(usize, usize)>>,
}

pub(crate) static LAYOUT_INDEX: LazyLock<LayoutIndex> = LazyLock::new(LayoutIndex::build);

impl LayoutIndex {
    fn build() -> Self {
        let mut sequences: Vec<Vec<char>> = Vec::with_capacity(LAYOUTS.len() * 2);
        for layout in LAYOUTS {
            sequences.push(layout.chars().collect());
            sequences.push(layout.chars().rev().collect());
        }

        let mut by_start: HashMap<char, Vec<(usize, usize)>> = HashMap::new();
        for (seq_idx, seq) in sequences.iter().enumerate() {
            // the last position cannot start a run longer than 1
            for (offset, &c) in seq.iter().enumerate().take(seq.len() - 1) {
                by_start.entry(c).or_default().push((seq_idx, offset));
            }
        }

        Self { sequences, by_start }
    }

    /// Length of the longest contiguous layout run starting at `start`.
    /// Returns 1 when no layout continues past the starting rune.
    pub(crate) fn longest_run(&self, chars: &[char], start: usize) -> usize {
        let Some(candidates) = self.by_start.get(&chars[start]) else {
            return 1;
        };

        let mut best = 1;
        for &(seq_idx, offset) in candidates {
            let seq = &self.sequences[seq_idx];
            let mut len = 0;
            while start + len < chars.len()
                && offset + len < seq.len()
                && chars[start + len] == seq[offset + len]
            {
                len += 1;
            }
            best = best.max(len);
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runes(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_longest_run_row() {
        let chars = runes("qwerty99");
        assert_eq!(LAYOUT_INDEX.longest_run(&chars, 0), 6);
    }

    #[test]
    fn test_longest_run_reversed_row() {
        let chars = runes("poiuy");
        assert_eq!(LAYOUT_INDEX.longest_run(&chars, 0), 5);
    }

    #[test]
    fn test_longest_run_mid_layout_offset() {
        // starts inside the home row, not at its first key
        let chars = runes("dfghj");
        assert_eq!(LAYOUT_INDEX.longest_run(&chars, 0), 5);
    }

    #[test]
    fn test_longest_run_column() {
        let chars = runes("1qaz");
        assert_eq!(LAYOUT_INDEX.longest_run(&chars, 0), 4);
    }

    #[test]
    fn test_longest_run_digits() {
        let chars = runes("1234567890");
        assert_eq!(LAYOUT_INDEX.longest_run(&chars, 0), 10);
    }

    #[test]
    fn test_no_run_for_unknown_rune() {
        let chars = runes("ñqw");
        assert_eq!(LAYOUT_INDEX.longest_run(&chars, 0), 1);
    }

    #[test]
    fn test_run_stops_at_layout_break() {
        let chars = runes("qwm");
        assert_eq!(LAYOUT_INDEX.longest_run(&chars, 0), 2);
    }
}
