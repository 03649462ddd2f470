// src/equivalents/mod.rs
//! Equivalence resolver: Windows application names to Linux package candidates
//!
//! Resolution runs a fixed sequence of rules over the knowledge base in
//! [`table`], stopping at the first rule that yields candidates:
//!
//! 1. Exact match of the normalized display name against a normalized key
//! 2. Longest key contained in the name (ties merge their candidate lists)
//! 3. Every word of a key contained in the name, for multi-word keys or
//!    single words longer than [`MIN_SINGLE_WORD_LEN`] characters; the first
//!    qualifying key in table order wins
//!
//! An empty result means "no known equivalent" and is not an error.

mod table;

use std::sync::LazyLock;

/// Single-word keys must be longer than this to take part in the all-words rule
pub const MIN_SINGLE_WORD_LEN: usize = 6;

/// Markers stripped from display names before matching
const STRIPPED_MARKERS: &[&str] = &["™", "®", "(tm)", "(r)"];

/// A knowledge-base row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EquivalenceEntry {
    pub source_name: &'static str,
    pub candidates: &'static [&'static str],
}

/// Knowledge-base row with its precomputed match keys
struct IndexedEntry {
    entry: EquivalenceEntry,
    normalized: String,
    words: Vec<String>,
    char_len: usize,
}

static INDEX: LazyLock<Vec<IndexedEntry>> = LazyLock::new(|| {
    table::KNOWLEDGE_BASE
        .iter()
        .map(|&(source_name, candidates)| {
            let normalized = normalize(source_name);
            IndexedEntry {
                entry: EquivalenceEntry {
                    source_name,
                    candidates,
                },
                words: normalized.split_whitespace().map(str::to_string).collect(),
                char_len: normalized.chars().count(),
                normalized,
            }
        })
        .collect()
});

/// Normalize a display name for matching.
///
/// Lowercases, strips trademark markers and trims surrounding whitespace.
pub fn normalize(name: &str) -> String {
    let mut normalized = name.to_lowercase();
    for marker in STRIPPED_MARKERS {
        normalized = normalized.replace(marker, "");
    }
    normalized.trim().to_string()
}

/// All knowledge-base entries in table order
pub fn knowledge_base() -> impl Iterator<Item = EquivalenceEntry> {
    INDEX.iter().map(|indexed| indexed.entry)
}

/// Resolve a display name to an ordered list of Linux package candidates
pub fn resolve(display_name: &str) -> Vec<String> {
    let name = normalize(display_name);

    if let Some(found) = exact_match(&name) {
        return to_owned(found.candidates);
    }

    let longest = longest_substring_match(&name);
    if !longest.is_empty() {
        return longest;
    }

    all_words_match(&name)
        .map(|found| to_owned(found.candidates))
        .unwrap_or_default()
}

/// True if the name resolves to at least one candidate
pub fn has_equivalent(display_name: &str) -> bool {
    !resolve(display_name).is_empty()
}

fn exact_match(name: &str) -> Option<EquivalenceEntry> {
    INDEX
        .iter()
        .find(|indexed| indexed.normalized == name)
        .map(|indexed| indexed.entry)
}

fn longest_substring_match(name: &str) -> Vec<String> {
    let mut best: Vec<String> = Vec::new();
    let mut best_len = 0;

    for indexed in INDEX.iter() {
        if !name.contains(indexed.normalized.as_str()) {
            continue;
        }
        if indexed.char_len > best_len {
            best_len = indexed.char_len;
            best = to_owned(indexed.entry.candidates);
        } else if indexed.char_len == best_len {
            for candidate in indexed.entry.candidates {
                if !best.iter().any(|existing| existing == candidate) {
                    best.push((*candidate).to_string());
                }
            }
        }
    }

    best
}

fn all_words_match(name: &str) -> Option<EquivalenceEntry> {
    INDEX
        .iter()
        .filter(|indexed| indexed.words.len() > 1 || indexed.char_len > MIN_SINGLE_WORD_LEN)
        .find(|indexed| {
            !indexed.words.is_empty()
                && indexed.words.iter().all(|word| name.contains(word.as_str()))
        })
        .map(|indexed| indexed.entry)
}

fn to_owned(candidates: &[&str]) -> Vec<String> {
    candidates.iter().map(|c| (*c).to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_markers() {
        assert_eq!(normalize("  Adobe® Photoshop™ (TM) "), "adobe photoshop");
        assert_eq!(normalize("Foo(R) Bar"), "foo bar");
    }

    #[test]
    fn test_every_key_resolves_to_itself() {
        for entry in knowledge_base() {
            let expected: Vec<String> = to_owned(entry.candidates);
            assert_eq!(
                resolve(entry.source_name),
                expected,
                "key {} should resolve by exact match",
                entry.source_name
            );
        }
    }

    #[test]
    fn test_exact_match_ignores_case_and_markers() {
        assert_eq!(
            resolve("google chrome®"),
            vec!["google-chrome-stable", "chromium-browser", "brave-browser", "vivaldi"]
        );
    }

    #[test]
    fn test_longest_substring_prefers_specific_key() {
        // "Visual Studio" and "Visual Studio Code" both match; the longer wins
        assert_eq!(
            resolve("Microsoft Visual Studio Code (User)"),
            vec!["code", "vscodium", "lapce"]
        );
    }

    #[test]
    fn test_longest_substring_tie_merges_in_table_order() {
        // "Audacity" and "Inkscape" are both eight characters
        assert_eq!(
            resolve("Inkscape and Audacity Bundle"),
            vec!["audacity", "ardour", "ocenaudio", "inkscape"]
        );
    }

    #[test]
    fn test_tie_merge_removes_duplicates() {
        // "XnView MP" and "IrfanView" tie at nine characters with identical lists
        assert_eq!(
            resolve("IrfanView XnView MP Pack"),
            vec!["gwenview", "nomacs", "geeqie"]
        );
    }

    #[test]
    fn test_all_words_rule() {
        assert_eq!(
            resolve("Telegram for Desktop"),
            vec!["telegram-desktop", "kotatogram-desktop"]
        );
    }

    #[test]
    fn test_no_match() {
        assert!(resolve("Some Random Unmatched App 9000").is_empty());
        assert!(resolve("").is_empty());
        assert!(!has_equivalent("   "));
    }
}
