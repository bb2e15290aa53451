//! Nearest-known-word correction.
//!
//! Generates single- and double-edit variants (deletions, transpositions,
//! replacements, insertions over `a-z`) and picks the most frequent known
//! match.

use std::collections::{HashMap, HashSet};

const ALPHABET: std::ops::RangeInclusive<char> = 'a'..='z';

/// Suggests a correction for `word` from `known_words`.
///
/// An exact match wins outright. Otherwise known words at edit distance 1
/// are considered, then distance 2. Among the candidates the most frequent
/// corpus word is chosen, ties broken by lexicographic order. If no
/// reasonably close correction exists, `word` is returned unchanged.
pub fn correct_word<I, S>(word: &str, known_words: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut counts: HashMap<String, usize> = HashMap::new();
    for known in known_words {
        *counts.entry(known.as_ref().to_string()).or_insert(0) += 1;
    }

    if counts.contains_key(word) {
        return word.to_string();
    }

    let single_edits = edits1(word);
    if let Some(best) = best_known(single_edits.iter(), &counts) {
        return best;
    }

    let double_edits: HashSet<String> = single_edits
        .iter()
        .flat_map(|edit| edits1(edit))
        .filter(|candidate| counts.contains_key(candidate))
        .collect();
    if let Some(best) = best_known(double_edits.iter(), &counts) {
        return best;
    }

    word.to_string()
}

/// All strings one edit away from `word`.
fn edits1(word: &str) -> HashSet<String> {
    let chars: Vec<char> = word.chars().collect();
    let mut edits = HashSet::new();

    for i in 0..=chars.len() {
        if i < chars.len() {
            // Deletion
            let mut deleted = chars.clone();
            deleted.remove(i);
            edits.insert(deleted.into_iter().collect());
        }
        if i + 1 < chars.len() {
            // Transposition
            let mut transposed = chars.clone();
            transposed.swap(i, i + 1);
            edits.insert(transposed.into_iter().collect());
        }
        for c in ALPHABET {
            if i < chars.len() {
                // Replacement
                let mut replaced = chars.clone();
                replaced[i] = c;
                edits.insert(replaced.into_iter().collect());
            }
            // Insertion
            let mut inserted = chars.clone();
            inserted.insert(i, c);
            edits.insert(inserted.into_iter().collect());
        }
    }

    edits
}

/// Picks the known candidate with the highest corpus frequency, breaking
/// ties lexicographically.
fn best_known<'a>(
    candidates: impl Iterator<Item = &'a String>,
    counts: &HashMap<String, usize>,
) -> Option<String> {
    candidates
        .filter(|candidate| counts.contains_key(*candidate))
        .max_by(|a, b| {
            counts[*a]
                .cmp(&counts[*b])
                .then_with(|| b.cmp(a))
        })
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_exact_match_returned_unchanged() {
        assert_eq!(correct_word("upload", ["upload", "download"]), "upload");
    }

    #[test]
    fn test_single_edit_correction() {
        assert_eq!(correct_word("uplaod", ["upload", "download"]), "upload");
    }

    #[test]
    fn test_double_edit_correction() {
        // Two insertions away from "upload".
        assert_eq!(correct_word("uplo", ["upload", "download"]), "upload");
    }

    #[test]
    fn test_no_close_match_returns_input() {
        assert_eq!(correct_word("zzzzzzzz", ["upload", "download"]), "zzzzzzzz");
    }

    #[test]
    fn test_most_frequent_candidate_wins() {
        // "cat" and "car" are both one edit from "cax"; "car" appears more
        // often in the corpus.
        let corpus = ["cat", "car", "car", "car"];
        assert_eq!(correct_word("cax", corpus), "car");
    }

    #[test]
    fn test_single_edit_preferred_over_double() {
        // "describe" is one edit away, "described" two; frequency does not
        // override edit distance.
        let corpus = ["describe", "described", "described"];
        assert_eq!(correct_word("describ", corpus), "describe");
    }

    #[test]
    fn test_tie_broken_lexicographically() {
        let corpus = ["bat", "cat"];
        assert_eq!(correct_word("aat", corpus), "bat");
    }

    #[test]
    fn test_empty_corpus() {
        let corpus: [&str; 0] = [];
        assert_eq!(correct_word("anything", corpus), "anything");
    }
}
