// Edit distance strategy: Levenshtein similarity over raw sentence text
use serde::{Deserialize, Serialize};

use crate::dedup::leader::{assign_leaders, Execution};
use crate::dedup::types::AnalysisResult;

/// Levenshtein-based near-duplicate detection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditDistanceStrategy {
    /// Minimum similarity in (0, 1] for two sentences to be duplicates
    pub threshold: f64,
    /// Compare raw text when true, lower-cased text otherwise
    pub case_sensitive: bool,
}

impl Default for EditDistanceStrategy {
    fn default() -> Self {
        Self {
            threshold: 0.8,
            case_sensitive: false,
        }
    }
}

impl EditDistanceStrategy {
    pub fn new(threshold: f64, case_sensitive: bool) -> Self {
        Self {
            threshold,
            case_sensitive,
        }
    }

    fn prepare(&self, sentence: &str) -> String {
        if self.case_sensitive {
            sentence.to_string()
        } else {
            sentence.to_lowercase()
        }
    }

    /// Normalized edit similarity between two sentences
    pub fn similarity(&self, a: &str, b: &str) -> f64 {
        normalized_similarity(&self.prepare(a), &self.prepare(b))
    }

    /// Greedy leader assignment over pairwise Levenshtein similarity
    pub fn find_duplicates(&self, sentences: &[String], execution: Execution) -> AnalysisResult {
        let prepared: Vec<String> = sentences.iter().map(|s| self.prepare(s)).collect();

        assign_leaders(sentences, self.threshold, execution, |i, j| {
            normalized_similarity(&prepared[i], &prepared[j])
        })
    }
}

/// Minimum number of single-character insertions, deletions and
/// substitutions turning `a` into `b`, counted in chars
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    strsim::levenshtein(a, b)
}

/// `1 - distance / max(len)` over chars; two empty strings are identical
pub fn normalized_similarity(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_levenshtein_distance_known_values() {
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("flaw", "lawn"), 2);
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_distance("abc", "abc"), 0);
        assert_eq!(levenshtein_distance("café", "cafe"), 1);
    }

    #[test]
    fn test_similarity_degenerate_cases() {
        let strategy = EditDistanceStrategy::default();
        assert_eq!(strategy.similarity("", ""), 1.0);
        assert_eq!(strategy.similarity("", "x"), 0.0);
        assert_eq!(normalized_similarity("", ""), 1.0);
        assert_eq!(normalized_similarity("abc", ""), 0.0);
    }

    #[test]
    fn test_similarity_case_folding() {
        assert_eq!(EditDistanceStrategy::new(0.8, false).similarity("ABC", "abc"), 1.0);
        assert_eq!(EditDistanceStrategy::new(0.8, true).similarity("ABC", "abc"), 0.0);
    }

    #[test]
    fn test_similarity_counts_characters_not_bytes() {
        let strategy = EditDistanceStrategy::default();
        // One substitution out of four characters
        let sim = strategy.similarity("café", "cafe");
        assert!((sim - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_near_duplicate_grouping() {
        let strategy = EditDistanceStrategy::new(0.8, false);
        let sentences = strings(&["The cat sat.", "The cat sit.", "A dog ran."]);

        let sim = strategy.similarity(&sentences[0], &sentences[1]);
        assert!((sim - (1.0 - 1.0 / 12.0)).abs() < 1e-12);

        let result = strategy.find_duplicates(&sentences, Execution::Sequential);
        assert_eq!(result.remaining, strings(&["The cat sat.", "A dog ran."]));
        assert_eq!(result.groups.len(), 1);
        assert_eq!(result.groups[0].original, "The cat sat.");
        assert_eq!(result.groups[0].duplicates, strings(&["The cat sit."]));
    }

    #[test]
    fn test_single_sentence() {
        let strategy = EditDistanceStrategy::default();
        let result = strategy.find_duplicates(&strings(&["only"]), Execution::Sequential);
        assert_eq!(result.remaining, strings(&["only"]));
        assert!(result.groups.is_empty());
    }
}
