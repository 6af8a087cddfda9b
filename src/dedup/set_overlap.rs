// Set overlap strategy: Jaccard similarity over word or n-gram sets
use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::dedup::leader::{assign_leaders, Execution};
use crate::dedup::tokenizer;
use crate::dedup::types::AnalysisResult;

/// Smallest supported n-gram size
pub const MIN_NGRAM_SIZE: usize = 1;
/// Largest supported n-gram size
pub const MAX_NGRAM_SIZE: usize = 5;

/// Jaccard-based near-duplicate detection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SetOverlapStrategy {
    /// Minimum similarity in (0, 1] for two sentences to be duplicates
    pub threshold: f64,
    /// Compare word sets when true, n-gram sets otherwise
    pub use_words: bool,
    /// Words per n-gram when `use_words` is false
    pub ngram_size: usize,
}

impl Default for SetOverlapStrategy {
    fn default() -> Self {
        Self {
            threshold: 0.7,
            use_words: true,
            ngram_size: 2,
        }
    }
}

impl SetOverlapStrategy {
    pub fn words(threshold: f64) -> Self {
        Self {
            threshold,
            use_words: true,
            ..Self::default()
        }
    }

    pub fn ngrams(threshold: f64, ngram_size: usize) -> Self {
        Self {
            threshold,
            use_words: false,
            ngram_size,
        }
    }

    /// Comparison set for one sentence
    pub fn token_set(&self, sentence: &str) -> AHashSet<String> {
        if self.use_words {
            tokenizer::tokenize(sentence).into_iter().collect()
        } else {
            ngram_set(sentence, self.ngram_size.clamp(MIN_NGRAM_SIZE, MAX_NGRAM_SIZE))
        }
    }

    pub fn similarity(&self, a: &str, b: &str) -> f64 {
        jaccard_similarity(&self.token_set(a), &self.token_set(b))
    }

    /// Greedy leader assignment over precomputed token sets
    pub fn find_duplicates(&self, sentences: &[String], execution: Execution) -> AnalysisResult {
        let sets: Vec<AHashSet<String>> = sentences.iter().map(|s| self.token_set(s)).collect();

        assign_leaders(sentences, self.threshold, execution, |i, j| {
            jaccard_similarity(&sets[i], &sets[j])
        })
    }
}

/// Space-joined runs of `n` distinct words, in first-occurrence order
///
/// Falls back to the plain word set when the sentence has fewer than `n`
/// distinct words.
pub fn ngram_set(sentence: &str, n: usize) -> AHashSet<String> {
    let words = tokenizer::unique_tokens(sentence);
    if words.len() < n {
        return words.into_iter().collect();
    }
    words.windows(n).map(|window| window.join(" ")).collect()
}

/// |A ∩ B| / |A ∪ B|
///
/// Two empty sets are identical; an empty set shares nothing with a
/// non-empty one.
pub fn jaccard_similarity(a: &AHashSet<String>, b: &AHashSet<String>) -> f64 {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => return 1.0,
        (true, false) | (false, true) => return 0.0,
        _ => {}
    }

    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let intersection = small.iter().filter(|item| large.contains(*item)).count();
    let union = a.len() + b.len() - intersection;

    intersection as f64 / union as f64
}
