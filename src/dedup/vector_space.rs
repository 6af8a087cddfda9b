// Vector space strategy: cosine similarity of term-frequency or TF-IDF vectors
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::dedup::leader::{assign_leaders, Execution};
use crate::dedup::tokenizer;
use crate::dedup::types::AnalysisResult;

/// Vocabulary size above which a batch is reported as expensive
pub const DEFAULT_VOCABULARY_WARNING: usize = 50_000;

/// Cosine-similarity near-duplicate detection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorSpaceStrategy {
    /// Minimum similarity in (0, 1] for two sentences to be duplicates
    pub threshold: f64,
    /// Weight terms by TF-IDF when true, raw counts otherwise
    pub use_tf_idf: bool,
    /// Log a warning when the batch vocabulary grows past this size
    pub vocabulary_warning: usize,
}

impl Default for VectorSpaceStrategy {
    fn default() -> Self {
        Self {
            threshold: 0.75,
            use_tf_idf: true,
            vocabulary_warning: DEFAULT_VOCABULARY_WARNING,
        }
    }
}

/// Sentence vector over the batch vocabulary
///
/// Only non-zero coordinates are stored, ordered by vocabulary index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermVector {
    entries: Vec<(usize, f64)>,
    norm_squared: f64,
}

impl TermVector {
    fn from_entries(mut entries: Vec<(usize, f64)>) -> Self {
        entries.sort_unstable_by_key(|(index, _)| *index);
        let norm_squared = entries.iter().map(|(_, w)| w * w).sum();
        Self {
            entries,
            norm_squared,
        }
    }

    /// Weight at a vocabulary index (0.0 when the term is absent)
    pub fn weight(&self, index: usize) -> f64 {
        self.entries
            .binary_search_by_key(&index, |(i, _)| *i)
            .map(|pos| self.entries[pos].1)
            .unwrap_or(0.0)
    }

    pub fn is_zero(&self) -> bool {
        self.norm_squared == 0.0
    }

    fn dot(&self, other: &TermVector) -> f64 {
        let (a, b) = (&self.entries, &other.entries);
        let (mut i, mut j) = (0, 0);
        let mut dot = 0.0;
        while i < a.len() && j < b.len() {
            match a[i].0.cmp(&b[j].0) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    dot += a[i].1 * b[j].1;
                    i += 1;
                    j += 1;
                }
            }
        }
        dot
    }
}

/// Term vectors for a batch plus the vocabulary they index
#[derive(Debug, Clone, Default)]
pub struct VectorSpace {
    /// Terms in first-occurrence order; position is the vector index
    pub vocabulary: Vec<String>,
    /// Inverse document frequency per vocabulary term (empty without TF-IDF)
    pub idf: Vec<f64>,
    /// One vector per input sentence
    pub vectors: Vec<TermVector>,
}

impl VectorSpaceStrategy {
    pub fn new(threshold: f64, use_tf_idf: bool) -> Self {
        Self {
            threshold,
            use_tf_idf,
            ..Self::default()
        }
    }

    /// Build the vocabulary and one vector per sentence
    ///
    /// IDF is `ln(n / (1 + df))`, which goes negative for terms present in
    /// every sentence. TF is the term count divided by the sentence length.
    pub fn vectorize(&self, sentences: &[String]) -> VectorSpace {
        let tokenized: Vec<Vec<String>> =
            sentences.iter().map(|s| tokenizer::tokenize(s)).collect();

        let mut index_of: AHashMap<String, usize> = AHashMap::new();
        let mut vocabulary: Vec<String> = Vec::new();
        let mut document_frequency: Vec<usize> = Vec::new();
        let mut counts_per_sentence: Vec<AHashMap<usize, usize>> =
            Vec::with_capacity(sentences.len());

        for tokens in &tokenized {
            let mut counts: AHashMap<usize, usize> = AHashMap::new();
            for token in tokens {
                let index = *index_of.entry(token.clone()).or_insert_with(|| {
                    vocabulary.push(token.clone());
                    document_frequency.push(0);
                    vocabulary.len() - 1
                });
                *counts.entry(index).or_insert(0) += 1;
            }
            for &index in counts.keys() {
                document_frequency[index] += 1;
            }
            counts_per_sentence.push(counts);
        }

        if vocabulary.len() > self.vocabulary_warning {
            tracing::warn!(
                "Vector space vocabulary has {} terms across {} sentences; pairwise comparison may be slow",
                vocabulary.len(),
                sentences.len()
            );
        }

        let total = sentences.len() as f64;
        let idf: Vec<f64> = if self.use_tf_idf {
            document_frequency
                .iter()
                .map(|&df| (total / (1.0 + df as f64)).ln())
                .collect()
        } else {
            Vec::new()
        };

        let vectors = tokenized
            .iter()
            .zip(counts_per_sentence)
            .map(|(tokens, counts)| {
                let length = tokens.len() as f64;
                let entries = counts
                    .into_iter()
                    .map(|(index, count)| {
                        let weight = if self.use_tf_idf {
                            count as f64 / length * idf[index]
                        } else {
                            count as f64
                        };
                        (index, weight)
                    })
                    .collect();
                TermVector::from_entries(entries)
            })
            .collect();

        VectorSpace {
            vocabulary,
            idf,
            vectors,
        }
    }

    /// Cosine similarity of two sentences vectorized as a two-sentence batch
    pub fn similarity(&self, a: &str, b: &str) -> f64 {
        let space = self.vectorize(&[a.to_string(), b.to_string()]);
        cosine_similarity(&space.vectors[0], &space.vectors[1])
    }

    /// Greedy leader assignment over pairwise cosine similarity
    pub fn find_duplicates(&self, sentences: &[String], execution: Execution) -> AnalysisResult {
        let space = self.vectorize(sentences);
        tracing::debug!(
            "Vector space: {} sentences, {} terms",
            sentences.len(),
            space.vocabulary.len()
        );

        assign_leaders(sentences, self.threshold, execution, |i, j| {
            cosine_similarity(&space.vectors[i], &space.vectors[j])
        })
    }
}

/// (u · v) / (‖u‖ ‖v‖), or 0.0 when either vector is zero
pub fn cosine_similarity(a: &TermVector, b: &TermVector) -> f64 {
    if a.is_zero() || b.is_zero() {
        return 0.0;
    }
    (a.dot(b) / (a.norm_squared * b.norm_squared).sqrt()).clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_raw_count_vectors() {
        let strategy = VectorSpaceStrategy::new(0.9, false);
        let space = strategy.vectorize(&strings(&["a a b", "a b b"]));

        assert_eq!(space.vocabulary, strings(&["a", "b"]));
        assert!(space.idf.is_empty());
        assert_eq!(space.vectors[0].weight(0), 2.0);
        assert_eq!(space.vectors[0].weight(1), 1.0);
        assert_eq!(space.vectors[1].weight(0), 1.0);
        assert_eq!(space.vectors[1].weight(1), 2.0);
    }

    #[test]
    fn test_cosine_threshold_boundaries() {
        let sentences = strings(&["a a b", "a b b"]);

        let sim = VectorSpaceStrategy::new(0.9, false).similarity(&sentences[0], &sentences[1]);
        assert!((sim - 0.8).abs() < 1e-9);

        let strict = VectorSpaceStrategy::new(0.9, false)
            .find_duplicates(&sentences, Execution::Sequential);
        assert!(strict.groups.is_empty());
        assert_eq!(strict.remaining.len(), 2);

        let loose = VectorSpaceStrategy::new(0.7, false)
            .find_duplicates(&sentences, Execution::Sequential);
        assert_eq!(loose.groups.len(), 1);
        assert_eq!(loose.remaining, strings(&["a a b"]));
    }

    #[test]
    fn test_idf_can_be_negative() {
        let strategy = VectorSpaceStrategy::new(0.5, true);
        let space = strategy.vectorize(&strings(&["common rare", "common other"]));

        // "common" is in both sentences: ln(2 / 3) < 0
        assert!((space.idf[0] - (2.0f64 / 3.0).ln()).abs() < 1e-12);
        assert!(space.idf[0] < 0.0);
        // "rare" is in one: ln(2 / 2) == 0
        assert_eq!(space.idf[1], 0.0);
        // TF is count / length: 1/2 * ln(2/3)
        assert!((space.vectors[0].weight(0) - 0.5 * (2.0f64 / 3.0).ln()).abs() < 1e-12);
    }

    #[test]
    fn test_zero_vector_similarity() {
        let strategy = VectorSpaceStrategy::new(0.5, false);
        assert_eq!(strategy.similarity("...", "hello"), 0.0);
        assert_eq!(strategy.similarity("", ""), 0.0);
    }

    #[test]
    fn test_self_similarity() {
        let strategy = VectorSpaceStrategy::new(0.5, true);
        assert_eq!(strategy.similarity("the cat sat", "the cat sat"), 1.0);
    }

    #[test]
    fn test_tf_idf_groups_shared_rare_terms() {
        let strategy = VectorSpaceStrategy::new(0.9, true);
        let sentences = strings(&[
            "apple banana cherry",
            "apple banana cherry",
            "dog elephant fox",
            "grape house igloo",
            "jungle kite lemon",
        ]);

        let result = strategy.find_duplicates(&sentences, Execution::Sequential);
        assert_eq!(result.groups.len(), 1);
        assert_eq!(result.groups[0].original, "apple banana cherry");
        assert_eq!(result.remaining.len(), 4);
    }

    #[test]
    fn test_vocabulary_first_occurrence_order() {
        let strategy = VectorSpaceStrategy::default();
        let space = strategy.vectorize(&strings(&["b a", "c a"]));
        assert_eq!(space.vocabulary, strings(&["b", "a", "c"]));
    }

    #[test]
    fn test_vocabulary_over_warning_limit_still_vectorizes() {
        let strategy = VectorSpaceStrategy {
            vocabulary_warning: 1,
            ..VectorSpaceStrategy::new(0.9, false)
        };
        let sentences = strings(&["red fox", "red fox", "blue whale"]);

        let space = strategy.vectorize(&sentences);
        assert_eq!(space.vocabulary.len(), 4);
        assert_eq!(space.vectors.len(), 3);

        let result = strategy.find_duplicates(&sentences, Execution::Sequential);
        assert_eq!(result.remaining, strings(&["red fox", "blue whale"]));
        assert_eq!(result.groups.len(), 1);
    }
}
