// Strategy sum type dispatching to the four comparison techniques
use serde::{Deserialize, Serialize};

use crate::dedup::edit_distance::EditDistanceStrategy;
use crate::dedup::exact::ExactMatchStrategy;
use crate::dedup::leader::Execution;
use crate::dedup::set_overlap::SetOverlapStrategy;
use crate::dedup::types::AnalysisResult;
use crate::dedup::vector_space::VectorSpaceStrategy;

/// A comparison technique together with its parameters
///
/// Serialized with a `kind` tag so strategy lists can live in TOML:
///
/// ```toml
/// [[strategies]]
/// kind = "edit_distance"
/// threshold = 0.85
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Strategy {
    ExactMatch(ExactMatchStrategy),
    EditDistance(EditDistanceStrategy),
    SetOverlap(SetOverlapStrategy),
    VectorSpace(VectorSpaceStrategy),
}

impl Strategy {
    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::ExactMatch(_) => "Exact Match",
            Self::EditDistance(_) => "Levenshtein Distance",
            Self::SetOverlap(_) => "Jaccard Similarity",
            Self::VectorSpace(_) => "Cosine Similarity",
        }
    }

    /// Similarity threshold, if the strategy uses one
    pub fn threshold(&self) -> Option<f64> {
        match self {
            Self::ExactMatch(_) => None,
            Self::EditDistance(s) => Some(s.threshold),
            Self::SetOverlap(s) => Some(s.threshold),
            Self::VectorSpace(s) => Some(s.threshold),
        }
    }

    /// Pairwise similarity score in the strategy's own metric
    pub fn similarity(&self, a: &str, b: &str) -> f64 {
        match self {
            Self::ExactMatch(s) => s.similarity(a, b),
            Self::EditDistance(s) => s.similarity(a, b),
            Self::SetOverlap(s) => s.similarity(a, b),
            Self::VectorSpace(s) => s.similarity(a, b),
        }
    }

    /// Partition sentences into survivors and duplicate groups
    pub fn find_duplicates(&self, sentences: &[String]) -> AnalysisResult {
        self.find_duplicates_with(sentences, Execution::Sequential)
    }

    /// Partition sentences, choosing how pairwise comparisons are run
    ///
    /// Exact match is a linear scan and ignores `execution`.
    pub fn find_duplicates_with(&self, sentences: &[String], execution: Execution) -> AnalysisResult {
        match self {
            Self::ExactMatch(s) => s.find_duplicates(sentences),
            Self::EditDistance(s) => s.find_duplicates(sentences, execution),
            Self::SetOverlap(s) => s.find_duplicates(sentences, execution),
            Self::VectorSpace(s) => s.find_duplicates(sentences, execution),
        }
    }

    /// Every strategy with its default parameters, cheapest first
    pub fn defaults() -> Vec<Strategy> {
        vec![
            Self::ExactMatch(ExactMatchStrategy::default()),
            Self::EditDistance(EditDistanceStrategy::default()),
            Self::SetOverlap(SetOverlapStrategy::default()),
            Self::VectorSpace(VectorSpaceStrategy::default()),
        ]
    }
}

impl From<ExactMatchStrategy> for Strategy {
    fn from(s: ExactMatchStrategy) -> Self {
        Self::ExactMatch(s)
    }
}

impl From<EditDistanceStrategy> for Strategy {
    fn from(s: EditDistanceStrategy) -> Self {
        Self::EditDistance(s)
    }
}

impl From<SetOverlapStrategy> for Strategy {
    fn from(s: SetOverlapStrategy) -> Self {
        Self::SetOverlap(s)
    }
}

impl From<VectorSpaceStrategy> for Strategy {
    fn from(s: VectorSpaceStrategy) -> Self {
        Self::VectorSpace(s)
    }
}
