// Duplicate detection engine
//
// Strategies run in order, each seeing only the survivors of the ones before:
//   Exact match    - equal text, optionally case-insensitive
//   Edit distance  - Levenshtein similarity over raw text
//   Set overlap    - Jaccard similarity over word or n-gram sets
//   Vector space   - cosine similarity of TF / TF-IDF vectors

mod edit_distance;
mod exact;
mod leader;
mod review;
mod set_overlap;
mod strategy;
mod tokenizer;
mod types;
mod vector_space;

pub use edit_distance::{levenshtein_distance, normalized_similarity, EditDistanceStrategy};
pub use exact::ExactMatchStrategy;
pub use leader::Execution;
pub use review::{apply_filter, apply_selection};
pub use set_overlap::{
    jaccard_similarity, ngram_set, SetOverlapStrategy, MAX_NGRAM_SIZE, MIN_NGRAM_SIZE,
};
pub use strategy::Strategy;
pub use tokenizer::{tokenize, unique_tokens};
pub use types::{AnalysisResult, DuplicateGroup, PipelineStats, StageStats};
pub use vector_space::{
    cosine_similarity, TermVector, VectorSpace, VectorSpaceStrategy, DEFAULT_VOCABULARY_WARNING,
};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;

/// A strategy slot in the pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineStage {
    #[serde(flatten)]
    pub strategy: Strategy,

    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl PipelineStage {
    pub fn new(strategy: impl Into<Strategy>) -> Self {
        Self {
            strategy: strategy.into(),
            enabled: true,
        }
    }
}

/// Why a pipeline run ended the way it did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PipelineStatus {
    /// All enabled strategies ran
    Completed { groups_found: usize },
    /// Nothing to analyze
    NoSentences,
    /// No strategy was enabled
    NoEnabledStrategies,
}

impl PipelineStatus {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }
}

impl fmt::Display for PipelineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed { groups_found } => write!(f, "Found {} duplicate groups", groups_found),
            Self::NoSentences => write!(f, "No sentences to analyze"),
            Self::NoEnabledStrategies => write!(f, "No strategies selected"),
        }
    }
}

/// Result of a full pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineOutcome {
    /// Survivors of the last enabled strategy, in input order
    pub remaining: Vec<String>,
    /// Groups from every stage, in stage order
    pub groups: Vec<DuplicateGroup>,
    pub status: PipelineStatus,
    pub stats: PipelineStats,
}

impl PipelineOutcome {
    fn skipped(sentences: &[String], status: PipelineStatus) -> Self {
        Self {
            remaining: sentences.to_vec(),
            groups: Vec::new(),
            status,
            stats: PipelineStats {
                input_sentences: sentences.len(),
                remaining_sentences: sentences.len(),
                ..PipelineStats::default()
            },
        }
    }

    /// Deduplicated sentence list honouring group review state
    pub fn filtered(&self) -> Vec<String> {
        apply_filter(&self.remaining, &self.groups)
    }

    /// Mutable access for reviewers
    pub fn groups_mut(&mut self) -> &mut [DuplicateGroup] {
        &mut self.groups
    }
}

/// Ordered chain of strategies
///
/// Each enabled stage receives the previous stage's `remaining` list; a
/// sentence removed as a duplicate is invisible to every later stage.
#[derive(Debug, Clone, Default)]
pub struct DedupPipeline {
    stages: Vec<PipelineStage>,
    execution: Execution,
}

impl DedupPipeline {
    /// Create an empty pipeline
    pub fn new(execution: Execution) -> Self {
        Self {
            stages: Vec::new(),
            execution,
        }
    }

    /// Create a pipeline from existing stages
    pub fn with_stages(stages: Vec<PipelineStage>, execution: Execution) -> Self {
        Self { stages, execution }
    }

    /// Append an enabled stage
    pub fn push(&mut self, strategy: impl Into<Strategy>) -> &mut Self {
        self.stages.push(PipelineStage::new(strategy));
        self
    }

    pub fn stages(&self) -> &[PipelineStage] {
        &self.stages
    }

    pub fn stages_mut(&mut self) -> &mut Vec<PipelineStage> {
        &mut self.stages
    }

    /// Enable or disable the stage at `index`
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    pub fn set_enabled(&mut self, index: usize, enabled: bool) {
        self.stages[index].enabled = enabled;
    }

    pub fn enabled_count(&self) -> usize {
        self.stages.iter().filter(|s| s.enabled).count()
    }

    pub fn execution(&self) -> Execution {
        self.execution
    }

    pub fn set_execution(&mut self, execution: Execution) {
        self.execution = execution;
    }

    /// Run every enabled stage in order
    ///
    /// An empty sentence list or a pipeline with nothing enabled returns the
    /// input unchanged with an explanatory status.
    pub fn run(&self, sentences: &[String]) -> PipelineOutcome {
        if sentences.is_empty() {
            tracing::info!("{}", PipelineStatus::NoSentences);
            return PipelineOutcome::skipped(sentences, PipelineStatus::NoSentences);
        }
        if self.enabled_count() == 0 {
            tracing::info!("{}", PipelineStatus::NoEnabledStrategies);
            return PipelineOutcome::skipped(sentences, PipelineStatus::NoEnabledStrategies);
        }

        let start = Instant::now();
        let mut remaining = sentences.to_vec();
        let mut groups: Vec<DuplicateGroup> = Vec::new();
        let mut stages = Vec::with_capacity(self.enabled_count());

        for stage in self.stages.iter().filter(|s| s.enabled) {
            let stage_start = Instant::now();
            let input = remaining.len();

            let result = stage
                .strategy
                .find_duplicates_with(&remaining, self.execution);

            let stats = StageStats {
                strategy: stage.strategy.name().to_string(),
                input,
                remaining: result.remaining.len(),
                groups: result.groups.len(),
                duplicates: result.duplicate_count(),
                elapsed_ms: stage_start.elapsed().as_millis() as u64,
            };
            tracing::debug!(
                "{}: {} -> {} sentences, {} groups ({}ms)",
                stats.strategy,
                stats.input,
                stats.remaining,
                stats.groups,
                stats.elapsed_ms
            );

            remaining = result.remaining;
            groups.extend(result.groups);
            stages.push(stats);
        }

        let status = PipelineStatus::Completed {
            groups_found: groups.len(),
        };
        tracing::info!("{}", status);

        PipelineOutcome {
            stats: PipelineStats {
                input_sentences: sentences.len(),
                remaining_sentences: remaining.len(),
                stages,
                processing_time_ms: start.elapsed().as_millis() as u64,
            },
            remaining,
            groups,
            status,
        }
    }
}
