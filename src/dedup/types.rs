// Shared types for the duplicate detection engine
use serde::{Deserialize, Serialize};

/// A set of sentences judged to be duplicates of one another
///
/// `original` is always one of the input sentences and is never repeated in
/// `duplicates`. Duplicates are kept in the order they were matched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicateGroup {
    /// Sentence the group is anchored to (kept when the filter is applied)
    pub original: String,

    /// Matched duplicates in match order
    pub duplicates: Vec<String>,

    /// Inactive groups are ignored when the filter is applied
    pub active: bool,

    /// Position in `duplicates` of the member last promoted to original
    pub selected_original_index: Option<usize>,

    /// Text of the sentence the group was created for. This is the entry the
    /// group occupies in the remaining list, independent of later swaps.
    pub(crate) anchor: String,
}

impl DuplicateGroup {
    /// Create an active group with no duplicates yet
    pub fn new(original: impl Into<String>) -> Self {
        let original = original.into();
        Self {
            anchor: original.clone(),
            original,
            duplicates: Vec::new(),
            active: true,
            selected_original_index: None,
        }
    }

    /// Create a group with an initial list of duplicates
    pub fn with_duplicates(original: impl Into<String>, duplicates: Vec<String>) -> Self {
        let mut group = Self::new(original);
        group.duplicates = duplicates;
        group
    }

    /// All members, original first, then duplicates in match order
    pub fn sentences(&self) -> Vec<String> {
        std::iter::once(self.original.clone())
            .chain(self.duplicates.iter().cloned())
            .collect()
    }

    /// Number of members including the original
    pub fn len(&self) -> usize {
        self.duplicates.len() + 1
    }

    /// A group always holds its original
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Sentence this group replaces in the remaining list
    pub fn anchor(&self) -> &str {
        &self.anchor
    }

    /// Promote `duplicates[index]` to original
    ///
    /// The former original takes the promoted member's slot in `duplicates`.
    ///
    /// # Panics
    /// Panics if `index` does not reference an existing duplicate.
    pub fn select_original(&mut self, index: usize) {
        assert!(
            index < self.duplicates.len(),
            "selected original index {} out of range for group with {} duplicates",
            index,
            self.duplicates.len()
        );
        std::mem::swap(&mut self.original, &mut self.duplicates[index]);
        self.selected_original_index = Some(index);
    }

    /// Include or exclude the group from filtering
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

/// Output of a single strategy run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Survivors of deduplication, in input order
    pub remaining: Vec<String>,

    /// Groups found by this run
    pub groups: Vec<DuplicateGroup>,
}

impl AnalysisResult {
    /// Total number of sentences classified as duplicates
    pub fn duplicate_count(&self) -> usize {
        self.groups.iter().map(|g| g.duplicates.len()).sum()
    }
}

/// Statistics for one pipeline stage
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StageStats {
    /// Strategy display name
    pub strategy: String,
    /// Sentences handed to the strategy
    pub input: usize,
    /// Sentences the strategy kept
    pub remaining: usize,
    /// Groups the strategy created
    pub groups: usize,
    /// Sentences the strategy removed as duplicates
    pub duplicates: usize,
    /// Wall-clock time of the stage in milliseconds
    pub elapsed_ms: u64,
}

/// Statistics from a full pipeline run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineStats {
    /// Number of input sentences
    pub input_sentences: usize,
    /// Number of sentences left after the last stage
    pub remaining_sentences: usize,
    /// Per-stage breakdown in execution order
    pub stages: Vec<StageStats>,
    /// Total processing time in milliseconds
    pub processing_time_ms: u64,
}
