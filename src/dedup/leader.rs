// Greedy leader assignment shared by the similarity-based strategies
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::dedup::types::{AnalysisResult, DuplicateGroup};

/// How the inner pairwise comparison loop is executed
///
/// Both modes produce identical results; `Parallel` spreads the comparisons
/// of one leader against its candidates over the rayon thread pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Execution {
    #[default]
    Sequential,
    Parallel,
}

impl Execution {
    pub fn from_parallel(parallel: bool) -> Self {
        if parallel {
            Self::Parallel
        } else {
            Self::Sequential
        }
    }
}

/// Partition sentences by first-leader-wins assignment
///
/// Sentences are visited left to right. An unclaimed sentence becomes a
/// leader and is kept in `remaining`; every later unclaimed sentence whose
/// similarity to it reaches `threshold` is claimed as its duplicate. A
/// claimed sentence is never compared against a later leader, even one it
/// would match more closely.
///
/// `similarity` receives indices into `sentences` and must be read-only.
pub(crate) fn assign_leaders<F>(
    sentences: &[String],
    threshold: f64,
    execution: Execution,
    similarity: F,
) -> AnalysisResult
where
    F: Fn(usize, usize) -> f64 + Sync,
{
    let count = sentences.len();
    let mut claimed = vec![false; count];
    let mut result = AnalysisResult::default();

    for leader in 0..count {
        if claimed[leader] {
            continue;
        }
        result.remaining.push(sentences[leader].clone());

        let candidates: Vec<usize> = (leader + 1..count).filter(|&j| !claimed[j]).collect();
        let matched: Vec<usize> = match execution {
            Execution::Sequential => candidates
                .into_iter()
                .filter(|&j| similarity(leader, j) >= threshold)
                .collect(),
            Execution::Parallel => candidates
                .into_par_iter()
                .filter(|&j| similarity(leader, j) >= threshold)
                .collect(),
        };

        if matched.is_empty() {
            continue;
        }

        let mut group = DuplicateGroup::new(sentences[leader].clone());
        for j in matched {
            claimed[j] = true;
            group.duplicates.push(sentences[j].clone());
        }
        result.groups.push(group);
    }

    result
}
