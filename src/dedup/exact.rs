// Exact match strategy: groups sentences that are equal, optionally ignoring case
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::hash_map::Entry;

use crate::dedup::types::{AnalysisResult, DuplicateGroup};

/// Exact equality comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExactMatchStrategy {
    /// Compare raw text when true, lower-cased text otherwise
    pub case_sensitive: bool,
}

impl Default for ExactMatchStrategy {
    fn default() -> Self {
        Self {
            case_sensitive: true,
        }
    }
}

/// First occurrence of a comparison key
struct FirstSeen {
    /// Position of the first sentence with this key
    index: usize,
    /// Group slot, created lazily on the first repeat
    group: Option<usize>,
}

impl ExactMatchStrategy {
    pub fn new(case_sensitive: bool) -> Self {
        Self { case_sensitive }
    }

    fn key<'a>(&self, sentence: &'a str) -> Cow<'a, str> {
        if self.case_sensitive {
            Cow::Borrowed(sentence)
        } else {
            Cow::Owned(sentence.to_lowercase())
        }
    }

    /// 1.0 when both sentences share a comparison key, 0.0 otherwise
    pub fn similarity(&self, a: &str, b: &str) -> f64 {
        if self.key(a) == self.key(b) {
            1.0
        } else {
            0.0
        }
    }

    /// Single left-to-right scan
    ///
    /// The first sentence with a given key survives and anchors the group;
    /// later sentences with the same key become its duplicates. Both keep
    /// their original casing. Groups are ordered by their first repeat.
    pub fn find_duplicates(&self, sentences: &[String]) -> AnalysisResult {
        let mut result = AnalysisResult::default();
        let mut seen: AHashMap<Cow<'_, str>, FirstSeen> = AHashMap::new();

        for (index, sentence) in sentences.iter().enumerate() {
            match seen.entry(self.key(sentence)) {
                Entry::Vacant(entry) => {
                    entry.insert(FirstSeen { index, group: None });
                    result.remaining.push(sentence.clone());
                }
                Entry::Occupied(mut entry) => {
                    let first = entry.get_mut();
                    let slot = match first.group {
                        Some(slot) => slot,
                        None => {
                            result
                                .groups
                                .push(DuplicateGroup::new(sentences[first.index].clone()));
                            let slot = result.groups.len() - 1;
                            first.group = Some(slot);
                            slot
                        }
                    };
                    result.groups[slot].duplicates.push(sentence.clone());
                }
            }
        }

        tracing::debug!(
            "Exact match: {} sentences, {} groups",
            sentences.len(),
            result.groups.len()
        );

        result
    }
}
