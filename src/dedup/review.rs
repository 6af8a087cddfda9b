// Applying reviewed duplicate groups back onto the sentence list
use ahash::AHashMap;

use crate::dedup::types::DuplicateGroup;

/// Deduplicated sentence list after review
///
/// Walks `remaining` in order. Each sentence that anchors a group is replaced:
/// an active group contributes its (possibly reselected) original, an
/// inactive group contributes all of its members, original first. Members
/// emitted this way are resolved again, so groups from earlier pipeline
/// stages nest inside the groups of later ones.
pub fn apply_filter(remaining: &[String], groups: &[DuplicateGroup]) -> Vec<String> {
    // Latest group first: a later stage wraps the survivors of earlier ones
    let mut pending: AHashMap<&str, Vec<usize>> = AHashMap::new();
    for (index, group) in groups.iter().enumerate() {
        pending.entry(group.anchor()).or_default().push(index);
    }

    let mut output = Vec::with_capacity(remaining.len());
    let mut stack: Vec<&str> = remaining.iter().rev().map(String::as_str).collect();

    while let Some(sentence) = stack.pop() {
        let group_index = pending.get_mut(sentence).and_then(Vec::pop);
        let Some(group_index) = group_index else {
            output.push(sentence.to_string());
            continue;
        };

        let group = &groups[group_index];
        if group.active {
            stack.push(group.original.as_str());
        } else {
            stack.extend(
                std::iter::once(group.original.as_str())
                    .chain(group.duplicates.iter().map(String::as_str))
                    .rev(),
            );
        }
    }

    output
}

/// Sentences whose `keep` flag is set, order preserved
///
/// # Panics
/// Panics if `keep` and `sentences` differ in length.
pub fn apply_selection(sentences: &[String], keep: &[bool]) -> Vec<String> {
    assert_eq!(
        sentences.len(),
        keep.len(),
        "selection mask length does not match sentence count"
    );
    sentences
        .iter()
        .zip(keep)
        .filter(|(_, &keep)| keep)
        .map(|(sentence, _)| sentence.clone())
        .collect()
}
