use dupfind::dedup::{
    levenshtein_distance, AnalysisResult, DedupPipeline, EditDistanceStrategy, Execution,
    ExactMatchStrategy, PipelineStage, SetOverlapStrategy, Strategy as DedupStrategy,
    VectorSpaceStrategy,
};
use proptest::prelude::*;

fn all_strategies() -> Vec<DedupStrategy> {
    vec![
        ExactMatchStrategy::new(false).into(),
        EditDistanceStrategy::new(0.6, false).into(),
        SetOverlapStrategy::words(0.5).into(),
        SetOverlapStrategy::ngrams(0.5, 2).into(),
        VectorSpaceStrategy::new(0.6, true).into(),
        VectorSpaceStrategy::new(0.6, false).into(),
    ]
}

/// Short sentences over a tiny alphabet so collisions actually happen
fn sentence() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(vec!["a", "b", "ab", "ba", "c"]), 0..5)
        .prop_map(|words| words.join(" "))
}

fn sentences() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(sentence(), 0..16)
}

/// Pipelines of one to four stages drawn from `all_strategies`
fn pipelines() -> impl Strategy<Value = DedupPipeline> {
    prop::collection::vec(0..all_strategies().len(), 1..5).prop_map(|picks| {
        let strategies = all_strategies();
        let stages = picks
            .into_iter()
            .map(|i| PipelineStage::new(strategies[i].clone()))
            .collect();
        DedupPipeline::with_stages(stages, Execution::Sequential)
    })
}

fn sorted(mut items: Vec<String>) -> Vec<String> {
    items.sort();
    items
}

fn is_subsequence(needle: &[String], haystack: &[String]) -> bool {
    let mut rest = haystack.iter();
    needle.iter().all(|n| rest.any(|h| h == n))
}

fn check_partition(input: &[String], result: &AnalysisResult) -> Result<(), TestCaseError> {
    let mut rebuilt = result.remaining.clone();
    for group in &result.groups {
        prop_assert!(!group.duplicates.is_empty());
        prop_assert!(result.remaining.contains(&group.original));
        rebuilt.extend(group.duplicates.iter().cloned());
    }
    prop_assert_eq!(sorted(rebuilt), sorted(input.to_vec()));
    prop_assert!(is_subsequence(&result.remaining, input));
    Ok(())
}

proptest! {
    #[test]
    fn every_strategy_partitions_input(input in sentences()) {
        for strategy in all_strategies() {
            let result = strategy.find_duplicates(&input);
            check_partition(&input, &result)?;
        }
    }

    #[test]
    fn similarity_is_symmetric_and_bounded(a in sentence(), b in sentence()) {
        for strategy in all_strategies() {
            let ab = strategy.similarity(&a, &b);
            let ba = strategy.similarity(&b, &a);
            prop_assert!((ab - ba).abs() < 1e-9, "{}: {} vs {}", strategy.name(), ab, ba);
            prop_assert!((0.0..=1.0).contains(&ab), "{}: {}", strategy.name(), ab);
        }
    }

    #[test]
    fn self_similarity_is_one(a in sentence()) {
        prop_assert_eq!(DedupStrategy::from(ExactMatchStrategy::default()).similarity(&a, &a), 1.0);
        prop_assert_eq!(DedupStrategy::from(EditDistanceStrategy::default()).similarity(&a, &a), 1.0);
        prop_assert_eq!(DedupStrategy::from(SetOverlapStrategy::default()).similarity(&a, &a), 1.0);

        // Sentences without tokens have a zero vector
        let cosine = DedupStrategy::from(VectorSpaceStrategy::new(0.75, false)).similarity(&a, &a);
        if a.trim().is_empty() {
            prop_assert_eq!(cosine, 0.0);
        } else {
            prop_assert!((cosine - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn exact_match_is_idempotent(input in sentences()) {
        let strategy = ExactMatchStrategy::new(true);
        let first = strategy.find_duplicates(&input);
        let second = strategy.find_duplicates(&first.remaining);

        prop_assert!(second.groups.is_empty());
        prop_assert_eq!(second.remaining, first.remaining);
    }

    #[test]
    fn surviving_leaders_stay_below_threshold(input in sentences()) {
        let strategy = EditDistanceStrategy::new(0.6, true);
        let result = strategy.find_duplicates(&input, Execution::Sequential);

        for (i, a) in result.remaining.iter().enumerate() {
            for b in &result.remaining[i + 1..] {
                prop_assert!(strategy.similarity(a, b) < 0.6, "{:?} / {:?}", a, b);
            }
        }
    }

    #[test]
    fn parallel_matches_sequential(input in sentences()) {
        for strategy in all_strategies() {
            let sequential = strategy.find_duplicates_with(&input, Execution::Sequential);
            let parallel = strategy.find_duplicates_with(&input, Execution::Parallel);
            prop_assert_eq!(sequential, parallel);
        }
    }

    #[test]
    fn levenshtein_degenerate_cases(a in ".{0,20}", b in ".{0,20}") {
        let (len_a, len_b) = (a.chars().count(), b.chars().count());

        prop_assert_eq!(levenshtein_distance(&a, &a), 0);
        prop_assert_eq!(levenshtein_distance(&a, ""), len_a);
        prop_assert_eq!(levenshtein_distance(&a, &b), levenshtein_distance(&b, &a));
        prop_assert!(levenshtein_distance(&a, &b) <= len_a.max(len_b));
    }

    #[test]
    fn active_groups_filter_to_remaining(pipeline in pipelines(), input in sentences()) {
        let outcome = pipeline.run(&input);
        prop_assert_eq!(outcome.filtered(), outcome.remaining.clone());
    }

    #[test]
    fn inactive_groups_restore_every_input(pipeline in pipelines(), input in sentences()) {
        let mut outcome = pipeline.run(&input);
        for group in outcome.groups_mut() {
            group.set_active(false);
        }
        prop_assert_eq!(sorted(outcome.filtered()), sorted(input));
    }

    #[test]
    fn pipeline_partitions_input(pipeline in pipelines(), input in sentences()) {
        let outcome = pipeline.run(&input);
        let mut rebuilt = outcome.remaining.clone();
        for group in &outcome.groups {
            rebuilt.extend(group.duplicates.iter().cloned());
        }
        prop_assert_eq!(sorted(rebuilt), sorted(input.clone()));
        prop_assert!(is_subsequence(&outcome.remaining, &input));
    }
}
