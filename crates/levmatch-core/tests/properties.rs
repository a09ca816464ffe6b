//! Algebraic properties of the distance engine, the bound and the matcher

use levmatch_core::{
    find_matches, levenshtein, max_similarity, score, Document, IterSource, MatchConfig,
};
use proptest::prelude::*;

fn chars(s: &str) -> Vec<char> {
    s.chars().collect()
}

fn word_config(threshold: f64) -> MatchConfig {
    MatchConfig::builder("unused")
        .field("name")
        .threshold(threshold)
        .build()
        .unwrap()
}

proptest! {
    #[test]
    fn distance_is_symmetric(a in "[a-d]{0,12}", b in "[a-d]{0,12}") {
        let (a, b) = (chars(&a), chars(&b));
        prop_assert_eq!(levenshtein(&a, &b), levenshtein(&b, &a));
    }

    #[test]
    fn distance_to_self_is_zero(a in "\\PC{0,16}") {
        let a = chars(&a);
        prop_assert_eq!(levenshtein(&a, &a), 0);
    }

    #[test]
    fn distance_obeys_triangle_inequality(
        a in "[a-c]{0,8}",
        b in "[a-c]{0,8}",
        c in "[a-c]{0,8}",
    ) {
        let (a, b, c) = (chars(&a), chars(&b), chars(&c));
        prop_assert!(levenshtein(&a, &c) <= levenshtein(&a, &b) + levenshtein(&b, &c));
    }

    #[test]
    fn distance_agrees_with_reference(a in "[a-e]{0,10}", b in "[a-e]{0,10}") {
        let (a, b) = (chars(&a), chars(&b));
        prop_assert_eq!(levenshtein(&a, &b), strsim::generic_levenshtein(&a, &b));
    }

    #[test]
    fn token_distance_agrees_with_reference(
        a in prop::collection::vec("(the|quick|brown|fox)", 0..8),
        b in prop::collection::vec("(the|quick|brown|fox)", 0..8),
    ) {
        prop_assert_eq!(levenshtein(&a, &b), strsim::generic_levenshtein(&a, &b));
    }

    #[test]
    fn bound_is_admissible(a in "[a-d]{1,12}", b in "[a-d]{1,12}") {
        let (a, b) = (chars(&a), chars(&b));
        let longest = a.len().max(b.len()) as f64;
        let similarity = 1.0 - levenshtein(&a, &b) as f64 / longest;
        prop_assert!(max_similarity(&a, &b) >= similarity);
    }

    #[test]
    fn pruned_pairs_score_zero(
        source in "[a-z]{0,10}",
        candidate in "[a-z]{0,10}",
        threshold in 0.0f64..=1.0,
    ) {
        let config = word_config(threshold);
        let bound = max_similarity(&chars(&candidate), &chars(&source));
        let scored = score(&source, &candidate, &config);
        if bound <= threshold {
            prop_assert!(scored.pruned);
            prop_assert_eq!(scored.similarity, 0.0);
            prop_assert_eq!(scored.distance, 0);
        } else {
            prop_assert!(!scored.pruned);
            prop_assert!((0.0..=1.0).contains(&scored.similarity));
        }
    }

    #[test]
    fn limit_returns_first_qualifying_in_scan_order(
        names in prop::collection::vec("[a-c]{1,6}", 0..24),
        limit in 0usize..6,
    ) {
        let records: Vec<Document> = names
            .iter()
            .map(|n| Document::new().with("name", n.as_str()))
            .collect();

        let unbounded = MatchConfig::builder("abc").field("name").threshold(0.4).build().unwrap();
        let bounded = MatchConfig::builder("abc")
            .field("name")
            .threshold(0.4)
            .limit(limit)
            .build()
            .unwrap();

        let all = find_matches(&unbounded, IterSource::new(records.clone())).unwrap();
        let first = find_matches(&bounded, IterSource::new(records)).unwrap();

        prop_assert!(first.hit_count <= limit);
        prop_assert_eq!(first.hit_count, first.results.len());
        let expected: Vec<_> = all.results.iter().take(limit).cloned().collect();
        prop_assert_eq!(first.results, expected);
    }
}
