//! Property-based tests for target parsing, suggestions and type
//! description.
//!
//! These tests use proptest to verify invariants hold across
//! randomly generated inputs.

use proptest::prelude::*;

use dotinspect::core::types::Target;
use dotinspect::metadata::{fixture, MetadataBundle};
use dotinspect::resolve::fuzzy::{find_closest, levenshtein, MAX_DISTANCE, MAX_SUGGESTIONS};
use dotinspect::resolve::{parse_target, ResolveError};

/// Strategy for one non-empty, dot-free name segment.
fn segment() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9_]{0,15}"
}

/// Strategy for short lowercase-ish identifiers used as candidates.
fn candidate() -> impl Strategy<Value = String> {
    "[A-Za-z]{1,10}"
}

fn bundle() -> MetadataBundle {
    MetadataBundle::from_bytes(fixture::encoded()).unwrap()
}

proptest! {
    #[test]
    fn two_segments_parse(pallet in segment(), item in segment()) {
        let input = format!("{}.{}", pallet, item);
        let target = parse_target(&input).unwrap();
        prop_assert_eq!(&target.pallet, &pallet);
        prop_assert_eq!(&target.item, &item);
        prop_assert_eq!(target.to_string(), input);
    }

    #[test]
    fn wrong_segment_count_rejected(parts in prop::collection::vec(segment(), 0..6)) {
        prop_assume!(parts.len() != 2);
        let input = parts.join(".");
        let result = parse_target(&input);
        prop_assert!(matches!(result, Err(ResolveError::InvalidTarget(_))));
    }

    #[test]
    fn empty_segment_rejected(name in segment(), leading in any::<bool>()) {
        let input = if leading { format!(".{}", name) } else { format!("{}.", name) };
        prop_assert!(Target::parse(&input).is_err());
    }

    #[test]
    fn levenshtein_is_a_metric(a in candidate(), b in candidate(), c in candidate()) {
        prop_assert_eq!(levenshtein(&a, &a), 0);
        prop_assert_eq!(levenshtein(&a, &b), levenshtein(&b, &a));
        prop_assert!(levenshtein(&a, &c) <= levenshtein(&a, &b) + levenshtein(&b, &c));
        prop_assert!(levenshtein(&a, &b) <= a.chars().count().max(b.chars().count()));
    }

    #[test]
    fn suggestions_are_close_and_ordered(
        input in candidate(),
        candidates in prop::collection::vec(candidate(), 0..12),
    ) {
        let refs: Vec<&str> = candidates.iter().map(String::as_str).collect();
        let found = find_closest(&input, &refs);
        let lower = input.to_lowercase();

        prop_assert!(found.len() <= MAX_SUGGESTIONS);
        let distances: Vec<usize> = found
            .iter()
            .map(|c| levenshtein(&lower, &c.to_lowercase()))
            .collect();
        prop_assert!(distances.iter().all(|d| *d <= MAX_DISTANCE));
        prop_assert!(distances.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn equal_distance_keeps_candidate_order(prefix in "[a-z]{3,6}") {
        // Both candidates are one substitution away from the input.
        let first = format!("{}x", prefix);
        let second = format!("{}y", prefix);
        let input = format!("{}z", prefix);
        let found = find_closest(&input, &[first.as_str(), second.as_str()]);
        prop_assert_eq!(found, vec![first.as_str(), second.as_str()]);
    }

    #[test]
    fn describe_is_total(id in any::<u32>()) {
        let metadata = bundle();
        let rendered = metadata.describe_type(id);
        prop_assert!(!rendered.is_empty());
        if id as usize >= metadata.types().len() {
            prop_assert_eq!(rendered, format!("type({})", id));
        }
    }

    #[test]
    fn describe_is_deterministic(id in 0u32..64) {
        let first = bundle();
        let second = bundle();
        prop_assert_eq!(first.describe_type(id), first.describe_type(id));
        prop_assert_eq!(first.describe_type(id), second.describe_type(id));
    }

    #[test]
    fn pallet_lookup_ignores_case(flips in prop::collection::vec(any::<bool>(), 8)) {
        let metadata = bundle();
        let name: String = "Balances"
            .chars()
            .zip(flips)
            .map(|(c, upper)| if upper { c.to_ascii_uppercase() } else { c.to_ascii_lowercase() })
            .collect();
        let found = metadata.find_pallet(&name).map(|p| p.name.as_str());
        prop_assert_eq!(found, Some("Balances"));
    }
}
