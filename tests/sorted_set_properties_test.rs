use proptest::prelude::*;
use sibyl::SortedSet;
use std::collections::BTreeSet;

/// Add (`true`) or delete (`false`) operations over a small value range.
fn operations() -> impl Strategy<Value = Vec<(bool, u8)>> {
    prop::collection::vec((any::<bool>(), 0u8..32), 0..200)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_membership_tracks_net_operations(ops in operations()) {
        let mut set = SortedSet::new();
        let mut model = BTreeSet::new();

        for (add, value) in ops {
            if add {
                prop_assert_eq!(set.add(value), model.insert(value));
            } else {
                prop_assert_eq!(set.delete(&value), model.remove(&value));
            }
            prop_assert_eq!(set.len(), model.len());
        }

        for value in 0..32u8 {
            prop_assert_eq!(set.has(&value), model.contains(&value));
        }

        let snapshot = set.to_vec();
        prop_assert!(snapshot.windows(2).all(|pair| pair[0] < pair[1]));
        prop_assert_eq!(snapshot, model.into_iter().collect::<Vec<_>>());
    }

    #[test]
    fn test_algebra_cardinality_bounds(
        contents in prop::collection::vec(prop::collection::vec(0u8..32, 0..40), 1..=4),
    ) {
        let sets: Vec<SortedSet<u8>> = contents.into_iter().map(SortedSet::from).collect();
        let refs: Vec<&SortedSet<u8>> = sets.iter().collect();

        let intersection = SortedSet::intersection(&refs).unwrap();
        let union = SortedSet::union(&refs).unwrap();

        let min = sets.iter().map(SortedSet::len).min().unwrap();
        let max = sets.iter().map(SortedSet::len).max().unwrap();
        prop_assert!(intersection.len() <= min);
        prop_assert!(union.len() >= max);

        for value in intersection.iter() {
            prop_assert!(sets.iter().all(|set| set.has(value)));
        }
        for set in &sets {
            for value in set.iter() {
                prop_assert!(union.has(value));
            }
        }
    }
}

#[test]
fn test_keyed_order_is_strictly_ascending() {
    let mut set = SortedSet::with_comparator(|word: &String| word.to_lowercase());
    for word in ["Pear", "apple", "APPLE", "fig", "pear", "Banana"] {
        set.add(word.to_string());
    }

    let keys: Vec<String> = set.iter().map(|word| set.comparator(word)).collect();
    assert_eq!(keys, vec!["apple", "banana", "fig", "pear"]);
    assert_eq!(set.to_vec(), vec!["apple", "Banana", "fig", "Pear"]);
}

#[test]
fn test_union_counts_first_set() {
    let only_in_first = SortedSet::from(vec![1, 2]);
    let rest = SortedSet::from(vec![3]);
    let union = SortedSet::union(&[&only_in_first, &rest]).unwrap();
    assert_eq!(union.to_vec(), vec![1, 2, 3]);
}
