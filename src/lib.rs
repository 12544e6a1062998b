//! Sorting and Searching Algorithms
//!
//! Classic comparison sorts and searches over slices, all driven by a shared
//! [`Comparator`]: an optional key function plus an ascending/descending flag.
//!
//! | Algorithm | Stable | Best | Worst |
//! |---|---|---|---|
//! | [`BubbleSort`] | yes | O(n) | O(n²) |
//! | [`InsertionSort`] | yes | O(n) | O(n²) |
//! | [`SelectionSort`] | no | O(n²) | O(n²) |
//! | [`MergeSort`] | yes | O(n log n) | O(n log n) |
//! | [`QuickSort`] | no | O(n log n) | O(n²) |
//! | [`TimSort`] (simplified) | yes | O(n log n) | O(n log n) |
//!
//! Searches: [`linear_search`], [`binary_search_iterative`] and
//! [`binary_search_recursive`] / [`RecursiveSearch`].

pub mod config;
pub mod error;
pub mod key;
pub mod merge;
pub mod quick;
pub mod search;
pub mod simple;
pub mod tim;
pub mod validate;

pub use config::{SearchConfig, SortConfig, Strategy};
pub use error::{Error, Result};
pub use key::{
    try_key, Comparator, Identity, JsonKey, JsonScalar, Key, KeyFailure, Order, TryKey,
};
pub use merge::{merge_sort, MergeSort};
pub use quick::{quick_sort, QuickSort};
pub use search::{
    binary_search_iterative, binary_search_recursive, linear_search, LogObserver, RecursiveSearch,
    ReturnMode, SearchObserver, SearchOutcome, SearchStep,
};
pub use simple::{
    bubble_sort, insertion_sort, selection_sort, BubbleSort, InsertionSort, SelectionSort,
};
pub use tim::{tim_sort, TimSort};

use std::fmt::Debug;

/// Trait for sorting implementations
pub trait Sorter {
    fn name(&self) -> &'static str;

    /// Whether equal-keyed elements keep their input order.
    fn is_stable(&self) -> bool;

    /// Sort in place under `cmp`, returning the same slice.
    ///
    /// On error the slice is still a permutation of the input, but its
    /// order is unspecified.
    fn sort_by<'a, T, K>(&self, data: &'a mut [T], cmp: &Comparator<K>) -> Result<&'a mut [T]>
    where
        T: Clone + Debug,
        K: Key<T>;

    /// Ascending, comparing elements directly.
    fn sort<'a, T>(&self, data: &'a mut [T]) -> Result<&'a mut [T]>
    where
        T: Clone + Debug + PartialOrd,
    {
        self.sort_by(data, &Comparator::natural())
    }
}

/// Ascending check for directly comparable data.
pub fn is_sorted<T: PartialOrd>(data: &[T]) -> bool {
    data.windows(2).all(|w| w[0] <= w[1])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_xoshiro::Xoshiro256PlusPlus;
    use serde_json::json;

    /// Element whose identity (`id`) is invisible to the key.
    #[derive(Debug, Clone, PartialEq)]
    struct Tagged {
        key: i32,
        id: usize,
    }

    fn tagged(keys: &[i32]) -> Vec<Tagged> {
        keys.iter()
            .enumerate()
            .map(|(id, &key)| Tagged { key, id })
            .collect()
    }

    fn is_permutation(before: &[Tagged], after: &[Tagged]) -> bool {
        let mut ids: Vec<usize> = after.iter().map(|t| t.id).collect();
        ids.sort();
        ids == (0..before.len()).collect::<Vec<_>>()
            && after.iter().all(|t| before[t.id] == *t)
    }

    fn test_sorter<S: Sorter>(sorter: &S) {
        let cmp = Comparator::natural();

        // Empty
        let mut empty: Vec<i32> = vec![];
        assert!(sorter.sort(&mut empty).unwrap().is_empty());

        // Single element
        let mut single = vec![42];
        sorter.sort(&mut single).unwrap();
        assert_eq!(single, vec![42]);

        // Two elements
        let mut two = vec![5, 3];
        sorter.sort(&mut two).unwrap();
        assert_eq!(two, vec![3, 5]);

        // Already sorted
        let mut sorted: Vec<i32> = (0..100).collect();
        sorter.sort_by(&mut sorted, &cmp).unwrap();
        assert!(is_sorted(&sorted));

        // Reverse sorted
        let mut reverse: Vec<i32> = (0..100).rev().collect();
        sorter.sort_by(&mut reverse, &cmp).unwrap();
        assert_eq!(reverse, (0..100).collect::<Vec<_>>());

        // Classic case, both directions
        let mut classic = vec![64, 34, 25, 12, 22, 11, 90];
        sorter.sort(&mut classic).unwrap();
        assert_eq!(classic, vec![11, 12, 22, 25, 34, 64, 90]);
        sorter.sort_by(&mut classic, &Comparator::natural().reverse(true)).unwrap();
        assert_eq!(classic, vec![90, 64, 34, 25, 22, 12, 11]);

        // All same
        let mut same = vec![7; 100];
        sorter.sort(&mut same).unwrap();
        assert!(is_sorted(&same));

        // Strings
        let mut words = vec!["pear", "apple", "fig"];
        sorter.sort(&mut words).unwrap();
        assert_eq!(words, vec!["apple", "fig", "pear"]);

        // Keyed JSON records
        let mut records = vec![json!({"val": 3}), json!({"val": 1}), json!({"val": 2})];
        let by_val = Comparator::by_key(JsonKey::field("val").unwrap());
        sorter.sort_by(&mut records, &by_val).unwrap();
        assert_eq!(records, vec![json!({"val": 1}), json!({"val": 2}), json!({"val": 3})]);

        // Random, with duplicates, both directions
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(12345);
        for size in [10, 33, 257] {
            for reverse in [false, true] {
                let keys: Vec<i32> = (0..size).map(|_| rng.gen_range(-20..20)).collect();
                let before = tagged(&keys);
                let mut after = before.clone();
                let cmp = Comparator::by_key(|t: &Tagged| t.key).reverse(reverse);
                sorter.sort_by(&mut after, &cmp).unwrap();

                assert!(is_permutation(&before, &after), "{}: not a permutation", sorter.name());
                for w in after.windows(2) {
                    assert!(!cmp.less(&w[1], &w[0]).unwrap(), "{}: out of order", sorter.name());
                }
                if sorter.is_stable() {
                    for w in after.windows(2) {
                        if w[0].key == w[1].key {
                            assert!(w[0].id < w[1].id, "{}: unstable", sorter.name());
                        }
                    }
                }
            }
        }

        // Comparison failure surfaces as an error
        let mut floats = vec![2.0, f64::NAN, 1.0];
        assert!(matches!(sorter.sort(&mut floats), Err(Error::Comparison { .. })));
    }

    fn test_idempotent<S: Sorter>(sorter: &S) {
        let keys = [1, 1, 2, 3, 3, 3, 8, 9, 9];
        let before = tagged(&keys);
        let mut after = before.clone();
        sorter.sort_by(&mut after, &Comparator::by_key(|t: &Tagged| t.key)).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_bubble() {
        test_sorter(&BubbleSort);
        test_idempotent(&BubbleSort);
    }

    #[test]
    fn test_insertion() {
        test_sorter(&InsertionSort);
        test_idempotent(&InsertionSort);
    }

    #[test]
    fn test_selection() {
        test_sorter(&SelectionSort);
    }

    #[test]
    fn test_merge() {
        test_sorter(&MergeSort::new());
        test_sorter(&MergeSort::iterative());
        test_idempotent(&MergeSort::new());
        test_idempotent(&MergeSort::iterative());
    }

    #[test]
    fn test_quick() {
        test_sorter(&QuickSort::new());
        test_sorter(&QuickSort::iterative());
    }

    #[test]
    fn test_tim() {
        test_sorter(&TimSort::new());
        test_sorter(&TimSort::with_run_length(4).unwrap());
        test_idempotent(&TimSort::new());
    }

    fn sort_large_json_integers<S: Sorter>(sorter: &S) {
        let by_val = Comparator::by_key(JsonKey::field("val").unwrap());
        let mut records = vec![
            json!({"val": 9007199254740993u64}),
            json!({"val": 9007199254740992u64}),
        ];
        sorter.sort_by(&mut records, &by_val).unwrap();
        assert_eq!(records[0], json!({"val": 9007199254740992u64}), "{}", sorter.name());

        let target = JsonScalar::from(9007199254740993i64);
        assert_eq!(linear_search(&records, &target, &by_val).unwrap(), Some(1));
        assert_eq!(binary_search_iterative(&records, &target, &by_val).unwrap(), Some(1));
    }

    #[test]
    fn test_large_json_integers_stay_distinct() {
        sort_large_json_integers(&BubbleSort);
        sort_large_json_integers(&InsertionSort);
        sort_large_json_integers(&SelectionSort);
        sort_large_json_integers(&MergeSort::new());
        sort_large_json_integers(&QuickSort::new());
        sort_large_json_integers(&TimSort::new());
    }

    #[test]
    fn test_stability_flags() {
        assert!(BubbleSort.is_stable());
        assert!(InsertionSort.is_stable());
        assert!(MergeSort::new().is_stable());
        assert!(TimSort::new().is_stable());
        assert!(!SelectionSort.is_stable());
        assert!(!QuickSort::new().is_stable());
    }

    #[test]
    fn test_search_agrees_with_linear() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(99);
        let cmp = Comparator::natural();
        for _ in 0..50 {
            let len = rng.gen_range(0..60);
            let mut data: Vec<i32> = (0..len).map(|_| rng.gen_range(0..30)).collect();
            let unsorted = data.clone();
            data.sort();
            for target in -1..31 {
                let found = binary_search_iterative(&data, &target, &cmp).unwrap();
                let first = linear_search(&data, &target, &cmp).unwrap();
                assert_eq!(found, first);
                assert_eq!(
                    linear_search(&unsorted, &target, &cmp).unwrap().is_some(),
                    found.is_some()
                );

                let all = binary_search_recursive(&data, &target, &cmp, ReturnMode::All).unwrap();
                let expected: Vec<usize> = (0..data.len()).filter(|&i| data[i] == target).collect();
                assert_eq!(all.indices(), expected);

                let right =
                    binary_search_recursive(&data, &target, &cmp, ReturnMode::Rightmost).unwrap();
                assert_eq!(right.index(), expected.last().copied());
            }
        }
    }

    #[test]
    fn test_sort_then_search_with_config() {
        let config = SortConfig::from_json(r#"{"order": "descending"}"#).unwrap();
        let mut data = vec![4, 8, 1, 8, 3];
        let cmp = config.comparator();
        MergeSort::from_config(&config).sort_by(&mut data, &cmp).unwrap();
        assert_eq!(data, vec![8, 8, 4, 3, 1]);

        let search = SearchConfig::from_json(r#"{"mode": "rightmost"}"#).unwrap();
        let found = RecursiveSearch::from_config(&search).search(&data, &8, &cmp).unwrap();
        assert_eq!(found, SearchOutcome::Index(Some(1)));
    }
}
