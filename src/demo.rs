//! Walks every algorithm through its classic test cases and prints results.
//!
//! Errors are reported per case and the run moves on. `RUST_LOG=debug`
//! shows the recursive search steps of the verbose case.

use serde_json::{json, Value};
use sort_search::{
    binary_search_iterative, binary_search_recursive, linear_search, BubbleSort, Comparator,
    InsertionSort, JsonKey, JsonScalar, MergeSort, QuickSort, RecursiveSearch, ReturnMode,
    SearchConfig, SelectionSort, Sorter, TimSort,
};

fn show<T: std::fmt::Debug>(label: &str, result: sort_search::Result<T>) {
    match result {
        Ok(value) => println!("  {label} -> {value:?}"),
        Err(e) => println!("  {label} -> error: {e}"),
    }
}

fn run_sorter<S: Sorter>(sorter: &S) {
    println!("{}:", sorter.name());

    let cases: Vec<(Vec<i32>, bool)> = vec![
        (vec![64, 34, 25, 12, 22, 11, 90], false),
        (vec![1, 2, 3, 4, 5], false),
        (vec![5, 4, 3, 2, 1], true),
        (vec![], false),
        (vec![1], false),
        (vec![1, 2, 3, 10, 9, 8, 7], false),
    ];
    for (input, reverse) in cases {
        let mut data = input.clone();
        let cmp = Comparator::natural().reverse(reverse);
        let label = format!("{input:?} reverse={reverse}");
        show(&label, sorter.sort_by(&mut data, &cmp).map(|sorted| sorted.to_vec()));
    }

    let mut records = vec![json!({"val": 3}), json!({"val": 1}), json!({"val": 2})];
    show(
        "[{val: 3}, {val: 1}, {val: 2}] key=val",
        JsonKey::field("val").and_then(|key| {
            sorter
                .sort_by(&mut records, &Comparator::by_key(key))
                .map(|sorted| sorted.to_vec())
        }),
    );

    let mut mixed = vec![json!({"val": 3}), json!({"val": "two"})];
    show(
        "[{val: 3}, {val: \"two\"}] key=val",
        JsonKey::field("val").and_then(|key| {
            sorter
                .sort_by(&mut mixed, &Comparator::by_key(key))
                .map(|sorted| sorted.to_vec())
        }),
    );
}

fn run_searches() {
    let cmp = Comparator::natural();

    println!("linear_search:");
    for (data, target) in [
        (vec![64, 34, 25, 12, 22, 11, 90], 25),
        (vec![1, 2, 3, 4, 5], 6),
        (vec![5, 4, 3, 2, 1], 3),
        (vec![], 1),
        (vec![1], 1),
    ] {
        show(&format!("{data:?} target={target}"), linear_search(&data, &target, &cmp));
    }
    let records: Vec<Value> = vec![json!({"val": 3}), json!({"val": 1}), json!({"val": 2})];
    show(
        "[{val: 3}, {val: 1}, {val: 2}] target=1 key=val",
        JsonKey::field("val").and_then(|key| {
            linear_search(&records, &JsonScalar::from(1), &Comparator::by_key(key))
        }),
    );

    println!("binary_search_iterative:");
    for (data, target) in [
        (vec![11, 12, 22, 25, 34, 64, 90], 25),
        (vec![1, 2, 3, 4, 5], 6),
        (vec![1, 2, 2, 2, 3], 2),
        (vec![], 1),
        (vec![1], 1),
        (vec![3, 1, 2], 2),
    ] {
        show(&format!("{data:?} target={target}"), binary_search_iterative(&data, &target, &cmp));
    }

    println!("binary_search_recursive:");
    for (data, target, mode) in [
        (vec![11, 12, 22, 25, 34, 64, 90], 25, ReturnMode::Leftmost),
        (vec![1, 2, 3, 4, 5], 6, ReturnMode::Leftmost),
        (vec![1, 2, 2, 2, 3], 2, ReturnMode::All),
        (vec![], 1, ReturnMode::Leftmost),
        (vec![1], 1, ReturnMode::Rightmost),
        (vec![1; 1000], 1, ReturnMode::All),
    ] {
        show(
            &format!("len={} target={target} mode={mode}", data.len()),
            binary_search_recursive(&data, &target, &cmp, mode).map(|found| {
                match found.indices().len() {
                    n if n > 8 => format!("{n} matches"),
                    _ => format!("{found:?}"),
                }
            }),
        );
    }

    let verbose = SearchConfig {
        mode: ReturnMode::Rightmost,
        verbose: true,
        ..SearchConfig::default()
    };
    show(
        "[1, 2, 2, 2, 3] target=2 mode=rightmost verbose",
        RecursiveSearch::from_config(&verbose).search(&[1, 2, 2, 2, 3], &2, &cmp),
    );
    show("mode=\"middle\"", "middle".parse::<ReturnMode>());
}

fn main() {
    env_logger::init();

    run_sorter(&BubbleSort);
    run_sorter(&InsertionSort);
    run_sorter(&SelectionSort);
    run_sorter(&MergeSort::new());
    run_sorter(&QuickSort::new());
    run_sorter(&TimSort::new());
    run_searches();
}
