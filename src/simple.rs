//! Quadratic in-place sorts: bubble, insertion, selection.

use crate::error::Result;
use crate::key::{Comparator, Key};
use crate::Sorter;
use std::cmp::Ordering;
use std::fmt::Debug;

/// Adjacent-swap passes with early exit once a pass makes no swap.
///
/// Stable. O(n) on input already in order, O(n²) otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct BubbleSort;

impl Sorter for BubbleSort {
    fn name(&self) -> &'static str {
        "bubble_sort"
    }

    fn is_stable(&self) -> bool {
        true
    }

    fn sort_by<'a, T, K>(&self, data: &'a mut [T], cmp: &Comparator<K>) -> Result<&'a mut [T]>
    where
        T: Clone + Debug,
        K: Key<T>,
    {
        let n = data.len();
        let mut passes = 0;
        for i in 0..n {
            let mut swapped = false;
            for j in 0..n - 1 - i {
                if cmp.compare(&data[j], &data[j + 1])? == Ordering::Greater {
                    data.swap(j, j + 1);
                    swapped = true;
                }
            }
            passes += 1;
            if !swapped {
                break;
            }
        }
        log::trace!("bubble_sort: {} elements in {} passes", n, passes);
        Ok(data)
    }
}

/// Grows a sorted prefix, shifting elements that belong after the current
/// one rightward and dropping it into the opened slot.
///
/// Stable. O(n) on sorted input.
#[derive(Debug, Clone, Copy, Default)]
pub struct InsertionSort;

impl Sorter for InsertionSort {
    fn name(&self) -> &'static str {
        "insertion_sort"
    }

    fn is_stable(&self) -> bool {
        true
    }

    fn sort_by<'a, T, K>(&self, data: &'a mut [T], cmp: &Comparator<K>) -> Result<&'a mut [T]>
    where
        T: Clone + Debug,
        K: Key<T>,
    {
        insertion_sort_slice(data, cmp)?;
        Ok(data)
    }
}

/// Insertion sort over a whole slice; also sorts the fixed runs of Tim sort.
pub(crate) fn insertion_sort_slice<T, K>(data: &mut [T], cmp: &Comparator<K>) -> Result<()>
where
    T: Debug,
    K: Key<T>,
{
    for i in 1..data.len() {
        let mut slot = i;
        while slot > 0 && cmp.compare(&data[slot - 1], &data[i])? == Ordering::Greater {
            slot -= 1;
        }
        if slot != i {
            data[slot..=i].rotate_right(1);
        }
    }
    Ok(())
}

/// Swaps the extreme of the unsorted suffix into place each round.
///
/// Not stable: the long-distance swap can carry an element past an equal
/// one. Always n(n-1)/2 comparisons whatever the input order.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionSort;

impl Sorter for SelectionSort {
    fn name(&self) -> &'static str {
        "selection_sort"
    }

    fn is_stable(&self) -> bool {
        false
    }

    fn sort_by<'a, T, K>(&self, data: &'a mut [T], cmp: &Comparator<K>) -> Result<&'a mut [T]>
    where
        T: Clone + Debug,
        K: Key<T>,
    {
        let n = data.len();
        for i in 0..n {
            let mut best = i;
            for j in i + 1..n {
                if cmp.compare(&data[j], &data[best])? == Ordering::Less {
                    best = j;
                }
            }
            if best != i {
                data.swap(i, best);
            }
        }
        Ok(data)
    }
}

pub fn bubble_sort<'a, T, K>(data: &'a mut [T], cmp: &Comparator<K>) -> Result<&'a mut [T]>
where
    T: Clone + Debug,
    K: Key<T>,
{
    BubbleSort.sort_by(data, cmp)
}

pub fn insertion_sort<'a, T, K>(data: &'a mut [T], cmp: &Comparator<K>) -> Result<&'a mut [T]>
where
    T: Clone + Debug,
    K: Key<T>,
{
    InsertionSort.sort_by(data, cmp)
}

pub fn selection_sort<'a, T, K>(data: &'a mut [T], cmp: &Comparator<K>) -> Result<&'a mut [T]>
where
    T: Clone + Debug,
    K: Key<T>,
{
    SelectionSort.sort_by(data, cmp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::cell::Cell;

    #[test]
    fn test_bubble_descending_already_ordered_is_one_pass() {
        let calls = Cell::new(0);
        let cmp = Comparator::by_key(|x: &i32| {
            calls.set(calls.get() + 1);
            *x
        })
        .reverse(true);
        let mut data = vec![5, 4, 3, 2, 1];
        bubble_sort(&mut data, &cmp).unwrap();
        assert_eq!(data, vec![5, 4, 3, 2, 1]);
        // One pass of four comparisons, two key extractions each.
        assert_eq!(calls.get(), 8);
    }

    #[test]
    fn test_insertion_best_case_is_linear() {
        let calls = Cell::new(0);
        let cmp = Comparator::by_key(|x: &u32| {
            calls.set(calls.get() + 1);
            *x
        });
        let mut data: Vec<u32> = (0..100).collect();
        insertion_sort(&mut data, &cmp).unwrap();
        assert_eq!(calls.get(), 2 * 99);
    }

    #[test]
    fn test_selection_always_quadratic() {
        let calls = Cell::new(0);
        let cmp = Comparator::by_key(|x: &u32| {
            calls.set(calls.get() + 1);
            *x
        });
        let mut data: Vec<u32> = (0..20).collect();
        selection_sort(&mut data, &cmp).unwrap();
        assert_eq!(calls.get(), 2 * (20 * 19 / 2));
    }

    #[test]
    fn test_selection_is_not_stable() {
        // (key, tag): the first swap moves (2, 'a') behind (2, 'b').
        let cmp = Comparator::by_key(|p: &(u8, char)| p.0);
        let mut data: Vec<(u8, char)> = vec![(2, 'a'), (2, 'b'), (1, 'c')];
        selection_sort(&mut data, &cmp).unwrap();
        assert_eq!(data, vec![(1, 'c'), (2, 'b'), (2, 'a')]);
    }

    #[test]
    fn test_returns_same_slice_for_chaining() {
        let mut data = vec![3, 1, 2];
        let sorted = insertion_sort(&mut data, &Comparator::natural()).unwrap();
        sorted.reverse();
        assert_eq!(data, vec![3, 2, 1]);
    }

    #[test]
    fn test_comparison_error_names_pair() {
        let mut data = vec![1.0, f64::NAN, 0.5];
        let err = bubble_sort(&mut data, &Comparator::natural()).unwrap_err();
        match err {
            Error::Comparison { left, right, .. } => {
                assert_eq!((left.as_str(), right.as_str()), ("1.0", "NaN"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
