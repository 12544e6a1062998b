//! Quicksort with a Lomuto partition around the last element.
//!
//! The last-element pivot makes already-ordered input the worst case:
//! every partition peels off one element, giving O(n²) comparisons and,
//! for the recursive strategy, O(n) stack depth. Bound the depth with
//! `max_depth` or switch to [`Strategy::Iterative`] when that matters.

use crate::config::{SortConfig, Strategy};
use crate::error::Result;
use crate::key::{Comparator, Key};
use crate::validate::DepthGuard;
use crate::Sorter;
use std::cmp::Ordering;
use std::fmt::Debug;

/// Moves every element not ordered after the pivot into a growing left
/// region, then drops the pivot at the boundary. Returns the pivot index.
fn partition<T, K>(data: &mut [T], cmp: &Comparator<K>) -> Result<usize>
where
    T: Debug,
    K: Key<T>,
{
    let high = data.len() - 1;
    let mut store = 0;
    for j in 0..high {
        if cmp.compare(&data[j], &data[high])? != Ordering::Greater {
            data.swap(store, j);
            store += 1;
        }
    }
    data.swap(store, high);
    Ok(store)
}

/// Not stable. O(n log n) on average, O(n²) on ordered or adversarial input.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuickSort {
    strategy: Strategy,
    guard: DepthGuard,
}

impl QuickSort {
    pub fn new() -> Self {
        Self::default()
    }

    /// Explicit-stack variant; always recurses into the smaller side first
    /// so the pending stack stays O(log n).
    pub fn iterative() -> Self {
        Self {
            strategy: Strategy::Iterative,
            ..Self::default()
        }
    }

    pub fn from_config(config: &SortConfig) -> Self {
        Self {
            strategy: config.strategy,
            guard: DepthGuard::new(config.max_depth),
        }
    }

    /// Only applies to the recursive strategy.
    pub fn max_depth(mut self, limit: usize) -> Self {
        self.guard = DepthGuard::new(Some(limit));
        self
    }

    fn sort_recursive<T, K>(&self, data: &mut [T], cmp: &Comparator<K>, depth: usize) -> Result<()>
    where
        T: Debug,
        K: Key<T>,
    {
        if data.len() <= 1 {
            return Ok(());
        }
        self.guard.enter(depth)?;

        let pivot = partition(data, cmp)?;
        let (left, right) = data.split_at_mut(pivot);
        self.sort_recursive(left, cmp, depth + 1)?;
        self.sort_recursive(&mut right[1..], cmp, depth + 1)
    }

    fn sort_iterative<T, K>(&self, data: &mut [T], cmp: &Comparator<K>) -> Result<()>
    where
        T: Debug,
        K: Key<T>,
    {
        let mut pending = vec![(0, data.len())];
        while let Some((lo, hi)) = pending.pop() {
            if hi - lo <= 1 {
                continue;
            }
            let pivot = lo + partition(&mut data[lo..hi], cmp)?;
            let left = (lo, pivot);
            let right = (pivot + 1, hi);
            // Larger side goes on the stack first so the smaller one pops next.
            if pivot - lo > hi - pivot - 1 {
                pending.push(left);
                pending.push(right);
            } else {
                pending.push(right);
                pending.push(left);
            }
        }
        Ok(())
    }
}

impl Sorter for QuickSort {
    fn name(&self) -> &'static str {
        match self.strategy {
            Strategy::Recursive => "quick_sort",
            Strategy::Iterative => "quick_sort_iterative",
        }
    }

    fn is_stable(&self) -> bool {
        false
    }

    fn sort_by<'a, T, K>(&self, data: &'a mut [T], cmp: &Comparator<K>) -> Result<&'a mut [T]>
    where
        T: Clone + Debug,
        K: Key<T>,
    {
        match self.strategy {
            Strategy::Recursive => self.sort_recursive(data, cmp, 1)?,
            Strategy::Iterative => self.sort_iterative(data, cmp)?,
        }
        Ok(data)
    }
}

pub fn quick_sort<'a, T, K>(data: &'a mut [T], cmp: &Comparator<K>) -> Result<&'a mut [T]>
where
    T: Clone + Debug,
    K: Key<T>,
{
    QuickSort::new().sort_by(data, cmp)
}
