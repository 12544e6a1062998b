//! Merge sort and the stable merge routine it shares with Tim sort.

use crate::config::{SortConfig, Strategy};
use crate::error::Result;
use crate::key::{Comparator, Key};
use crate::validate::DepthGuard;
use crate::Sorter;
use std::cmp::Ordering;
use std::fmt::Debug;

/// Merge two sorted runs into `out`, preferring `left` on ties.
///
/// Taking from `right` only when it is strictly smaller is what keeps every
/// merge-based sort here stable.
pub(crate) fn merge_runs<T, K>(
    left: &[T],
    right: &[T],
    cmp: &Comparator<K>,
    out: &mut Vec<T>,
) -> Result<()>
where
    T: Clone + Debug,
    K: Key<T>,
{
    let (mut i, mut j) = (0, 0);
    while i < left.len() && j < right.len() {
        if cmp.compare(&right[j], &left[i])? == Ordering::Less {
            out.push(right[j].clone());
            j += 1;
        } else {
            out.push(left[i].clone());
            i += 1;
        }
    }
    out.extend_from_slice(&left[i..]);
    out.extend_from_slice(&right[j..]);
    Ok(())
}

/// Merge `data[..mid]` with `data[mid..]` through `scratch`.
///
/// `data` is untouched if a comparison fails part way.
pub(crate) fn merge_adjacent<T, K>(
    data: &mut [T],
    mid: usize,
    cmp: &Comparator<K>,
    scratch: &mut Vec<T>,
) -> Result<()>
where
    T: Clone + Debug,
    K: Key<T>,
{
    scratch.clear();
    let (left, right) = data.split_at(mid);
    merge_runs(left, right, cmp, scratch)?;
    data.clone_from_slice(scratch);
    Ok(())
}

/// Bottom-up merge passes starting from runs of `width`, doubling until one
/// run covers the slice. Returns the number of passes.
pub(crate) fn merge_passes<T, K>(
    data: &mut [T],
    mut width: usize,
    cmp: &Comparator<K>,
) -> Result<usize>
where
    T: Clone + Debug,
    K: Key<T>,
{
    let n = data.len();
    let mut scratch = Vec::with_capacity(n);
    let mut passes = 0;
    while width < n {
        for left in (0..n).step_by(2 * width) {
            let mid = (left + width).min(n);
            let right = (left + 2 * width).min(n);
            if mid < right {
                merge_adjacent(&mut data[left..right], mid - left, cmp, &mut scratch)?;
            }
        }
        width *= 2;
        passes += 1;
    }
    Ok(passes)
}

/// Top-down merge sort, or bottom-up with [`Strategy::Iterative`].
///
/// Stable, O(n log n) in every case, O(n) scratch space.
#[derive(Debug, Clone, Copy, Default)]
pub struct MergeSort {
    strategy: Strategy,
    guard: DepthGuard,
}

impl MergeSort {
    pub fn new() -> Self {
        Self::default()
    }

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

    fn sort_recursive<T, K>(
        &self,
        data: &mut [T],
        cmp: &Comparator<K>,
        depth: usize,
        scratch: &mut Vec<T>,
    ) -> Result<()>
    where
        T: Clone + Debug,
        K: Key<T>,
    {
        if data.len() <= 1 {
            return Ok(());
        }
        self.guard.enter(depth)?;

        let mid = data.len() / 2;
        self.sort_recursive(&mut data[..mid], cmp, depth + 1, scratch)?;
        self.sort_recursive(&mut data[mid..], cmp, depth + 1, scratch)?;
        merge_adjacent(data, mid, cmp, scratch)
    }
}

impl Sorter for MergeSort {
    fn name(&self) -> &'static str {
        match self.strategy {
            Strategy::Recursive => "merge_sort",
            Strategy::Iterative => "merge_sort_bottom_up",
        }
    }

    fn is_stable(&self) -> bool {
        true
    }

    fn sort_by<'a, T, K>(&self, data: &'a mut [T], cmp: &Comparator<K>) -> Result<&'a mut [T]>
    where
        T: Clone + Debug,
        K: Key<T>,
    {
        match self.strategy {
            Strategy::Recursive => {
                let mut scratch = Vec::with_capacity(data.len());
                self.sort_recursive(data, cmp, 1, &mut scratch)?;
            }
            Strategy::Iterative => {
                merge_passes(data, 1, cmp)?;
            }
        }
        Ok(data)
    }
}

pub fn merge_sort<'a, T, K>(data: &'a mut [T], cmp: &Comparator<K>) -> Result<&'a mut [T]>
where
    T: Clone + Debug,
    K: Key<T>,
{
    MergeSort::new().sort_by(data, cmp)
}
