//! Simplified Tim sort.
//!
//! The slice is cut into fixed blocks of `run_length` elements, each block
//! is insertion sorted, then neighbouring blocks are merged bottom-up with
//! the merge sort routine, doubling the width each pass.
//!
//! This is a teaching approximation, not real Tim sort: there is no natural
//! run detection, no minrun computation, no run stack invariants and no
//! galloping. Complexity is O(n log n) on average and in the worst case.
//! The block phase costs O(n) only when every block is already ordered;
//! the merge passes still run, so ordered input is not O(n) overall.

use crate::config::SortConfig;
use crate::error::Result;
use crate::key::{Comparator, Key};
use crate::merge::merge_passes;
use crate::simple::insertion_sort_slice;
use crate::validate::ensure_run_length;
use crate::Sorter;
use std::fmt::Debug;

pub const DEFAULT_RUN_LENGTH: usize = 32;

/// Stable.
#[derive(Debug, Clone, Copy)]
pub struct TimSort {
    run_length: usize,
}

impl Default for TimSort {
    fn default() -> Self {
        Self {
            run_length: DEFAULT_RUN_LENGTH,
        }
    }
}

impl TimSort {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails with `InvalidConfig` for a zero run length.
    pub fn with_run_length(run_length: usize) -> Result<Self> {
        Ok(Self {
            run_length: ensure_run_length(run_length)?,
        })
    }

    pub fn from_config(config: &SortConfig) -> Result<Self> {
        Self::with_run_length(config.run_length)
    }

    pub fn run_length(&self) -> usize {
        self.run_length
    }
}

impl Sorter for TimSort {
    fn name(&self) -> &'static str {
        "tim_sort"
    }

    fn is_stable(&self) -> bool {
        true
    }

    fn sort_by<'a, T, K>(&self, data: &'a mut [T], cmp: &Comparator<K>) -> Result<&'a mut [T]>
    where
        T: Clone + Debug,
        K: Key<T>,
    {
        for run in data.chunks_mut(self.run_length) {
            insertion_sort_slice(run, cmp)?;
        }
        let passes = merge_passes(data, self.run_length, cmp)?;
        log::trace!(
            "tim_sort: {} elements, run length {}, {} merge passes",
            data.len(),
            self.run_length,
            passes
        );
        Ok(data)
    }
}

pub fn tim_sort<'a, T, K>(data: &'a mut [T], cmp: &Comparator<K>) -> Result<&'a mut [T]>
where
    T: Clone + Debug,
    K: Key<T>,
{
    TimSort::new().sort_by(data, cmp)
}
