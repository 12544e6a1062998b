//! Input validation shared by the search routines and the recursive sorts.

use crate::error::{Error, Result};
use crate::key::{Comparator, Key};
use std::cmp::Ordering;
use std::fmt::Debug;

/// Fails with [`Error::Precondition`] unless `data` is ordered under `cmp`.
///
/// One O(n) pass over adjacent pairs; the reported index is the first
/// element that sits before its predecessor.
pub fn ensure_sorted<T, K>(data: &[T], cmp: &Comparator<K>) -> Result<()>
where
    T: Debug,
    K: Key<T>,
{
    for (i, pair) in data.windows(2).enumerate() {
        if cmp.compare(&pair[0], &pair[1])? == Ordering::Greater {
            return Err(Error::Precondition {
                index: i + 1,
                order: cmp.order(),
            });
        }
    }
    Ok(())
}

/// Whether `data` is ordered under `cmp`. Comparison failures still propagate.
pub fn is_sorted_by<T, K>(data: &[T], cmp: &Comparator<K>) -> Result<bool>
where
    T: Debug,
    K: Key<T>,
{
    match ensure_sorted(data, cmp) {
        Ok(()) => Ok(true),
        Err(Error::Precondition { .. }) => Ok(false),
        Err(e) => Err(e),
    }
}

pub fn ensure_run_length(run_length: usize) -> Result<usize> {
    if run_length == 0 {
        return Err(Error::InvalidConfig("run_length must be at least 1".to_string()));
    }
    Ok(run_length)
}

pub fn ensure_max_depth(max_depth: Option<usize>) -> Result<Option<usize>> {
    if max_depth == Some(0) {
        return Err(Error::InvalidConfig("max_depth must be at least 1".to_string()));
    }
    Ok(max_depth)
}

/// Optional bound on recursion depth for the recursive variants.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct DepthGuard {
    limit: Option<usize>,
}

impl DepthGuard {
    pub(crate) fn new(limit: Option<usize>) -> Self {
        Self { limit }
    }

    /// `depth` is 1 for the outermost call.
    #[inline]
    pub(crate) fn enter(&self, depth: usize) -> Result<()> {
        match self.limit {
            Some(limit) if depth > limit => Err(Error::RecursionLimit { limit }),
            _ => Ok(()),
        }
    }
}
