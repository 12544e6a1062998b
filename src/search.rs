//! Linear and binary search with pluggable keys.
//!
//! "Not found" is `None` rather than a sentinel index. Binary search checks
//! its sortedness precondition in one O(n) pass before searching, trading
//! raw O(log n) speed for a loud failure on misuse.

use crate::config::SearchConfig;
use crate::error::{Error, Result};
use crate::key::{Comparator, Key};
use crate::validate::{ensure_sorted, DepthGuard};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::{self, Debug};
use std::str::FromStr;

/// Which occurrence(s) recursive binary search reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum ReturnMode {
    #[default]
    Leftmost,
    Rightmost,
    All,
}

impl FromStr for ReturnMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "leftmost" => Ok(ReturnMode::Leftmost),
            "rightmost" => Ok(ReturnMode::Rightmost),
            "all" => Ok(ReturnMode::All),
            other => Err(Error::InvalidMode(other.to_string())),
        }
    }
}

impl TryFrom<String> for ReturnMode {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl fmt::Display for ReturnMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReturnMode::Leftmost => "leftmost",
            ReturnMode::Rightmost => "rightmost",
            ReturnMode::All => "all",
        })
    }
}

/// Result of recursive binary search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Leftmost or rightmost match.
    Index(Option<usize>),
    /// Every match, ascending. Empty when nothing matched.
    All(Vec<usize>),
}

impl SearchOutcome {
    pub fn index(&self) -> Option<usize> {
        match self {
            SearchOutcome::Index(i) => *i,
            SearchOutcome::All(v) => v.first().copied(),
        }
    }

    pub fn indices(&self) -> Vec<usize> {
        match self {
            SearchOutcome::Index(i) => i.iter().copied().collect(),
            SearchOutcome::All(v) => v.clone(),
        }
    }

    pub fn is_found(&self) -> bool {
        match self {
            SearchOutcome::Index(i) => i.is_some(),
            SearchOutcome::All(v) => !v.is_empty(),
        }
    }

    fn empty(mode: ReturnMode) -> Self {
        match mode {
            ReturnMode::All => SearchOutcome::All(Vec::new()),
            _ => SearchOutcome::Index(None),
        }
    }
}

/// One recursive step: the half-open window `[low, high)`, its midpoint,
/// and the midpoint key being weighed against the target.
#[derive(Debug, Clone, Copy)]
pub struct SearchStep<'a> {
    pub depth: usize,
    pub low: usize,
    pub high: usize,
    pub mid: usize,
    pub mid_value: &'a dyn Debug,
    pub target: &'a dyn Debug,
}

/// Receives every step of a recursive search. Observing never changes the result.
pub trait SearchObserver {
    fn on_step(&mut self, step: &SearchStep<'_>);
}

impl<F> SearchObserver for F
where
    F: FnMut(&SearchStep<'_>),
{
    fn on_step(&mut self, step: &SearchStep<'_>) {
        self(step)
    }
}

/// Forwards steps to `log::debug!`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl SearchObserver for LogObserver {
    fn on_step(&mut self, step: &SearchStep<'_>) {
        log::debug!(
            "step: depth={}, low={}, high={}, mid={}, mid_value={:?}, target={:?}",
            step.depth,
            step.low,
            step.high,
            step.mid,
            step.mid_value,
            step.target
        );
    }
}

/// Index of the first element whose key equals `target`, scanning left to right.
pub fn linear_search<T, K>(
    data: &[T],
    target: &K::Output,
    cmp: &Comparator<K>,
) -> Result<Option<usize>>
where
    T: Debug,
    K: Key<T>,
{
    for (i, item) in data.iter().enumerate() {
        if cmp.matches(item, target)? {
            return Ok(Some(i));
        }
    }
    Ok(None)
}

/// Iterative binary search returning the first occurrence of `target`.
///
/// `data` must be sorted under `cmp`, otherwise [`Error::Precondition`].
pub fn binary_search_iterative<T, K>(
    data: &[T],
    target: &K::Output,
    cmp: &Comparator<K>,
) -> Result<Option<usize>>
where
    T: Debug,
    K: Key<T>,
{
    if data.is_empty() {
        return Ok(None);
    }
    ensure_sorted(data, cmp)?;

    let mut lo = 0;
    let mut hi = data.len();
    while lo < hi {
        let mut mid = lo + (hi - lo) / 2;
        match cmp.compare_to_target(&data[mid], target)? {
            Ordering::Equal => {
                while mid > 0 && cmp.matches(&data[mid - 1], target)? {
                    mid -= 1;
                }
                return Ok(Some(mid));
            }
            Ordering::Less => lo = mid + 1,
            Ordering::Greater => hi = mid,
        }
    }
    Ok(None)
}

/// Recursive binary search with leftmost/rightmost/all reporting.
pub fn binary_search_recursive<T, K>(
    data: &[T],
    target: &K::Output,
    cmp: &Comparator<K>,
    mode: ReturnMode,
) -> Result<SearchOutcome>
where
    T: Debug,
    K: Key<T>,
{
    RecursiveSearch::new().mode(mode).search(data, target, cmp)
}

/// Configurable recursive binary search.
///
/// ```ignore
/// let mut mids = Vec::new();
/// let mut record = |s: &SearchStep| mids.push(s.mid);
/// let found = RecursiveSearch::new()
///     .mode(ReturnMode::Rightmost)
///     .observer(&mut record)
///     .search(&data, &2, &Comparator::natural())?;
/// ```
pub struct RecursiveSearch<'o> {
    mode: ReturnMode,
    guard: DepthGuard,
    observer: Option<&'o mut dyn SearchObserver>,
    log_steps: bool,
}

impl Default for RecursiveSearch<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'o> RecursiveSearch<'o> {
    pub fn new() -> Self {
        Self {
            mode: ReturnMode::Leftmost,
            guard: DepthGuard::default(),
            observer: None,
            log_steps: false,
        }
    }

    pub fn from_config(config: &SearchConfig) -> Self {
        Self {
            mode: config.mode,
            guard: DepthGuard::new(config.max_depth),
            observer: None,
            log_steps: config.verbose,
        }
    }

    pub fn mode(mut self, mode: ReturnMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn max_depth(mut self, limit: usize) -> Self {
        self.guard = DepthGuard::new(Some(limit));
        self
    }

    /// Takes precedence over `verbose` logging.
    pub fn observer(mut self, observer: &'o mut dyn SearchObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn search<T, K>(
        &mut self,
        data: &[T],
        target: &K::Output,
        cmp: &Comparator<K>,
    ) -> Result<SearchOutcome>
    where
        T: Debug,
        K: Key<T>,
    {
        if data.is_empty() {
            return Ok(SearchOutcome::empty(self.mode));
        }
        ensure_sorted(data, cmp)?;

        let len = data.len();
        match self.mode {
            ReturnMode::All => self
                .find_all(data, target, cmp, 0, len, 1)
                .map(SearchOutcome::All),
            _ => self
                .find_one(data, target, cmp, 0, len, 1)
                .map(SearchOutcome::Index),
        }
    }

    fn step<T, K>(
        &mut self,
        data: &[T],
        target: &K::Output,
        cmp: &Comparator<K>,
        depth: usize,
        low: usize,
        high: usize,
    ) -> Result<usize>
    where
        T: Debug,
        K: Key<T>,
    {
        self.guard.enter(depth)?;
        let mid = low + (high - low) / 2;
        if self.observer.is_none() && !self.log_steps {
            return Ok(mid);
        }

        let item = &data[mid];
        let mid_value = cmp
            .key()
            .extract(item)
            .map_err(|e| Error::comparison(item, target, e.0))?;
        let step = SearchStep {
            depth,
            low,
            high,
            mid,
            mid_value: &mid_value,
            target,
        };
        match self.observer.as_deref_mut() {
            Some(observer) => observer.on_step(&step),
            None => LogObserver.on_step(&step),
        }
        Ok(mid)
    }

    fn find_one<T, K>(
        &mut self,
        data: &[T],
        target: &K::Output,
        cmp: &Comparator<K>,
        low: usize,
        high: usize,
        depth: usize,
    ) -> Result<Option<usize>>
    where
        T: Debug,
        K: Key<T>,
    {
        if low >= high {
            return Ok(None);
        }
        let mid = self.step(data, target, cmp, depth, low, high)?;

        match cmp.compare_to_target(&data[mid], target)? {
            Ordering::Equal => match self.mode {
                ReturnMode::Rightmost => {
                    if mid + 1 == data.len() || !cmp.matches(&data[mid + 1], target)? {
                        return Ok(Some(mid));
                    }
                    self.find_one(data, target, cmp, mid + 1, high, depth + 1)
                }
                _ => {
                    if mid == 0 || !cmp.matches(&data[mid - 1], target)? {
                        return Ok(Some(mid));
                    }
                    self.find_one(data, target, cmp, low, mid, depth + 1)
                }
            },
            Ordering::Less => self.find_one(data, target, cmp, mid + 1, high, depth + 1),
            Ordering::Greater => self.find_one(data, target, cmp, low, mid, depth + 1),
        }
    }

    fn find_all<T, K>(
        &mut self,
        data: &[T],
        target: &K::Output,
        cmp: &Comparator<K>,
        low: usize,
        high: usize,
        depth: usize,
    ) -> Result<Vec<usize>>
    where
        T: Debug,
        K: Key<T>,
    {
        if low >= high {
            return Ok(Vec::new());
        }
        let mid = self.step(data, target, cmp, depth, low, high)?;

        match cmp.compare_to_target(&data[mid], target)? {
            Ordering::Equal => {
                // Left indices are all below mid and right ones above, so
                // concatenation is already ascending.
                let mut matches = self.find_all(data, target, cmp, low, mid, depth + 1)?;
                matches.push(mid);
                matches.extend(self.find_all(data, target, cmp, mid + 1, high, depth + 1)?);
                Ok(matches)
            }
            Ordering::Less => self.find_all(data, target, cmp, mid + 1, high, depth + 1),
            Ordering::Greater => self.find_all(data, target, cmp, low, mid, depth + 1),
        }
    }
}
