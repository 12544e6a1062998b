//! Error types shared by every sort and search routine.

use crate::key::Order;
use thiserror::Error;

/// Failure raised by a sort, search, or configuration call.
#[derive(Debug, Error)]
pub enum Error {
    /// A key could not be constructed or invoked.
    #[error("invalid key: {reason}")]
    InvalidKey { reason: String },

    /// Two elements could not be ordered, either because extracting a key
    /// failed or because the keys are unordered with respect to each other.
    #[error("elements are not comparable: {left} vs {right}: {reason}")]
    Comparison {
        left: String,
        right: String,
        reason: String,
    },

    /// Binary search was handed data that is not sorted in the requested order.
    #[error("list must be sorted in {order} order (first violation at index {index})")]
    Precondition { index: usize, order: Order },

    /// Unsupported return mode for recursive binary search.
    #[error("return mode must be 'leftmost', 'rightmost', or 'all', got '{0}'")]
    InvalidMode(String),

    /// A recursive variant exceeded its configured depth.
    #[error("recursion depth exceeded limit of {limit}")]
    RecursionLimit { limit: usize },

    /// Rejected configuration value.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration could not be parsed.
    #[error("config parse error: {0}")]
    Config(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn comparison(
        left: &impl std::fmt::Debug,
        right: &impl std::fmt::Debug,
        reason: impl Into<String>,
    ) -> Self {
        Error::Comparison {
            left: format!("{:?}", left),
            right: format!("{:?}", right),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
