//! Call configuration for sorts and searches, loadable from JSON.

use crate::error::Result;
use crate::key::{Comparator, Identity, Order};
use crate::search::ReturnMode;
use crate::tim::DEFAULT_RUN_LENGTH;
use crate::validate::{ensure_max_depth, ensure_run_length};
use serde::{Deserialize, Serialize};

/// Recursive or iterative evaluation for algorithms that offer both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    #[default]
    Recursive,
    Iterative,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortConfig {
    pub order: Order,
    /// Depth bound for recursive merge sort and quicksort. `None` is unbounded.
    pub max_depth: Option<usize>,
    /// Block size for the simplified Tim sort.
    pub run_length: usize,
    pub strategy: Strategy,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            order: Order::Ascending,
            max_depth: None,
            run_length: DEFAULT_RUN_LENGTH,
            strategy: Strategy::Recursive,
        }
    }
}

impl SortConfig {
    pub fn from_json(input: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure_run_length(self.run_length)?;
        ensure_max_depth(self.max_depth)?;
        Ok(())
    }

    pub fn comparator(&self) -> Comparator<Identity> {
        Comparator::natural().with_order(self.order)
    }

    pub fn comparator_by<K>(&self, key: K) -> Comparator<K> {
        Comparator::by_key(key).with_order(self.order)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub mode: ReturnMode,
    pub max_depth: Option<usize>,
    /// Report every recursive step through the `log` facade.
    pub verbose: bool,
}

/// `SearchConfig` as read from JSON, with `mode` left as text so an
/// unknown value is reported as [`Error::InvalidMode`](crate::Error::InvalidMode).
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSearchConfig {
    mode: Option<String>,
    max_depth: Option<usize>,
    verbose: bool,
}

impl SearchConfig {
    pub fn from_json(input: &str) -> Result<Self> {
        let raw: RawSearchConfig = serde_json::from_str(input)?;
        let mode = match raw.mode {
            Some(mode) => mode.parse()?,
            None => ReturnMode::default(),
        };
        let config = Self {
            mode,
            max_depth: raw.max_depth,
            verbose: raw.verbose,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure_max_depth(self.max_depth)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_defaults() {
        let config = SortConfig::default();
        assert_eq!(config.run_length, 32);
        assert_eq!(config.order, Order::Ascending);
        assert_eq!(config.strategy, Strategy::Recursive);
        assert_eq!(SearchConfig::default().mode, ReturnMode::Leftmost);
    }

    #[test]
    fn test_sort_config_from_json() {
        let config = SortConfig::from_json(r#"{"order": "descending", "run_length": 8}"#).unwrap();
        assert_eq!(config.order, Order::Descending);
        assert_eq!(config.run_length, 8);
        assert_eq!(config.max_depth, None);
        assert_eq!(config.comparator().order(), Order::Descending);

        assert!(matches!(
            SortConfig::from_json(r#"{"run_length": 0}"#),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(SortConfig::from_json("{"), Err(Error::Config(_))));
    }

    #[test]
    fn test_search_config_from_json() {
        let config = SearchConfig::from_json(r#"{"mode": "all", "verbose": true}"#).unwrap();
        assert_eq!(config.mode, ReturnMode::All);
        assert!(config.verbose);

        let err = SearchConfig::from_json(r#"{"mode": "middle"}"#).unwrap_err();
        assert!(matches!(err, Error::InvalidMode(ref m) if m == "middle"), "{err:?}");
        assert!(err.to_string().contains("'middle'"), "{err}");

        assert_eq!(SearchConfig::from_json("{}").unwrap(), SearchConfig::default());
        assert!(matches!(
            SearchConfig::from_json(r#"{"mode": 3}"#),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            SearchConfig::from_json(r#"{"max_depth": 0}"#),
            Err(Error::InvalidConfig(_))
        ));
    }
}
