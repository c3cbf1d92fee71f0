//! Configuration for matching runs.
//!
//! Parameters are carried as an explicit value and threaded into the
//! selector; nothing here is global.

use crate::error::{Result, SimmError};
use crate::rank::SortOrder;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default Jaro score above which the common-prefix boost applies (Winkler's 0.7).
pub const DEFAULT_BOOST_THRESHOLD: f64 = 0.7;
/// Default number of leading characters considered for the boost (Winkler's 4).
pub const DEFAULT_PREFIX_SIZE: usize = 4;
/// Default number of matches kept per source line.
pub const DEFAULT_NUM_MATCHES: usize = 1;
/// Largest prefix the 0.1 Winkler scaling factor allows without leaving [0, 1].
pub const MAX_PREFIX_SIZE: usize = 10;

/// Parameters for one matching run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Minimum Jaro score for a pair to receive the prefix boost.
    pub boost_threshold: f64,
    /// Number of leading characters considered for the prefix boost.
    pub prefix_size: usize,
    /// Number of best matches kept per source line (K).
    pub num_matches: usize,
    /// Presentation order of the records emitted for one source line.
    pub order: SortOrder,
    /// Process source lines in parallel batches.
    pub parallel: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            boost_threshold: DEFAULT_BOOST_THRESHOLD,
            prefix_size: DEFAULT_PREFIX_SIZE,
            num_matches: DEFAULT_NUM_MATCHES,
            order: SortOrder::default(),
            parallel: false,
        }
    }
}

impl MatchConfig {
    /// Reject parameters outside the metric's domain before any input is read.
    pub fn validate(&self) -> Result<()> {
        if self.num_matches < 1 {
            return Err(SimmError::InvalidConfiguration(
                "num_matches must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.boost_threshold) {
            return Err(SimmError::InvalidConfiguration(format!(
                "boost_threshold must be within [0, 1], got {}",
                self.boost_threshold
            )));
        }
        if self.prefix_size > MAX_PREFIX_SIZE {
            return Err(SimmError::InvalidConfiguration(format!(
                "prefix_size must be at most {MAX_PREFIX_SIZE}, got {}",
                self.prefix_size
            )));
        }
        Ok(())
    }

    /// Load a configuration from a JSON file. Missing fields take defaults.
    ///
    /// The returned value is not validated; callers merge overrides first.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            SimmError::InvalidConfiguration(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json_str(&text).map_err(|e| match e {
            SimmError::InvalidConfiguration(msg) => {
                SimmError::InvalidConfiguration(format!("{}: {msg}", path.display()))
            }
            other => other,
        })
    }

    /// Parse a configuration from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| SimmError::InvalidConfiguration(e.to_string()))
    }
}
