//! Deduplicated set of target strings.
//!
//! Iteration follows first-occurrence order. That order is the scan order
//! the selector's first-seen tie-break is defined against.

use crate::error::Result;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, trace};

#[derive(Debug, Clone, Default)]
pub struct TargetSet {
    order: Vec<Arc<str>>,
    seen: HashSet<Arc<str>>,
}

impl TargetSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from plain lines, dropping exact duplicates.
    pub fn build<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::new();
        for line in lines {
            set.insert(line.into());
        }
        debug!(targets = set.len(), "Built target set");
        set
    }

    /// Build from a fallible line source, stopping at the first error.
    pub fn try_build<I>(lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = Result<String>>,
    {
        let mut set = Self::new();
        for line in lines {
            set.insert(line?);
        }
        debug!(targets = set.len(), "Built target set");
        Ok(set)
    }

    /// Insert a target; returns `false` when it was already present.
    pub fn insert(&mut self, target: String) -> bool {
        if self.seen.contains(target.as_str()) {
            trace!(target_str = %target, "Duplicate target ignored");
            return false;
        }
        trace!(target_str = %target, "Adding target");
        let target: Arc<str> = Arc::from(target);
        self.seen.insert(Arc::clone(&target));
        self.order.push(target);
        true
    }

    pub fn contains(&self, target: &str) -> bool {
        self.seen.contains(target)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Targets in scan order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.order.iter().map(|t| &**t)
    }

    /// Targets in scan order, as a slice for sharded scans.
    pub fn as_slice(&self) -> &[Arc<str>] {
        &self.order
    }
}

impl FromIterator<String> for TargetSet {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self::build(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimmError;
    use std::path::PathBuf;

    #[test]
    fn duplicates_are_dropped() {
        let set = TargetSet::build(["foo", "foo", "bar"]);
        assert_eq!(set.len(), 2);
        assert!(set.contains("foo"));
        assert!(set.contains("bar"));
        assert!(!set.contains("baz"));
    }

    #[test]
    fn first_occurrence_order() {
        let set = TargetSet::build(["b", "a", "b", "c", "a"]);
        let order: Vec<&str> = set.iter().collect();
        assert_eq!(order, vec!["b", "a", "c"]);
    }

    #[test]
    fn empty_input_is_valid() {
        let set = TargetSet::build(Vec::<String>::new());
        assert!(set.is_empty());
        assert_eq!(set.iter().count(), 0);
    }

    #[test]
    fn insert_reports_novelty() {
        let mut set = TargetSet::new();
        assert!(set.insert("x".to_string()));
        assert!(!set.insert("x".to_string()));
        assert!(set.insert("X".to_string()));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn try_build_propagates_errors() {
        let lines = vec![
            Ok("a".to_string()),
            Err(SimmError::InputReadInterrupted {
                path: PathBuf::from("t.txt"),
                line: 2,
                reason: "boom".to_string(),
            }),
            Ok("b".to_string()),
        ];
        assert!(TargetSet::try_build(lines).is_err());
    }

    #[test]
    fn collect_from_strings() {
        let set: TargetSet = vec!["a".to_string(), "a".to_string()].into_iter().collect();
        assert_eq!(set.len(), 1);
    }
}
