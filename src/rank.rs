//! Ordering and score formatting for emitted matches.

use crate::matching::SimilarityPair;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Presentation order of the records for one source line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Best match first; equal scores by target, lexically ascending.
    #[default]
    #[value(name = "desc")]
    Descending,
    /// Exact reverse of `Descending` (worst kept match first).
    #[value(name = "asc")]
    Ascending,
}

fn best_first(a: &SimilarityPair, b: &SimilarityPair) -> Ordering {
    b.score()
        .total_cmp(&a.score())
        .then_with(|| a.target().cmp(b.target()))
}

/// Sort pairs into a total, deterministic order.
pub fn rank(mut pairs: Vec<SimilarityPair>, order: SortOrder) -> Vec<SimilarityPair> {
    match order {
        SortOrder::Descending => pairs.sort_by(best_first),
        SortOrder::Ascending => pairs.sort_by(|a, b| best_first(b, a)),
    }
    pairs
}

/// Shortest decimal text that round-trips to the same `f64`, never in
/// scientific notation (`1`, `0.5`, `0.9611111111111111`).
pub fn format_score(score: f64) -> String {
    score.to_string()
}
