//! Approximate line matching: for each source line, the best-scoring target
//! lines under Jaro-Winkler similarity.

/// Matching parameters
pub mod config;
/// Per-source matching loop
pub mod driver;
/// Error types
pub mod error;
/// Line sources
pub mod io;
/// Tracing setup
pub mod logging;
/// Bounded top-K candidate selection
pub mod matching;
/// Emission order and score formatting
pub mod rank;
/// String similarity metrics
pub mod similarity;
/// Record sinks
pub mod sink;
/// Deduplicated target strings
pub mod target_set;

pub use config::MatchConfig;
pub use driver::{Matcher, RunStats};
pub use error::{Result, SimmError};
pub use io::{IoLimits, LineSource};
pub use matching::{select_best, select_best_par, CandidateSet, SimilarityPair};
pub use rank::{format_score, rank, SortOrder};
pub use similarity::{JaroWinkler, Similarity};
pub use sink::{CsvSink, JsonLinesSink, OutputFormat, RecordSink};
pub use target_set::TargetSet;
