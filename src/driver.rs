//! Per-source matching loop: select, rank, emit.

use crate::config::MatchConfig;
use crate::error::Result;
use crate::matching::{select_best, SimilarityPair};
use crate::similarity::{JaroWinkler, Similarity};
use crate::sink::RecordSink;
use crate::target_set::TargetSet;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

/// Source lines handed to the thread pool at a time in parallel mode.
pub const PARALLEL_BATCH: usize = 256;

/// Counters for a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub sources: u64,
    pub records: u64,
    pub targets: usize,
}

/// Matches source lines against a fixed target set.
pub struct Matcher<M: Similarity = JaroWinkler> {
    config: MatchConfig,
    targets: TargetSet,
    metric: M,
}

impl Matcher<JaroWinkler> {
    /// Jaro-Winkler matcher parameterized from `config`.
    pub fn new(config: MatchConfig, targets: TargetSet) -> Result<Self> {
        let metric = JaroWinkler::from_config(&config);
        Self::with_metric(config, targets, metric)
    }
}

impl<M: Similarity> Matcher<M> {
    pub fn with_metric(config: MatchConfig, targets: TargetSet, metric: M) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            targets,
            metric,
        })
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn targets(&self) -> &TargetSet {
        &self.targets
    }

    /// Ranked best matches for a single source string.
    pub fn match_one(&self, source: &str) -> Vec<SimilarityPair> {
        let set = select_best(source, &self.targets, self.config.num_matches, &self.metric);
        debug!(source_str = %source, kept = set.len(), lower_bound = ?set.lower_bound(), "Selected candidates");
        set.into_ranked(self.config.order)
    }

    /// Match every source line and write the records to `sink`.
    ///
    /// Records of lines read before a failure stay written; the sink is
    /// finished either way and the first error is returned.
    pub fn run<I, S>(&self, sources: I, sink: &mut S) -> Result<RunStats>
    where
        I: IntoIterator<Item = Result<String>>,
        S: RecordSink + ?Sized,
    {
        let mut stats = RunStats {
            targets: self.targets.len(),
            ..RunStats::default()
        };
        let outcome = if self.config.parallel {
            self.run_batched(sources.into_iter(), sink, &mut stats)
        } else {
            self.run_sequential(sources.into_iter(), sink, &mut stats)
        };
        let finished = sink.finish();
        outcome?;
        finished?;

        info!(
            sources = stats.sources,
            records = stats.records,
            targets = stats.targets,
            parallel = self.config.parallel,
            "Matching complete"
        );
        Ok(stats)
    }

    fn emit<S>(&self, ranked: &[SimilarityPair], sink: &mut S, stats: &mut RunStats) -> Result<()>
    where
        S: RecordSink + ?Sized,
    {
        for pair in ranked {
            sink.write(pair)?;
        }
        stats.sources += 1;
        stats.records += ranked.len() as u64;
        Ok(())
    }

    fn run_sequential<I, S>(&self, sources: I, sink: &mut S, stats: &mut RunStats) -> Result<()>
    where
        I: Iterator<Item = Result<String>>,
        S: RecordSink + ?Sized,
    {
        for line in sources {
            let ranked = self.match_one(&line?);
            self.emit(&ranked, sink, stats)?;
        }
        Ok(())
    }

    fn run_batched<I, S>(&self, mut sources: I, sink: &mut S, stats: &mut RunStats) -> Result<()>
    where
        I: Iterator<Item = Result<String>>,
        S: RecordSink + ?Sized,
    {
        let mut batch: Vec<String> = Vec::with_capacity(PARALLEL_BATCH);
        loop {
            batch.clear();
            let mut pending = None;
            for line in sources.by_ref() {
                match line {
                    Ok(line) => batch.push(line),
                    Err(e) => {
                        pending = Some(e);
                        break;
                    }
                }
                if batch.len() == PARALLEL_BATCH {
                    break;
                }
            }
            if batch.is_empty() && pending.is_none() {
                return Ok(());
            }

            debug!(lines = batch.len(), "Matching batch");
            let results: Vec<Vec<SimilarityPair>> =
                batch.par_iter().map(|line| self.match_one(line)).collect();
            for ranked in &results {
                self.emit(ranked, sink, stats)?;
            }

            if let Some(e) = pending {
                return Err(e);
            }
            if batch.len() < PARALLEL_BATCH {
                return Ok(());
            }
        }
    }
}
