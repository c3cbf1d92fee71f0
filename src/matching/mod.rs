//! Bounded top-K selection of the best-scoring targets for one source line.
//!
//! A `CandidateSet` keeps at most `k` pairs in a binary heap whose top is the
//! worst member kept so far, so admission only ever looks at that one entry.
//! Candidates are totally ordered by score (higher first) and then by scan
//! position (earlier first). A target that only ties the worst kept score is
//! therefore rejected: among equal scores at the cutoff, the first seen wins.

use crate::rank::{rank, SortOrder};
use crate::similarity::Similarity;
use crate::target_set::TargetSet;
use rayon::prelude::*;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::sync::Arc;

/// One scored comparison between a source and a target string.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarityPair {
    source: Arc<str>,
    target: Arc<str>,
    score: f64,
}

impl SimilarityPair {
    pub fn new(source: impl Into<Arc<str>>, target: impl Into<Arc<str>>, score: f64) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            score,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn score(&self) -> f64 {
        self.score
    }
}

#[derive(Debug, Clone)]
struct Candidate {
    score: f64,
    // Position in the globally agreed scan order.
    seq: usize,
    target: Arc<str>,
}

// Greater means worse: lower score, then later scan position.
impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

/// The `k` best targets seen so far for a single source string.
#[derive(Debug, Clone)]
pub struct CandidateSet {
    source: Arc<str>,
    capacity: usize,
    heap: BinaryHeap<Candidate>,
}

impl CandidateSet {
    /// An empty set holding at most `k` candidates. A zero `k` admits nothing.
    pub fn new(source: impl Into<Arc<str>>, k: usize) -> Self {
        Self {
            source: source.into(),
            capacity: k,
            heap: BinaryHeap::with_capacity(k.min(1024)),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.heap.len() >= self.capacity
    }

    /// Lowest score currently kept, or `None` while the set is empty.
    pub fn lower_bound(&self) -> Option<f64> {
        self.heap.peek().map(|c| c.score)
    }

    /// Offer the target found at scan position `seq`.
    ///
    /// While the set has room the pair is always kept. Once full, it is kept
    /// only if it beats the worst member, which is then evicted. Returns
    /// whether the pair was admitted.
    pub fn offer(&mut self, seq: usize, target: &Arc<str>, score: f64) -> bool {
        if self.heap.len() < self.capacity {
            self.heap.push(Candidate {
                score,
                seq,
                target: Arc::clone(target),
            });
            return true;
        }
        let Some(mut worst) = self.heap.peek_mut() else {
            return false;
        };
        let better = worst
            .score
            .total_cmp(&score)
            .then_with(|| seq.cmp(&worst.seq))
            == Ordering::Less;
        if better {
            *worst = Candidate {
                score,
                seq,
                target: Arc::clone(target),
            };
        }
        better
    }

    fn offer_candidate(&mut self, candidate: Candidate) {
        let Candidate { score, seq, target } = candidate;
        self.offer(seq, &target, score);
    }

    /// Combine two partial results for the same source.
    ///
    /// The outcome is the same as a single scan over both shards in scan
    /// position order.
    pub fn merge(mut self, other: CandidateSet) -> CandidateSet {
        debug_assert_eq!(self.source, other.source);
        if self.heap.len() < other.heap.len() {
            return other.merge(self);
        }
        for candidate in other.heap {
            self.offer_candidate(candidate);
        }
        self
    }

    /// Members as pairs, in no particular order.
    pub fn into_pairs(self) -> Vec<SimilarityPair> {
        let source = self.source;
        self.heap
            .into_iter()
            .map(|c| SimilarityPair {
                source: Arc::clone(&source),
                target: c.target,
                score: c.score,
            })
            .collect()
    }

    /// Members ordered for emission.
    pub fn into_ranked(self, order: SortOrder) -> Vec<SimilarityPair> {
        rank(self.into_pairs(), order)
    }
}

/// Score `source` against every target and keep the `k` best.
pub fn select_best<M>(source: &str, targets: &TargetSet, k: usize, metric: &M) -> CandidateSet
where
    M: Similarity + ?Sized,
{
    let mut set = CandidateSet::new(source, k);
    for (seq, target) in targets.as_slice().iter().enumerate() {
        let score = metric.score(source, target);
        set.offer(seq, target, score);
    }
    set
}

/// Parallel variant of [`select_best`] that shards the target scan.
///
/// Shards carry their global scan positions, so the result membership is
/// identical to the sequential scan, tie-break included.
pub fn select_best_par<M>(source: &str, targets: &TargetSet, k: usize, metric: &M) -> CandidateSet
where
    M: Similarity + ?Sized,
{
    let source: Arc<str> = Arc::from(source);
    targets
        .as_slice()
        .par_iter()
        .enumerate()
        .fold(
            || CandidateSet::new(Arc::clone(&source), k),
            |mut set, (seq, target)| {
                let score = metric.score(&source, target);
                set.offer(seq, target, score);
                set
            },
        )
        .reduce(|| CandidateSet::new(Arc::clone(&source), k), CandidateSet::merge)
}
