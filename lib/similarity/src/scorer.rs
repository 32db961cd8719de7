//! All-pairs scorer
//!
//! Enumerates every unordered pair `(i, j)` with `i < j` exactly once, in
//! generation order (by `i`, then `j`). Pairs where either record lacks a
//! fingerprint are skipped. Quadratic in the number of records.

use molsim_core::{Metric, Record};
use rayon::prelude::*;
use serde::Serialize;

/// Score for one unordered pair of record positions, `i < j`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PairScore {
    pub i: usize,
    pub j: usize,
    pub score: f64,
}

/// Number of unordered pairs among `n` items
#[inline]
pub fn pair_count(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairwiseScorer {
    metric: Metric,
    parallel: bool,
}

impl PairwiseScorer {
    pub fn new(metric: Metric) -> Self {
        Self { metric, parallel: false }
    }

    /// Shard rows across the rayon pool. Output order is unchanged.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }

    pub fn score_all(&self, records: &[Record]) -> Vec<PairScore> {
        if self.parallel {
            let rows: Vec<Vec<PairScore>> = (0..records.len())
                .into_par_iter()
                .map(|i| self.score_row(records, i))
                .collect();
            rows.concat()
        } else {
            (0..records.len())
                .flat_map(|i| self.score_row(records, i))
                .collect()
        }
    }

    /// All pairs `(i, j)` with `j > i`
    fn score_row(&self, records: &[Record], i: usize) -> Vec<PairScore> {
        let Some(a) = records[i].fingerprint.as_ref() else {
            return Vec::new();
        };
        records[i + 1..]
            .iter()
            .enumerate()
            .filter_map(|(offset, other)| {
                other.fingerprint.as_ref().map(|b| PairScore {
                    i,
                    j: i + 1 + offset,
                    score: self.metric.similarity(a, b),
                })
            })
            .collect()
    }
}
