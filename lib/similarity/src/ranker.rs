//! Top-N ranking of pair scores
//!
//! Ties are broken by generation order: among equal scores the pair with the
//! smaller `(i, j)` ranks first. This is the same order a stable descending
//! sort over the scorer's output would give, but selection keeps only `N`
//! candidates in a bounded heap.

use crate::scorer::PairScore;
use molsim_core::{Error, Record, Result};
use ordered_float::OrderedFloat;
use serde::{Serialize, Serializer};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Decimal places used when scores are displayed or serialized
pub const DISPLAY_DECIMALS: i32 = 4;

#[inline]
pub fn round_score(score: f64) -> f64 {
    let factor = 10f64.powi(DISPLAY_DECIMALS);
    (score * factor).round() / factor
}

fn serialize_rounded<S: Serializer>(score: &f64, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_f64(round_score(*score))
}

/// A top-N pair resolved back to its records
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedPair {
    pub ids: (String, String),
    pub structures: (String, String),
    #[serde(serialize_with = "serialize_rounded")]
    pub score: f64,
    /// Positions in the loaded record sequence
    #[serde(skip)]
    pub indices: (usize, usize),
}

impl RankedPair {
    pub fn display_score(&self) -> f64 {
        round_score(self.score)
    }
}

/// Ordering key: higher score first, then earlier generation order
type RankKey = (OrderedFloat<f64>, Reverse<usize>, Reverse<usize>);

#[inline]
fn rank_key(p: &PairScore) -> RankKey {
    (OrderedFloat(p.score), Reverse(p.i), Reverse(p.j))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ranker {
    top_n: usize,
}

impl Ranker {
    pub fn new(top_n: usize) -> Result<Self> {
        if top_n == 0 {
            return Err(Error::InvalidConfig("top_n must be at least 1".to_string()));
        }
        Ok(Self { top_n })
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    /// The `N` best pair scores, best first
    pub fn select(&self, scores: &[PairScore]) -> Vec<PairScore> {
        let capacity = self.top_n.min(scores.len()) + 1;
        let mut heap: BinaryHeap<Reverse<(RankKey, usize)>> = BinaryHeap::with_capacity(capacity);
        for (pos, p) in scores.iter().enumerate() {
            heap.push(Reverse((rank_key(p), pos)));
            if heap.len() > self.top_n {
                heap.pop();
            }
        }
        heap.into_sorted_vec()
            .into_iter()
            .map(|Reverse((_, pos))| scores[pos])
            .collect()
    }

    /// Select the top `N` and resolve each to ids and structures
    ///
    /// `scores` must index into `records`, as the scorer's output does.
    /// Pairs pointing past the end of `records` are dropped.
    pub fn rank(&self, scores: &[PairScore], records: &[Record]) -> Vec<RankedPair> {
        let in_range: Vec<PairScore> = scores
            .iter()
            .filter(|p| p.i < records.len() && p.j < records.len())
            .copied()
            .collect();
        self.select(&in_range)
            .into_iter()
            .map(|p| {
                let (a, b) = (&records[p.i], &records[p.j]);
                RankedPair {
                    ids: (a.id.clone(), b.id.clone()),
                    structures: (a.structure.clone(), b.structure.clone()),
                    score: p.score,
                    indices: (p.i, p.j),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ps(i: usize, j: usize, score: f64) -> PairScore {
        PairScore { i, j, score }
    }

    fn records(ids: &[&str]) -> Vec<Record> {
        ids.iter().map(|id| Record::new(*id, format!("smiles-{}", id))).collect()
    }

    #[test]
    fn test_zero_top_n_rejected() {
        assert!(matches!(Ranker::new(0), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_three_record_scenario() {
        let recs = records(&["A", "B", "C"]);
        let scores = vec![ps(0, 1, 0.9), ps(0, 2, 0.5), ps(1, 2, 0.3)];
        let ranked = Ranker::new(2).unwrap().rank(&scores, &recs);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].ids, ("A".to_string(), "B".to_string()));
        assert_eq!(ranked[0].score, 0.9);
        assert_eq!(ranked[1].ids, ("A".to_string(), "C".to_string()));
        assert_eq!(ranked[1].score, 0.5);
        assert_eq!(ranked[1].structures, ("smiles-A".to_string(), "smiles-C".to_string()));
    }

    #[test]
    fn test_huge_top_n() {
        let scores = vec![ps(0, 1, 0.5), ps(0, 2, 0.7), ps(1, 2, 0.1)];
        let ranked = Ranker::new(usize::MAX).unwrap().rank(&scores, &records(&["A", "B", "C"]));
        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].ids, ("A".to_string(), "C".to_string()));
        assert_eq!(Ranker::new(1 << 40).unwrap().select(&scores).len(), 3);
    }

    #[test]
    fn test_out_of_range_pairs_dropped() {
        let scores = vec![ps(0, 1, 0.4), ps(0, 5, 0.9), ps(7, 8, 0.8)];
        let ranked = Ranker::new(5).unwrap().rank(&scores, &records(&["A", "B"]));
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].indices, (0, 1));
    }

    #[test]
    fn test_fewer_pairs_than_n() {
        let scores = vec![ps(0, 1, 0.2)];
        let ranked = Ranker::new(10).unwrap().rank(&scores, &records(&["A", "B"]));
        assert_eq!(ranked.len(), 1);
        assert!(Ranker::new(10).unwrap().rank(&[], &[]).is_empty());
    }

    #[test]
    fn test_ties_keep_generation_order() {
        let scores = vec![
            ps(0, 1, 0.5),
            ps(0, 2, 0.7),
            ps(0, 3, 0.5),
            ps(1, 2, 0.5),
            ps(1, 3, 0.7),
            ps(2, 3, 0.5),
        ];
        let top: Vec<(usize, usize)> = Ranker::new(4)
            .unwrap()
            .select(&scores)
            .iter()
            .map(|p| (p.i, p.j))
            .collect();
        assert_eq!(top, vec![(0, 2), (1, 3), (0, 1), (0, 3)]);
    }

    #[test]
    fn test_matches_stable_sort() {
        let scores: Vec<PairScore> = (0..30)
            .flat_map(|i| ((i + 1)..30).map(move |j| ps(i, j, ((i * 31 + j * 17) % 11) as f64 / 10.0)))
            .collect();
        let mut expected = scores.clone();
        expected.sort_by(|a, b| b.score.total_cmp(&a.score));
        for n in [1, 5, 17, 100, 1000] {
            let got = Ranker::new(n).unwrap().select(&scores);
            let want: Vec<PairScore> = expected.iter().copied().take(n).collect();
            assert_eq!(got, want, "top {}", n);
        }
    }

    #[test]
    fn test_input_order_does_not_matter() {
        let mut scores = vec![ps(0, 1, 0.4), ps(0, 2, 0.4), ps(1, 2, 0.9), ps(2, 3, 0.1)];
        let forward = Ranker::new(3).unwrap().select(&scores);
        scores.reverse();
        let backward = Ranker::new(3).unwrap().select(&scores);
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_output_strictly_ordered() {
        let scores: Vec<PairScore> = (0..8).flat_map(|i| ((i + 1)..8).map(move |j| ps(i, j, ((i + j) % 3) as f64 / 3.0))).collect();
        let top = Ranker::new(12).unwrap().select(&scores);
        for w in top.windows(2) {
            assert!(rank_key(&w[0]) > rank_key(&w[1]));
        }
    }

    #[test]
    fn test_display_rounding() {
        assert_eq!(round_score(0.123456), 0.1235);
        assert_eq!(round_score(1.0), 1.0);
        let pair = RankedPair {
            ids: ("a".into(), "b".into()),
            structures: ("C".into(), "CC".into()),
            score: 2.0 / 3.0,
            indices: (0, 1),
        };
        assert_eq!(pair.display_score(), 0.6667);
        let json = serde_json::to_value(&pair).unwrap();
        assert_eq!(json["score"], serde_json::json!(0.6667));
        assert!(json.get("indices").is_none());
    }
}
