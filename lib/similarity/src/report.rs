//! Search report: the terminal output of a run

use crate::encode::SkippedRecord;
use crate::ranker::RankedPair;
use molsim_core::{Error, Metric, Result};
use serde::Serialize;
use std::fmt::Write;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchReport {
    pub total_records: usize,
    pub encoded_records: usize,
    pub skipped: Vec<SkippedRecord>,
    /// Number of pairs scored
    pub pair_count: usize,
    pub metric: Metric,
    pub top_n: usize,
    pub results: Vec<RankedPair>,
}

impl SearchReport {
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    pub fn summary(&self) -> String {
        format!(
            "{} of {} records skipped, {} pairs scored with {}, {} results",
            self.skipped_count(),
            self.total_records,
            self.pair_count,
            self.metric,
            self.results.len()
        )
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Fixed-width text table, one row per result
    pub fn to_table(&self) -> String {
        let id_width = self
            .results
            .iter()
            .flat_map(|r| [r.ids.0.len(), r.ids.1.len()])
            .chain([4])
            .max()
            .unwrap_or(4);

        let mut out = String::new();
        let _ = writeln!(
            out,
            "{:>4}  {:<w$}  {:<w$}  {:>6}  structures",
            "rank",
            "id 1",
            "id 2",
            "score",
            w = id_width
        );
        for (rank, r) in self.results.iter().enumerate() {
            let _ = writeln!(
                out,
                "{:>4}  {:<w$}  {:<w$}  {:>6.4}  {} | {}",
                rank + 1,
                r.ids.0,
                r.ids.1,
                r.display_score(),
                r.structures.0,
                r.structures.1,
                w = id_width
            );
        }
        let _ = writeln!(out, "{}", self.summary());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> SearchReport {
        SearchReport {
            total_records: 3,
            encoded_records: 2,
            skipped: vec![SkippedRecord {
                index: 2,
                id: "CHEMBL3".to_string(),
                reason: "invalid structure".to_string(),
            }],
            pair_count: 1,
            metric: Metric::Tanimoto,
            top_n: 10,
            results: vec![RankedPair {
                ids: ("CHEMBL1".to_string(), "CHEMBL2".to_string()),
                structures: ("CCO".to_string(), "CCN".to_string()),
                score: 1.0 / 3.0,
                indices: (0, 1),
            }],
        }
    }

    #[test]
    fn test_summary() {
        assert_eq!(
            report().summary(),
            "1 of 3 records skipped, 1 pairs scored with tanimoto, 1 results"
        );
    }

    #[test]
    fn test_json_shape() {
        let json: serde_json::Value = serde_json::from_str(&report().to_json().unwrap()).unwrap();
        assert_eq!(json["metric"], "tanimoto");
        assert_eq!(json["results"][0]["ids"][0], "CHEMBL1");
        assert_eq!(json["results"][0]["score"], 0.3333);
        assert_eq!(json["skipped"][0]["index"], 2);
    }

    #[test]
    fn test_table() {
        let table = report().to_table();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("CHEMBL1"));
        assert!(lines[1].contains("0.3333"));
        assert!(lines[1].contains("CCO | CCN"));
    }
}
