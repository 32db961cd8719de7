//! Encoding stage: structure strings to fingerprints
//!
//! A structure that fails to encode is a soft failure. The record stays in
//! the sequence (so pair indices keep pointing at input rows) without a
//! fingerprint, and a [`SkippedRecord`] explains why.

use molsim_core::{Record, StructureEncoder};
use serde::Serialize;
use tracing::warn;

/// A record that produced no fingerprint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRecord {
    /// Position in the loaded record sequence
    pub index: usize,
    pub id: String,
    pub reason: String,
}

/// Records after encoding plus the soft failures
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedRecords {
    pub records: Vec<Record>,
    pub skipped: Vec<SkippedRecord>,
}

impl EncodedRecords {
    pub fn total(&self) -> usize {
        self.records.len()
    }

    pub fn encoded_count(&self) -> usize {
        self.records.len() - self.skipped.len()
    }

    /// e.g. "1 of 12 records skipped"
    pub fn skipped_summary(&self) -> String {
        format!("{} of {} records skipped", self.skipped.len(), self.total())
    }
}

/// Encode every record with `encoder`
pub fn encode_records(encoder: &dyn StructureEncoder, records: Vec<Record>) -> EncodedRecords {
    let mut skipped = Vec::new();
    let records = records
        .into_iter()
        .enumerate()
        .map(|(index, record)| match encoder.encode(&record.structure) {
            Ok(fp) => record.with_fingerprint(fp),
            Err(e) => {
                warn!("Skipping record {} ({}): {}", index, record.id, e);
                skipped.push(SkippedRecord {
                    index,
                    id: record.id.clone(),
                    reason: e.to_string(),
                });
                Record { fingerprint: None, ..record }
            }
        })
        .collect();
    EncodedRecords { records, skipped }
}
