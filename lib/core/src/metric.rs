//! Similarity metrics over binary fingerprints
//!
//! Both metrics are symmetric and return a score in [0.0, 1.0] where 1.0
//! means identical bit sets. Two all-zero fingerprints score 0.0.

use crate::{Error, Fingerprint};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Similarity metric used by the pairwise scorer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// |A ∩ B| / |A ∪ B|
    #[default]
    Tanimoto,
    /// 2|A ∩ B| / (|A| + |B|)
    Dice,
}

impl Metric {
    pub const ALL: [Metric; 2] = [Metric::Tanimoto, Metric::Dice];

    /// Score two fingerprints with this metric
    #[inline]
    pub fn similarity(self, a: &Fingerprint, b: &Fingerprint) -> f64 {
        match self {
            Metric::Tanimoto => tanimoto_similarity(a, b),
            Metric::Dice => dice_similarity(a, b),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Metric::Tanimoto => "tanimoto",
            Metric::Dice => "dice",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Metric {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tanimoto" => Ok(Metric::Tanimoto),
            "dice" => Ok(Metric::Dice),
            other => Err(Error::InvalidConfig(format!(
                "unknown similarity metric '{}', expected tanimoto or dice",
                other
            ))),
        }
    }
}

/// Tanimoto (Jaccard) similarity between two fingerprints
#[inline]
pub fn tanimoto_similarity(a: &Fingerprint, b: &Fingerprint) -> f64 {
    a.tanimoto(b)
}

/// Dice similarity between two fingerprints
#[inline]
pub fn dice_similarity(a: &Fingerprint, b: &Fingerprint) -> f64 {
    a.dice(b)
}
