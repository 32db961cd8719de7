use crate::{Error, Metric, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_RADIUS: u32 = 2;
pub const DEFAULT_BITS: usize = 2048;
pub const DEFAULT_TOP_N: usize = 10;
pub const DEFAULT_ID_COLUMN: &str = "chembl_id";
pub const DEFAULT_STRUCTURE_COLUMN: &str = "canonical_smiles";

/// Configuration for a similarity search run
///
/// Every field has a default, so a JSON config file only needs the keys it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub fingerprint_radius: u32,
    pub fingerprint_bits: usize,
    pub similarity_metric: Metric,
    pub top_n: usize,
    pub id_column: String,
    pub structure_column: String,
    /// Shard the pair enumeration across a thread pool
    pub parallel: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            fingerprint_radius: DEFAULT_RADIUS,
            fingerprint_bits: DEFAULT_BITS,
            similarity_metric: Metric::Tanimoto,
            top_n: DEFAULT_TOP_N,
            id_column: DEFAULT_ID_COLUMN.to_string(),
            structure_column: DEFAULT_STRUCTURE_COLUMN.to_string(),
            parallel: false,
        }
    }
}

impl SearchConfig {
    pub fn validate(&self) -> Result<()> {
        if self.top_n == 0 {
            return Err(Error::InvalidConfig("top_n must be at least 1".to_string()));
        }
        if self.fingerprint_bits == 0 {
            return Err(Error::InvalidConfig("fingerprint_bits must be at least 1".to_string()));
        }
        if self.id_column.is_empty() || self.structure_column.is_empty() {
            return Err(Error::InvalidConfig("column names cannot be empty".to_string()));
        }
        if self.id_column == self.structure_column {
            return Err(Error::InvalidConfig(format!(
                "id and structure columns must differ, both are '{}'",
                self.id_column
            )));
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Load a JSON config file. The result is not validated.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.fingerprint_radius, 2);
        assert_eq!(config.fingerprint_bits, 2048);
        assert_eq!(config.similarity_metric, Metric::Tanimoto);
        assert_eq!(config.top_n, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_top_n_rejected() {
        let config = SearchConfig { top_n: 0, ..Default::default() };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_zero_bits_rejected() {
        let config = SearchConfig { fingerprint_bits: 0, ..Default::default() };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_same_columns_rejected() {
        let config = SearchConfig {
            structure_column: DEFAULT_ID_COLUMN.to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json() {
        let config = SearchConfig::from_json_str(r#"{"similarity_metric": "dice", "top_n": 3}"#).unwrap();
        assert_eq!(config.similarity_metric, Metric::Dice);
        assert_eq!(config.top_n, 3);
        assert_eq!(config.fingerprint_bits, DEFAULT_BITS);
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(
            SearchConfig::from_json_str(r#"{"similarity_metric": "cosine"}"#),
            Err(Error::Serialization(_))
        ));
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("search.json");
        std::fs::write(&path, r#"{"fingerprint_radius": 3}"#).unwrap();
        let config = SearchConfig::from_path(&path).unwrap();
        assert_eq!(config.fingerprint_radius, 3);
    }
}
