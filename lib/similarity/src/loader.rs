//! CSV loader
//!
//! Reads a header row plus data rows into [`Record`]s, preserving row order.
//! Only the identifier and structure columns are read; anything else in the
//! file is ignored.

use molsim_core::{Error, Record, Result, SearchConfig};
use std::io::Read;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvLoader {
    id_column: String,
    structure_column: String,
}

impl Default for CsvLoader {
    fn default() -> Self {
        Self::from_config(&SearchConfig::default())
    }
}

impl CsvLoader {
    pub fn new(id_column: impl Into<String>, structure_column: impl Into<String>) -> Self {
        Self {
            id_column: id_column.into(),
            structure_column: structure_column.into(),
        }
    }

    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(config.id_column.clone(), config.structure_column.clone())
    }

    /// Load records from any CSV byte stream
    ///
    /// Fails with [`Error::MalformedInput`] before reading any row if either
    /// required column is absent. Short rows read missing cells as empty
    /// strings.
    pub fn load<R: Read>(&self, reader: R) -> Result<Vec<Record>> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = rdr
            .headers()
            .map_err(|e| Error::Csv(e.to_string()))?
            .clone();
        let id_idx = headers.iter().position(|h| h == self.id_column);
        let structure_idx = headers.iter().position(|h| h == self.structure_column);

        let (id_idx, structure_idx) = match (id_idx, structure_idx) {
            (Some(i), Some(s)) => (i, s),
            _ => {
                let missing: Vec<&str> = [
                    (id_idx, self.id_column.as_str()),
                    (structure_idx, self.structure_column.as_str()),
                ]
                .into_iter()
                .filter(|(idx, _)| idx.is_none())
                .map(|(_, name)| name)
                .collect();
                return Err(Error::MalformedInput(format!(
                    "missing required column(s): {}",
                    missing.join(", ")
                )));
            }
        };

        let mut records = Vec::new();
        for row in rdr.records() {
            let row = row.map_err(|e| Error::Csv(e.to_string()))?;
            records.push(Record::new(
                row.get(id_idx).unwrap_or(""),
                row.get(structure_idx).unwrap_or(""),
            ));
        }

        debug!("Loaded {} records", records.len());
        Ok(records)
    }

    pub fn load_path<P: AsRef<Path>>(&self, path: P) -> Result<Vec<Record>> {
        let file = std::fs::File::open(path)?;
        self.load(std::io::BufReader::new(file))
    }
}
