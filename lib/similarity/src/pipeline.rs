//! Loader → Encoder → Scorer → Ranker
//!
//! Each stage consumes the previous stage's value and produces a new one;
//! nothing is shared or mutated across stages.

use crate::encode::encode_records;
use crate::loader::CsvLoader;
use crate::ranker::Ranker;
use crate::report::SearchReport;
use crate::scorer::PairwiseScorer;
use molsim_chem::MorganEncoder;
use molsim_core::{Record, Result, SearchConfig, StructureEncoder};
use std::io::Read;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

pub struct SimilaritySearch {
    config: SearchConfig,
    encoder: Box<dyn StructureEncoder>,
}

impl std::fmt::Debug for SimilaritySearch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimilaritySearch")
            .field("config", &self.config)
            .field("encoder_bits", &self.encoder.n_bits())
            .finish()
    }
}

impl SimilaritySearch {
    /// Validate `config` and build a search with the Morgan encoder it describes
    pub fn new(config: SearchConfig) -> Result<Self> {
        config.validate()?;
        let encoder = Box::new(MorganEncoder::from_config(&config));
        Ok(Self { config, encoder })
    }

    /// Replace the structure encoder
    pub fn with_encoder<E: StructureEncoder + 'static>(mut self, encoder: E) -> Self {
        self.encoder = Box::new(encoder);
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Run the full pipeline over a CSV stream
    pub fn run<R: Read>(&self, reader: R) -> Result<SearchReport> {
        let records = CsvLoader::from_config(&self.config).load(reader)?;
        self.run_records(records)
    }

    pub fn run_path<P: AsRef<Path>>(&self, path: P) -> Result<SearchReport> {
        let records = CsvLoader::from_config(&self.config).load_path(path)?;
        self.run_records(records)
    }

    /// Run encoding, scoring and ranking over already loaded records
    pub fn run_records(&self, records: Vec<Record>) -> Result<SearchReport> {
        let ranker = Ranker::new(self.config.top_n)?;
        let scorer = PairwiseScorer::new(self.config.similarity_metric)
            .with_parallel(self.config.parallel);

        info!("Encoding {} records", records.len());
        let started = Instant::now();
        let encoded = encode_records(self.encoder.as_ref(), records);
        debug!("Encoding took {:?}", started.elapsed());
        info!("{}", encoded.skipped_summary());

        let started = Instant::now();
        let scores = scorer.score_all(&encoded.records);
        info!(
            "Scored {} pairs with {}{}",
            scores.len(),
            scorer.metric(),
            if self.config.parallel { " (parallel)" } else { "" }
        );
        debug!("Scoring took {:?}", started.elapsed());

        let results = ranker.rank(&scores, &encoded.records);
        info!("Selected top {} of {} pairs", results.len(), scores.len());

        let encoded_records = encoded.encoded_count();
        Ok(SearchReport {
            total_records: encoded.total(),
            encoded_records,
            skipped: encoded.skipped,
            pair_count: scores.len(),
            metric: scorer.metric(),
            top_n: ranker.top_n(),
            results,
        })
    }
}
