//! # molsim
//!
//! Find the most structurally similar pairs in a set of chemical structures.
//!
//! molsim reads a CSV of identifiers and SMILES strings, encodes every
//! structure as a Morgan fingerprint, scores every unordered pair with
//! Tanimoto or Dice similarity, and returns the top N pairs.
//!
//! ## Quick Start
//!
//! ### As a CLI
//!
//! ```bash
//! molsim compounds.csv --metric dice --top-n 20 --depict-dir out/
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use molsim::prelude::*;
//!
//! let config = SearchConfig {
//!     similarity_metric: Metric::Tanimoto,
//!     top_n: 10,
//!     ..Default::default()
//! };
//! let search = SimilaritySearch::new(config).unwrap();
//! let report = search.run_path("compounds.csv").unwrap();
//!
//! for pair in &report.results {
//!     println!("{} {} {:.4}", pair.ids.0, pair.ids.1, pair.display_score());
//! }
//! println!("{}", report.summary());
//! ```
//!
//! ## Crate Structure
//!
//! - `molsim-core` - Fingerprints, metrics, records, configuration, capability traits
//! - `molsim-chem` - SMILES parsing, Morgan fingerprints, SVG depiction
//! - `molsim-similarity` - Loader, encoder stage, pairwise scorer, ranker, reports

// Re-export core types
pub use molsim_core::{
    Depiction, EncodeError, Error, Fingerprint, ImageFormat, ImageSize, Metric, Record,
    RenderError, Result, SearchConfig, StructureEncoder, StructureRenderer,
};

// Re-export chemistry
pub use molsim_chem::{Molecule, MorganEncoder, SmilesError, SvgRenderer};

// Re-export the pipeline
pub use molsim_similarity::{
    CsvLoader, PairScore, PairwiseScorer, RankedPair, Ranker, SearchReport, SimilaritySearch,
    SkippedRecord,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        CsvLoader, Error, Fingerprint, ImageSize, Metric, MorganEncoder, RankedPair, Record,
        Result, SearchConfig, SearchReport, SimilaritySearch, StructureEncoder,
        StructureRenderer, SvgRenderer,
    };
}
