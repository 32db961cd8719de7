//! # molsim Similarity
//!
//! Exhaustive pairwise similarity search over a table of structures.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Loader    │────>│   Encoder   │────>│   Scorer    │────>│   Ranker    │
//! │ (csv→rows)  │     │ (row→bits)  │     │ (all pairs) │     │   (top N)   │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//!                            │                                       │
//!                      SkippedRecord                           SearchReport
//! ```
//!
//! ## Example
//!
//! ```rust
//! use molsim_similarity::SimilaritySearch;
//! use molsim_core::SearchConfig;
//!
//! let csv = "chembl_id,canonical_smiles\n\
//!            CHEMBL25,CC(=O)Oc1ccccc1C(=O)O\n\
//!            CHEMBL112,CC(=O)Nc1ccc(O)cc1\n\
//!            ASPIRIN_ALT,OC(=O)c1ccccc1OC(C)=O\n";
//!
//! let search = SimilaritySearch::new(SearchConfig::default()).unwrap();
//! let report = search.run(csv.as_bytes()).unwrap();
//!
//! assert_eq!(report.pair_count, 3);
//! assert_eq!(report.results[0].ids, ("CHEMBL25".to_string(), "ASPIRIN_ALT".to_string()));
//! assert_eq!(report.results[0].score, 1.0);
//! ```

pub mod encode;
pub mod loader;
pub mod pipeline;
pub mod ranker;
pub mod render;
pub mod report;
pub mod scorer;

pub use encode::{encode_records, EncodedRecords, SkippedRecord};
pub use loader::CsvLoader;
pub use pipeline::SimilaritySearch;
pub use ranker::{round_score, RankedPair, Ranker, DISPLAY_DECIMALS};
pub use render::{render_results, RenderedPair};
pub use report::SearchReport;
pub use scorer::{pair_count, PairScore, PairwiseScorer};
