//! # molsim Core
//!
//! Core types for the molsim similarity search:
//!
//! - [`Fingerprint`] - Fixed-length bit vector with popcount-based metrics
//! - [`Metric`] - Tanimoto and Dice similarity
//! - [`Record`] - An identifier, its structure string and optional fingerprint
//! - [`SearchConfig`] - Run configuration with defaults and validation
//! - [`StructureEncoder`] / [`StructureRenderer`] - Pluggable chemistry capabilities
//!
//! ## Example
//!
//! ```rust
//! use molsim_core::{Fingerprint, Metric};
//!
//! let a = Fingerprint::from_bits(2048, [1, 5, 9, 42]);
//! let b = Fingerprint::from_bits(2048, [1, 5, 9, 77]);
//!
//! let score = Metric::Tanimoto.similarity(&a, &b);
//! assert!((score - 0.6).abs() < 1e-9);
//! ```

pub mod capability;
pub mod config;
pub mod error;
pub mod fingerprint;
pub mod metric;
pub mod record;

pub use capability::{Depiction, ImageFormat, ImageSize, StructureEncoder, StructureRenderer};
pub use config::SearchConfig;
pub use error::{EncodeError, Error, RenderError, Result};
pub use fingerprint::Fingerprint;
pub use metric::{dice_similarity, tanimoto_similarity, Metric};
pub use record::Record;
