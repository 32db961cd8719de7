//! # molsim Chem
//!
//! First-party chemistry capabilities for molsim:
//!
//! - [`Molecule`] - SMILES parser producing an atom/bond graph with ring and aromaticity perception
//! - [`morgan_fingerprint`] - Morgan (ECFP-style) circular fingerprints
//! - [`MorganEncoder`] - [`StructureEncoder`](molsim_core::StructureEncoder) over SMILES
//! - [`SvgRenderer`] - [`StructureRenderer`](molsim_core::StructureRenderer) producing SVG
//!
//! ## Example
//!
//! ```rust
//! use molsim_chem::MorganEncoder;
//! use molsim_core::{Metric, StructureEncoder};
//!
//! let encoder = MorganEncoder::new(2, 2048);
//! let aspirin = encoder.encode("CC(=O)Oc1ccccc1C(=O)O").unwrap();
//! let salicylic = encoder.encode("Oc1ccccc1C(=O)O").unwrap();
//!
//! let score = Metric::Tanimoto.similarity(&aspirin, &salicylic);
//! assert!(score > 0.0 && score < 1.0);
//! assert!(encoder.encode("C1CC").is_err());
//! ```

mod aromaticity;
pub mod depict;
pub mod element;
pub mod encoder;
pub mod error;
pub mod morgan;
pub mod smiles;

pub use depict::{layout, placeholder_svg, SvgRenderer};
pub use encoder::MorganEncoder;
pub use error::SmilesError;
pub use morgan::{morgan_fingerprint, morgan_identifiers};
pub use smiles::{Atom, Bond, BondOrder, Molecule};
