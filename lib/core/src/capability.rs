//! Pluggable chemistry capabilities
//!
//! The search pipeline only needs two things from a cheminformatics toolkit:
//! turning a structure string into a fingerprint, and optionally drawing it.

use crate::error::{EncodeError, RenderError};
use crate::Fingerprint;
use serde::Serialize;

/// Converts a structure string into a fixed-length fingerprint
pub trait StructureEncoder: Send + Sync {
    /// Encode one structure. Failures are per-record and never fatal.
    fn encode(&self, structure: &str) -> Result<Fingerprint, EncodeError>;

    /// Length of every fingerprint this encoder produces
    fn n_bits(&self) -> usize;
}

/// Requested depiction size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub const fn square(side: u32) -> Self {
        Self { width: side, height: side }
    }
}

impl Default for ImageSize {
    fn default() -> Self {
        Self::square(500)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Svg,
}

impl ImageFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Svg => "svg",
        }
    }
}

/// A rendered 2-D depiction of a structure
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Depiction {
    pub format: ImageFormat,
    pub size: ImageSize,
    pub data: String,
}

/// Draws a structure string as an image
pub trait StructureRenderer: Send + Sync {
    fn render(&self, structure: &str, size: ImageSize) -> Result<Depiction, RenderError>;
}
