//! Depictions for ranked results
//!
//! Rendering runs after ranking and never affects it: each structure gets
//! its own `Result`, and a failure is logged and left for the caller to
//! replace with a placeholder.

use crate::ranker::RankedPair;
use molsim_core::{Depiction, ImageSize, RenderError, StructureRenderer};
use tracing::warn;

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPair {
    /// 1-based rank of the pair
    pub rank: usize,
    pub first: Result<Depiction, RenderError>,
    pub second: Result<Depiction, RenderError>,
}

pub fn render_results(
    renderer: &dyn StructureRenderer,
    results: &[RankedPair],
    size: ImageSize,
) -> Vec<RenderedPair> {
    let render = |id: &str, structure: &str| {
        let out = renderer.render(structure, size);
        if let Err(e) = &out {
            warn!("Cannot depict {}: {}", id, e);
        }
        out
    };

    results
        .iter()
        .enumerate()
        .map(|(i, pair)| RenderedPair {
            rank: i + 1,
            first: render(&pair.ids.0, &pair.structures.0),
            second: render(&pair.ids.1, &pair.structures.1),
        })
        .collect()
}
