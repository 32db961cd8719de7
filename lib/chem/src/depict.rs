//! 2-D structure depiction as SVG
//!
//! Coordinates come from a deterministic force-directed layout: atoms start
//! on a golden-angle spiral and are relaxed with Fruchterman-Reingold forces
//! (bonded attraction, all-pairs repulsion) under a linear cooling schedule.
//! The result is scaled into the requested image with a margin.

use crate::smiles::{BondOrder, Molecule};
use molsim_core::{Depiction, ImageFormat, ImageSize, RenderError, StructureRenderer};
use std::fmt::Write;

const BOND_LENGTH: f64 = 1.0;
const DEFAULT_ITERATIONS: usize = 400;
/// Largest pixel length for one bond, so tiny molecules are not blown up
const MAX_BOND_PIXELS: f64 = 60.0;

pub type Point2 = (f64, f64);

/// Deterministic 2-D coordinates for every atom, in bond-length units
pub fn layout(mol: &Molecule, iterations: usize) -> Vec<Point2> {
    let n = mol.atom_count();
    let golden_angle = std::f64::consts::PI * (3.0 - 5f64.sqrt());
    let mut pos: Vec<Point2> = (0..n)
        .map(|i| {
            let r = BOND_LENGTH * ((i + 1) as f64).sqrt();
            let theta = i as f64 * golden_angle;
            (r * theta.cos(), r * theta.sin())
        })
        .collect();
    if n < 2 {
        return pos;
    }

    let k = BOND_LENGTH;
    let mut disp = vec![(0.0f64, 0.0f64); n];
    for step in 0..iterations {
        let temperature = 0.5 * k * (1.0 - step as f64 / iterations as f64) + 0.01;
        disp.iter_mut().for_each(|d| *d = (0.0, 0.0));

        for i in 0..n {
            for j in (i + 1)..n {
                let dx = pos[i].0 - pos[j].0;
                let dy = pos[i].1 - pos[j].1;
                let dist = (dx * dx + dy * dy).sqrt().max(1e-3);
                let force = k * k / dist;
                let (fx, fy) = (dx / dist * force, dy / dist * force);
                disp[i].0 += fx;
                disp[i].1 += fy;
                disp[j].0 -= fx;
                disp[j].1 -= fy;
            }
        }

        for bond in mol.bonds() {
            let (a, b) = (bond.begin, bond.end);
            let dx = pos[a].0 - pos[b].0;
            let dy = pos[a].1 - pos[b].1;
            let dist = (dx * dx + dy * dy).sqrt().max(1e-3);
            let force = dist * dist / k;
            let (fx, fy) = (dx / dist * force, dy / dist * force);
            disp[a].0 -= fx;
            disp[a].1 -= fy;
            disp[b].0 += fx;
            disp[b].1 += fy;
        }

        for (p, d) in pos.iter_mut().zip(&disp) {
            let len = (d.0 * d.0 + d.1 * d.1).sqrt();
            if len > 0.0 {
                let limited = len.min(temperature);
                p.0 += d.0 / len * limited;
                p.1 += d.1 / len * limited;
            }
        }
    }

    pos
}

fn element_color(atomic_number: u8) -> &'static str {
    match atomic_number {
        7 => "#3050f8",
        8 => "#ff0d0d",
        9 | 17 => "#1ff01f",
        15 => "#ff8000",
        16 => "#b2a100",
        35 => "#a62929",
        53 => "#940094",
        _ => "#000000",
    }
}

fn atom_label(mol: &Molecule, atom: usize) -> Option<String> {
    let a = &mol.atoms()[atom];
    let plain_carbon = a.atomic_number == 6 && a.charge == 0 && a.isotope == 0;
    if plain_carbon && !mol.neighbors(atom).is_empty() {
        return None;
    }

    let mut label = String::new();
    if a.isotope > 0 {
        label.push_str(&a.isotope.to_string());
    }
    label.push_str(a.symbol());
    match a.hydrogens {
        0 => {}
        1 => label.push('H'),
        h => {
            label.push('H');
            label.push_str(&h.to_string());
        }
    }
    match a.charge {
        0 => {}
        1 => label.push('+'),
        -1 => label.push('-'),
        c if c > 0 => label.push_str(&format!("{}+", c)),
        c => label.push_str(&format!("{}-", -c)),
    }
    Some(label)
}

/// Renders structures as standalone SVG documents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SvgRenderer {
    iterations: usize,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self { iterations: DEFAULT_ITERATIONS }
    }
}

impl SvgRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_iterations(iterations: usize) -> Self {
        Self { iterations }
    }

    /// Render an already parsed molecule
    pub fn render_molecule(&self, mol: &Molecule, size: ImageSize) -> Result<Depiction, RenderError> {
        if size.width == 0 || size.height == 0 {
            return Err(RenderError::InvalidSize { width: size.width, height: size.height });
        }
        let (w, h) = (size.width as f64, size.height as f64);
        let coords = layout(mol, self.iterations);

        let margin = 0.08 * w.min(h) + 12.0;
        let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
        let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for &(x, y) in &coords {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
        let span_x = (max_x - min_x).max(1e-9);
        let span_y = (max_y - min_y).max(1e-9);
        let scale = ((w - 2.0 * margin).max(1.0) / span_x)
            .min((h - 2.0 * margin).max(1.0) / span_y)
            .min(MAX_BOND_PIXELS);
        let (cx, cy) = ((min_x + max_x) / 2.0, (min_y + max_y) / 2.0);
        let to_px = |(x, y): Point2| (w / 2.0 + (x - cx) * scale, h / 2.0 + (y - cy) * scale);

        let font = (scale * 0.45).clamp(8.0, 24.0);
        let mut svg = String::with_capacity(256 + 160 * (mol.bond_count() + mol.atom_count()));
        let _ = write!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = size.width,
            h = size.height
        );
        let _ = write!(svg, r##"<rect width="100%" height="100%" fill="#ffffff"/>"##);

        for bond in mol.bonds() {
            let (x1, y1) = to_px(coords[bond.begin]);
            let (x2, y2) = to_px(coords[bond.end]);
            let (dx, dy) = (x2 - x1, y2 - y1);
            let len = (dx * dx + dy * dy).sqrt().max(1e-9);
            let (nx, ny) = (-dy / len, dx / len);

            let offsets: &[f64] = match bond.order {
                BondOrder::Single | BondOrder::Aromatic => &[0.0],
                BondOrder::Double => &[-2.5, 2.5],
                BondOrder::Triple => &[-4.0, 0.0, 4.0],
                BondOrder::Quadruple => &[-4.5, -1.5, 1.5, 4.5],
            };
            for &o in offsets {
                line(&mut svg, (x1 + nx * o, y1 + ny * o), (x2 + nx * o, y2 + ny * o), false);
            }
            if bond.order == BondOrder::Aromatic {
                let (sx, sy) = (dx * 0.15, dy * 0.15);
                line(
                    &mut svg,
                    (x1 + sx + nx * 4.0, y1 + sy + ny * 4.0),
                    (x2 - sx + nx * 4.0, y2 - sy + ny * 4.0),
                    true,
                );
            }
        }

        for (atom, &p) in coords.iter().enumerate() {
            let Some(label) = atom_label(mol, atom) else { continue };
            let (x, y) = to_px(p);
            let color = element_color(mol.atoms()[atom].atomic_number);
            let radius = font * (0.45 + 0.28 * label.len() as f64);
            let _ = write!(
                svg,
                r##"<circle cx="{x:.2}" cy="{y:.2}" r="{radius:.2}" fill="#ffffff"/>"##
            );
            let _ = write!(
                svg,
                r#"<text x="{x:.2}" y="{y:.2}" font-family="sans-serif" font-size="{font:.1}" fill="{color}" text-anchor="middle" dominant-baseline="central">{label}</text>"#
            );
        }

        svg.push_str("</svg>");
        Ok(Depiction { format: ImageFormat::Svg, size, data: svg })
    }
}

fn line(svg: &mut String, (x1, y1): Point2, (x2, y2): Point2, dashed: bool) {
    let dash = if dashed { r#" stroke-dasharray="4,3""# } else { "" };
    let _ = write!(
        svg,
        r##"<line x1="{x1:.2}" y1="{y1:.2}" x2="{x2:.2}" y2="{y2:.2}" stroke="#000000" stroke-width="2"{dash}/>"##
    );
}

impl StructureRenderer for SvgRenderer {
    fn render(&self, structure: &str, size: ImageSize) -> Result<Depiction, RenderError> {
        let mol = Molecule::parse(structure.trim())
            .map_err(|e| RenderError::InvalidStructure(e.to_string()))?;
        self.render_molecule(&mol, size)
    }
}

/// Placeholder image used when a structure cannot be drawn
pub fn placeholder_svg(size: ImageSize, message: &str) -> Depiction {
    let escaped = message
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;");
    let (w, h) = (size.width.max(1), size.height.max(1));
    let data = format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}"><rect width="100%" height="100%" fill="#f4f4f4" stroke="#bbbbbb"/><text x="{x}" y="{y}" font-family="sans-serif" font-size="12" fill="#666666" text-anchor="middle">{escaped}</text></svg>"##,
        x = w / 2,
        y = h / 2,
    );
    Depiction { format: ImageFormat::Svg, size: ImageSize::new(w, h), data }
}
