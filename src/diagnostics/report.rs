use super::TimingBreakdown;
use crate::grid::{Lattice, PolygonRole, Tiling, TilingKind};
use crate::image::Rect;
use serde::Serialize;

/// Result of one mosaic run. Returned on success alongside the written
/// pixels; tile-level failures are listed in `diagnostics`.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MosaicReport {
    pub input: InputDescriptor,
    pub lattice: LatticeDescriptor,
    pub tiles: TileStats,
    pub diagnostics: Vec<TileDiagnostic>,
    pub timings: TimingBreakdown,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
    pub channels: usize,
    pub rect: Rect,
    pub preview: bool,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LatticeDescriptor {
    pub kind: TilingKind,
    pub rows: usize,
    pub cols: usize,
    pub multiplicity: usize,
    pub vertices: usize,
}

impl LatticeDescriptor {
    pub fn describe(tiling: &dyn Tiling, lattice: &Lattice) -> Self {
        Self {
            kind: tiling.kind(),
            rows: lattice.rows(),
            cols: lattice.cols(),
            multiplicity: lattice.multiplicity(),
            vertices: lattice.vertices().len(),
        }
    }
}

/// Tile counters accumulated over all cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TileStats {
    /// Grid cells visited
    pub cells: usize,
    /// Polygons assembled from the lattice
    pub polygons: usize,
    /// Tiles filled (whole polygons and split children)
    pub rendered: usize,
    /// Polygons cut in two along an edge
    pub split: usize,
    /// Non-empty children produced by splits
    pub split_children: usize,
    /// Children clipped away entirely
    pub empty_children: usize,
    /// Tiles covering no pixel of the rect
    pub offscreen: usize,
    /// Polygons or cells dropped by a geometry failure
    pub skipped: usize,
    /// Pixel writes, overlaps counted once per tile
    pub pixels_written: usize,
}

impl TileStats {
    pub fn merge(&mut self, other: &TileStats) {
        self.cells += other.cells;
        self.polygons += other.polygons;
        self.rendered += other.rendered;
        self.split += other.split;
        self.split_children += other.split_children;
        self.empty_children += other.empty_children;
        self.offscreen += other.offscreen;
        self.skipped += other.skipped;
        self.pixels_written += other.pixels_written;
    }
}

/// A tile that was skipped instead of rendered.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TileDiagnostic {
    pub row: isize,
    pub col: isize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<PolygonRole>,
    pub reason: String,
}

impl std::fmt::Display for TileDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.role {
            Some(role) => write!(f, "cell ({}, {}) {:?}: {}", self.row, self.col, role, self.reason),
            None => write!(f, "cell ({}, {}): {}", self.row, self.col, self.reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lattice_descriptor_names_the_building_tiling() {
        let rect = Rect::new(0, 0, 40, 30);
        for kind in TilingKind::ALL {
            let tiling = kind.tiling();
            let lattice = tiling.build_lattice(rect, 10.0);
            let d = LatticeDescriptor::describe(tiling, &lattice);
            assert_eq!(d.kind, kind);
            assert_eq!(d.vertices, (d.rows + 2) * (d.cols + 2) * d.multiplicity);
        }
    }
}
