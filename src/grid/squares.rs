use super::lattice::{CellRef, Lattice};
use super::tiling::{CellPolygon, PolygonRole, Tiling, TilingKind};
use crate::error::GeometryError;
use crate::image::Rect;
use nalgebra::Point2;

/// Regular square grid, one vertex per cell at the cell centre.
#[derive(Clone, Copy, Debug, Default)]
pub struct Squares;

const SQUARE: [(isize, isize, usize); 4] = [(0, 0, 0), (0, 1, 0), (1, 1, 0), (1, 0, 0)];

impl Tiling for Squares {
    fn kind(&self) -> TilingKind {
        TilingKind::Squares
    }

    fn multiplicity(&self) -> usize {
        1
    }

    fn build_lattice(&self, rect: Rect, tile_size: f64) -> Lattice {
        // Squares snap to whole pixels.
        let size = (tile_size as usize).max(1);
        let rows = rect.h.div_ceil(size);
        let cols = rect.w.div_ceil(size);
        let mut lattice = Lattice::new(rows, cols, 1);
        let half = (size / 2) as f64;
        let size = size as f64;
        let (x1, y1) = (rect.x as f64, rect.y as f64);

        let cells: Vec<_> = lattice.padded_cells().collect();
        for (v, (i, j)) in lattice.vertices_mut().iter_mut().zip(cells) {
            *v = Point2::new(x1 + j as f64 * size + half, y1 + i as f64 * size + half);
        }
        lattice
    }

    fn cell_polygons(&self, cell: CellRef<'_>) -> Result<Vec<CellPolygon>, GeometryError> {
        Ok(vec![CellPolygon::assemble(PolygonRole::Square, &cell, &SQUARE)?])
    }
}
