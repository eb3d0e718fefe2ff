use super::lattice::{CellRef, Lattice};
use super::tiling::{CellPolygon, PolygonRole, Tiling, TilingKind};
use crate::error::GeometryError;
use crate::image::Rect;
use nalgebra::Point2;

/// Truncated-square tiling. Each cell owns the eight corners of one octagon,
/// listed clockwise from the top-left of its top edge. A second octagon sits
/// diagonally between four cells and two filler squares close the gaps.
#[derive(Clone, Copy, Debug, Default)]
pub struct Octagons;

const MAIN: [(isize, isize, usize); 8] = [
    (0, 0, 0),
    (0, 0, 1),
    (0, 0, 2),
    (0, 0, 3),
    (0, 0, 4),
    (0, 0, 5),
    (0, 0, 6),
    (0, 0, 7),
];
const AUXILIARY: [(isize, isize, usize); 8] = [
    (0, 0, 3),
    (0, 1, 6),
    (0, 1, 5),
    (1, 1, 0),
    (1, 1, 7),
    (1, 0, 2),
    (1, 0, 1),
    (0, 0, 4),
];
const MAIN_SQUARE: [(isize, isize, usize); 4] = [(0, 0, 2), (0, 1, 7), (0, 1, 6), (0, 0, 3)];
const AUXILIARY_SQUARE: [(isize, isize, usize); 4] =
    [(0, 0, 5), (0, 0, 4), (1, 0, 1), (1, 0, 0)];

impl Tiling for Octagons {
    fn kind(&self) -> TilingKind {
        TilingKind::Octagons
    }

    fn multiplicity(&self) -> usize {
        8
    }

    fn build_lattice(&self, rect: Rect, tile_size: f64) -> Lattice {
        let side = tile_size / (2f64.sqrt() + 1.0);
        let leg = side * 2f64.sqrt() * 0.5;
        let period = tile_size + side;
        let rows = ((rect.h as f64 + period - 1.0) / period) as usize;
        let cols = ((rect.w as f64 + period * 2.0 - 1.0) / period) as usize;
        let mut lattice = Lattice::new(rows, cols, 8);
        let (x1, y1) = (rect.x as f64, rect.y as f64);

        let cells: Vec<_> = lattice.padded_cells().collect();
        for (pts, (i, j)) in lattice.vertices_mut().chunks_exact_mut(8).zip(cells) {
            let p0 = Point2::new(x1 + period * j as f64, y1 + period * i as f64);
            let p1 = Point2::new(p0.x + side, p0.y);
            let p2 = Point2::new(p0.x + leg + side, p0.y + leg);
            let p3 = Point2::new(p2.x, p0.y + leg + side);
            let p4 = Point2::new(p1.x, p0.y + 2.0 * leg + side);
            let p5 = Point2::new(p0.x, p4.y);
            let p6 = Point2::new(p0.x - leg, p3.y);
            let p7 = Point2::new(p6.x, p2.y);
            pts.copy_from_slice(&[p0, p1, p2, p3, p4, p5, p6, p7]);
        }
        lattice
    }

    fn cell_polygons(&self, cell: CellRef<'_>) -> Result<Vec<CellPolygon>, GeometryError> {
        Ok(vec![
            CellPolygon::assemble(PolygonRole::MainOctagon, &cell, &MAIN)?,
            CellPolygon::assemble(PolygonRole::AuxiliaryOctagon, &cell, &AUXILIARY)?,
            CellPolygon::assemble(PolygonRole::MainSquare, &cell, &MAIN_SQUARE)?,
            CellPolygon::assemble(PolygonRole::AuxiliarySquare, &cell, &AUXILIARY_SQUARE)?,
        ])
    }
}
