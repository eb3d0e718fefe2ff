use super::lattice::{CellRef, Lattice};
use super::tiling::{CellPolygon, PolygonRole, Tiling, TilingKind};
use crate::error::GeometryError;
use crate::image::Rect;
use nalgebra::Point2;

/// Equilateral triangles. A cell owns its top-left corner and the apex half a
/// tile to the right and one triangle height down; four triangles span two
/// triangle rows per cell row.
#[derive(Clone, Copy, Debug, Default)]
pub struct Triangles;

const LOWER_LEFT: [(isize, isize, usize); 3] = [(0, 0, 0), (0, 1, 0), (0, 0, 1)];
const LOWER_RIGHT: [(isize, isize, usize); 3] = [(0, 0, 1), (0, 1, 0), (0, 1, 1)];
const UPPER_LEFT: [(isize, isize, usize); 3] = [(0, 0, 1), (1, 1, 0), (1, 0, 0)];
const UPPER_RIGHT: [(isize, isize, usize); 3] = [(0, 0, 1), (0, 1, 1), (1, 1, 0)];

impl Tiling for Triangles {
    fn kind(&self) -> TilingKind {
        TilingKind::Triangles
    }

    fn multiplicity(&self) -> usize {
        2
    }

    fn build_lattice(&self, rect: Rect, tile_size: f64) -> Lattice {
        let mid = tile_size / 2.0;
        let height = tile_size / 2.0 * 3f64.sqrt();
        let rows = ((rect.h as f64 + 2.0 * height - 1.0) / (2.0 * height)) as usize;
        let cols = ((rect.w as f64 + tile_size - 1.0) / tile_size) as usize;
        let mut lattice = Lattice::new(rows, cols, 2);
        let (x1, y1) = (rect.x as f64, rect.y as f64);

        let cells: Vec<_> = lattice.padded_cells().collect();
        for (pts, (i, j)) in lattice.vertices_mut().chunks_exact_mut(2).zip(cells) {
            let p0 = Point2::new(x1 + tile_size * j as f64, y1 + 2.0 * height * i as f64);
            pts[0] = p0;
            pts[1] = Point2::new(p0.x + mid, p0.y + height);
        }
        lattice
    }

    fn cell_polygons(&self, cell: CellRef<'_>) -> Result<Vec<CellPolygon>, GeometryError> {
        Ok(vec![
            CellPolygon::assemble(PolygonRole::LowerLeft, &cell, &LOWER_LEFT)?,
            CellPolygon::assemble(PolygonRole::LowerRight, &cell, &LOWER_RIGHT)?,
            CellPolygon::assemble(PolygonRole::UpperLeft, &cell, &UPPER_LEFT)?,
            CellPolygon::assemble(PolygonRole::UpperRight, &cell, &UPPER_RIGHT)?,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_equal_triangles_fill_the_cell() {
        let ts = 20.0;
        let lattice = Triangles.build_lattice(Rect::new(0, 0, 100, 100), ts);
        let polys = Triangles.cell_polygons(lattice.cell(1, 1)).expect("assembles");
        assert_eq!(polys.len(), 4);
        let height = ts / 2.0 * 3f64.sqrt();
        let tri = ts * height / 2.0;
        for p in &polys {
            assert_eq!(p.polygon.len(), 3);
            assert!((p.polygon.area() - tri).abs() < 1e-9);
        }
        let total: f64 = polys.iter().map(|p| p.polygon.area()).sum();
        assert!((total - ts * 2.0 * height).abs() < 1e-9);
    }
}
