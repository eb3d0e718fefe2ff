use super::lattice::{CellRef, Lattice};
use super::tiling::{CellPolygon, PolygonRole, Tiling, TilingKind};
use crate::error::GeometryError;
use crate::image::Rect;
use nalgebra::Point2;

/// Brick-offset hexagons. Each cell owns the top edge `0 → 1`, the right
/// corner `2` and the left corner `3` of its main hexagon; the auxiliary
/// hexagon fills the gap towards the lower-right neighbour.
#[derive(Clone, Copy, Debug, Default)]
pub struct Hexagons;

const MAIN: [(isize, isize, usize); 6] =
    [(0, 0, 0), (0, 0, 1), (0, 0, 2), (1, 0, 1), (1, 0, 0), (0, 0, 3)];
const AUXILIARY: [(isize, isize, usize); 6] =
    [(0, 0, 2), (0, 1, 3), (1, 1, 0), (1, 1, 3), (1, 0, 2), (1, 0, 1)];

/// Hexagon dimensions derived from the tile size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HexMetrics {
    /// Half height
    pub l1: f64,
    /// Edge length
    pub l2: f64,
    /// Horizontal inset of the slanted edges
    pub l3: f64,
    /// Horizontal period of one cell (main + auxiliary)
    pub width: f64,
    /// Vertical period
    pub height: f64,
}

impl HexMetrics {
    pub fn new(tile_size: f64) -> Self {
        let sqrt3 = 3f64.sqrt();
        let l1 = tile_size / 2.0;
        Self {
            l1,
            l2: l1 * 2.0 / sqrt3,
            l3: l1 / sqrt3,
            width: 6.0 * l1 / sqrt3,
            height: tile_size,
        }
    }
}

impl Tiling for Hexagons {
    fn kind(&self) -> TilingKind {
        TilingKind::Hexagons
    }

    fn multiplicity(&self) -> usize {
        4
    }

    fn build_lattice(&self, rect: Rect, tile_size: f64) -> Lattice {
        let m = HexMetrics::new(tile_size);
        let rows = ((rect.h as f64 + m.height - 1.0) / m.height) as usize;
        let cols = ((rect.w as f64 + m.width * 2.0 - 1.0) / m.width) as usize;
        let mut lattice = Lattice::new(rows, cols, 4);
        let (x1, y1) = (rect.x as f64, rect.y as f64);

        let cells: Vec<_> = lattice.padded_cells().collect();
        for (pts, (i, j)) in lattice.vertices_mut().chunks_exact_mut(4).zip(cells) {
            let p0 = Point2::new(x1 + m.width * j as f64 + m.l3, y1 + m.height * i as f64);
            let p1 = Point2::new(p0.x + m.l2, p0.y);
            pts[0] = p0;
            pts[1] = p1;
            pts[2] = Point2::new(p1.x + m.l3, p1.y + m.l1);
            pts[3] = Point2::new(p0.x - m.l3, p0.y + m.l1);
        }
        lattice
    }

    fn cell_polygons(&self, cell: CellRef<'_>) -> Result<Vec<CellPolygon>, GeometryError> {
        Ok(vec![
            CellPolygon::assemble(PolygonRole::MainHexagon, &cell, &MAIN)?,
            CellPolygon::assemble(PolygonRole::AuxiliaryHexagon, &cell, &AUXILIARY)?,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn main_and_auxiliary_are_congruent_hexagons() {
        let lattice = Hexagons.build_lattice(Rect::new(0, 0, 100, 100), 20.0);
        let polys = Hexagons.cell_polygons(lattice.cell(1, 1)).expect("assembles");
        assert_eq!(polys.len(), 2);
        let m = HexMetrics::new(20.0);
        // Regular hexagon with height 2·l1 has area 3·l2·l1.
        let expected = 3.0 * m.l2 * m.l1;
        for p in &polys {
            assert_eq!(p.polygon.len(), 6);
            assert!((p.polygon.area() - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn auxiliary_is_offset_half_a_row() {
        let lattice = Hexagons.build_lattice(Rect::new(0, 0, 100, 100), 20.0);
        let polys = Hexagons.cell_polygons(lattice.cell(0, 0)).expect("assembles");
        let main = polys[0].polygon.center().expect("non-empty");
        let aux = polys[1].polygon.center().expect("non-empty");
        assert!((aux.y - main.y - 10.0).abs() < 1e-9);
        assert!(aux.x > main.x);
    }

    #[test]
    fn grid_covers_rect() {
        let m = HexMetrics::new(15.0);
        let lattice = Hexagons.build_lattice(Rect::new(0, 0, 100, 50), 15.0);
        assert!(lattice.rows() as f64 * m.height >= 50.0);
        assert!(lattice.cols() as f64 * m.width >= 100.0);
    }
}
