//! Tiling kinds and the per-kind construction interface.
//!
//! Each kind owns two concerns: building the regular lattice for a rectangle
//! ([`Tiling::build_lattice`]) and assembling the polygons a single cell
//! emits from its (possibly localized) vertices ([`Tiling::cell_polygons`]).
use super::hexagons::Hexagons;
use super::lattice::{CellRef, Lattice};
use super::octagons::Octagons;
use super::squares::Squares;
use super::triangles::Triangles;
use crate::error::{GeometryError, MosaicError};
use crate::image::Rect;
use crate::polygon::Polygon;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TilingKind {
    Squares = 0,
    #[default]
    Hexagons = 1,
    Octagons = 2,
    Triangles = 3,
}

impl TilingKind {
    pub const ALL: [TilingKind; 4] = [
        TilingKind::Squares,
        TilingKind::Hexagons,
        TilingKind::Octagons,
        TilingKind::Triangles,
    ];

    pub fn tiling(self) -> &'static dyn Tiling {
        match self {
            TilingKind::Squares => &Squares,
            TilingKind::Hexagons => &Hexagons,
            TilingKind::Octagons => &Octagons,
            TilingKind::Triangles => &Triangles,
        }
    }
}

impl TryFrom<i32> for TilingKind {
    type Error = MosaicError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(TilingKind::Squares),
            1 => Ok(TilingKind::Hexagons),
            2 => Ok(TilingKind::Octagons),
            3 => Ok(TilingKind::Triangles),
            other => Err(MosaicError::config(
                "tiling",
                format!("unknown tiling code {other} (expected 0..=3)"),
            )),
        }
    }
}

/// Which polygon of a cell a [`CellPolygon`] is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PolygonRole {
    Square,
    MainHexagon,
    AuxiliaryHexagon,
    MainOctagon,
    AuxiliaryOctagon,
    MainSquare,
    AuxiliarySquare,
    LowerLeft,
    LowerRight,
    UpperLeft,
    UpperRight,
}

impl PolygonRole {
    /// Filler squares between octagons are never split.
    pub fn allows_split(self) -> bool {
        !matches!(self, PolygonRole::MainSquare | PolygonRole::AuxiliarySquare)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellPolygon {
    pub role: PolygonRole,
    pub polygon: Polygon,
}

impl CellPolygon {
    /// Assemble a polygon from `(d_row, d_col, corner)` lookups.
    pub(crate) fn assemble(
        role: PolygonRole,
        cell: &CellRef<'_>,
        corners: &[(isize, isize, usize)],
    ) -> Result<Self, GeometryError> {
        let mut polygon = Polygon::new();
        for &(dr, dc, k) in corners {
            polygon.push(cell.at(dr, dc, k)?)?;
        }
        Ok(Self { role, polygon })
    }
}

pub trait Tiling: Sync {
    fn kind(&self) -> TilingKind;

    /// Vertices owned by each logical cell.
    fn multiplicity(&self) -> usize;

    /// Regular (unjittered) lattice covering `rect` for the given tile size.
    fn build_lattice(&self, rect: Rect, tile_size: f64) -> Lattice;

    /// Polygons emitted by one cell, in draw order.
    fn cell_polygons(&self, cell: CellRef<'_>) -> Result<Vec<CellPolygon>, GeometryError>;
}

/// Build the regular lattice for `kind`.
pub fn build_lattice(kind: TilingKind, rect: Rect, tile_size: f64) -> Lattice {
    kind.tiling().build_lattice(rect, tile_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polygon::MAX_POINTS;

    #[test]
    fn codes_round_trip_and_reject_unknown() {
        for kind in TilingKind::ALL {
            assert_eq!(TilingKind::try_from(kind as i32).ok(), Some(kind));
        }
        assert!(matches!(
            TilingKind::try_from(4),
            Err(MosaicError::InvalidConfig { field: "tiling", .. })
        ));
        assert!(TilingKind::try_from(-1).is_err());
    }

    #[test]
    fn every_cell_of_every_kind_assembles_within_bounds() {
        let rect = Rect::new(3, 5, 97, 61);
        for kind in TilingKind::ALL {
            let tiling = kind.tiling();
            let lattice = tiling.build_lattice(rect, 12.0);
            assert_eq!(lattice.multiplicity(), tiling.multiplicity());
            for (r, c) in lattice.render_cells() {
                let polys = tiling
                    .cell_polygons(lattice.cell(r, c))
                    .unwrap_or_else(|e| panic!("{kind:?} cell ({r},{c}): {e}"));
                assert!(!polys.is_empty());
                for p in &polys {
                    assert!(p.polygon.len() >= 3 && p.polygon.len() <= MAX_POINTS);
                }
            }
        }
    }

    #[test]
    fn regular_tiles_cover_the_rect() {
        let rect = Rect::new(0, 0, 80, 80);
        for kind in TilingKind::ALL {
            let tiling = kind.tiling();
            let lattice = tiling.build_lattice(rect, 16.0);
            let mut area = 0.0;
            for (r, c) in lattice.render_cells() {
                for p in tiling.cell_polygons(lattice.cell(r, c)).expect("assembles") {
                    area += p.polygon.area();
                }
            }
            assert!(area >= 80.0 * 80.0, "{kind:?} area {area}");
        }
    }
}
