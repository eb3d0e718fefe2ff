//! Tile lattices and their polygons.
//!
//! - [`lattice`]: padded `(row, col, corner)` vertex storage.
//! - [`tiling`]: [`TilingKind`] and the [`Tiling`] construction interface.
//! - [`squares`], [`hexagons`], [`octagons`], [`triangles`]: one lattice
//!   layout and cell polygon table per kind.
//! - [`localize`]: gradient-driven vertex jitter.

pub mod hexagons;
pub mod lattice;
pub mod localize;
pub mod octagons;
pub mod squares;
pub mod tiling;
pub mod triangles;

pub use hexagons::{HexMetrics, Hexagons};
pub use lattice::{CellRef, Lattice, PAD};
pub use localize::{jitter_window, localize};
pub use octagons::Octagons;
pub use squares::Squares;
pub use tiling::{build_lattice, CellPolygon, PolygonRole, Tiling, TilingKind};
pub use triangles::Triangles;
