//! Tile rendering: colour, coverage, bevel lighting and blending.
//!
//! - [`color`]: flat tile colour averaged over the pre-inset polygon.
//! - [`coverage`]: supersampled scanline coverage in `[0, 255]`.
//! - [`light`]: per-edge spec vectors and the bevel contribution.
//! - [`grout`]: highlight/grout colours for the surface's channel layout.
//! - [`fill`]: blend a tile into a [`TileFragment`].

pub mod color;
pub mod coverage;
pub mod fill;
pub mod grout;
pub mod light;

pub use color::average_color;
pub use coverage::{CoverageMask, SUPERSAMPLE};
pub use fill::{PixelWrite, TileFragment, TileRenderer, TileShade};
pub use grout::{luminance, GroutColors, GroutSource, Rgba};
pub use light::{light_vector, spec_vectors, Bevel, SpecVec, SurfaceKind, BEVEL_DIVISOR};
