//! Raster containers used by the mosaic pipeline.
//!
//! - [`RasterSurface`] is the host-owned image the mosaic reads from and
//!   writes back to. [`OwnedRaster`] is the in-memory implementation used by
//!   the tools and tests.
//! - [`PixelBlock`] is an owned, channel-interleaved copy of one rectangle.
//! - [`ScalarField`] is a dense one-byte-per-pixel map (derivatives, gradient
//!   magnitude) covering the processed rectangle.
pub mod block;
pub mod field;
pub mod io;
pub mod raster;
pub mod traits;

pub use self::block::PixelBlock;
pub use self::field::ScalarField;
pub use self::raster::{OwnedRaster, RasterSurface, Rect, SurfaceError, MAX_CHANNELS};
pub use self::traits::{ImageView, ImageViewMut, Rows};
