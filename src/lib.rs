#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod diagnostics;
pub mod error;
pub mod image;
pub mod mosaic;

// Building blocks of the pipeline, public for tools and tests.
pub mod config;
pub mod edges;
pub mod grid;
pub mod polygon;
pub mod render;

// --- High-level re-exports -------------------------------------------------

pub use crate::error::{GeometryError, MosaicError};
pub use crate::grid::TilingKind;
pub use crate::image::{OwnedRaster, RasterSurface, Rect, SurfaceError};
pub use crate::mosaic::{run_mosaic, run_mosaic_preview, MosaicParams, NoProgress, Progress};
pub use crate::render::{GroutSource, SurfaceKind};

pub use crate::diagnostics::{MosaicReport, TileDiagnostic, TileStats};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use tile_mosaic::prelude::*;
///
/// # fn main() -> Result<(), MosaicError> {
/// let mut raster = OwnedRaster::filled(64, 48, 3, &[128, 128, 128]);
/// let params = MosaicParams {
///     tiling: TilingKind::Squares,
///     tile_size: 16.0,
///     ..Default::default()
/// };
/// let report = run_mosaic(&mut raster, Rect::new(0, 0, 64, 48), &params, &mut NoProgress)?;
/// println!("rendered {} tiles", report.tiles.rendered);
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::{
        run_mosaic, run_mosaic_preview, GroutSource, MosaicError, MosaicParams, MosaicReport,
        NoProgress, OwnedRaster, RasterSurface, Rect, SurfaceKind, TilingKind,
    };
}
