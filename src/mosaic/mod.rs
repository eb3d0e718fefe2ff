//! The mosaic operation: parameters, per-cell processing and the pipeline
//! that drives them over a raster surface.

pub mod params;
pub mod pipeline;
pub mod process;
pub mod progress;

pub use params::{MosaicParams, SplitThresholds};
pub use pipeline::{check_request, run_mosaic, run_mosaic_preview};
pub use process::{find_poly_dir, should_split, split_polygon, PolyDirection};
pub use progress::{NoProgress, Progress};
