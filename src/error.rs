use crate::image::{Rect, SurfaceError};
use thiserror::Error;

/// Errors that abort a whole mosaic run.
///
/// Every variant except [`MosaicError::Surface`] is raised before the surface
/// is touched.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum MosaicError {
    #[error("invalid parameter `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("rect {rect:?} is empty or exceeds the {width}x{height} surface")]
    InvalidRect {
        rect: Rect,
        width: usize,
        height: usize,
    },

    #[error("unsupported channel count {0} (expected 1..=4)")]
    UnsupportedChannels(usize),

    #[error("surface access failed: {0}")]
    Surface(#[from] SurfaceError),

    #[error("surface returned {actual} bytes for a block needing {expected}")]
    BufferSize { expected: usize, actual: usize },
}

impl MosaicError {
    pub(crate) fn config(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

/// Per-tile geometry failures. These skip one tile and never abort a run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    #[error("polygon exceeds {max} points")]
    PolygonOverflow { max: usize },

    #[error("lattice vertex ({row}, {col}, {corner}) outside the padded grid")]
    LatticeIndex { row: isize, col: isize, corner: usize },
}
