//! Coarse progress reporting.
//!
//! Gradient detection reports up to [`GRADIENT_SHARE`]; tile rendering fills
//! the rest. Reports are informational and never affect the result.

/// Fraction of a run attributed to gradient detection.
pub const GRADIENT_SHARE: f64 = 0.25;

pub trait Progress {
    /// `fraction` grows monotonically from 0 to 1.
    fn update(&mut self, fraction: f64);
}

impl<F: FnMut(f64)> Progress for F {
    fn update(&mut self, fraction: f64) {
        self(fraction)
    }
}

/// Discards all reports.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn update(&mut self, _fraction: f64) {}
}

/// Fraction for `done` of `total` rendered cells.
#[inline]
pub fn render_fraction(done: usize, total: usize) -> f64 {
    if total == 0 {
        return 1.0;
    }
    GRADIENT_SHARE + (1.0 - GRADIENT_SHARE) * done as f64 / total as f64
}
