//! Supersampled polygon coverage.
//!
//! The polygon is scan-converted at `ss×` resolution per axis; every covered
//! sub-sample adds 255 and each pixel's coverage is the sum over its `ss × ss`
//! sub-samples divided by `ss²`, so values stay in `[0, 255]`.
use crate::image::Rect;
use crate::polygon::{Polygon, Scanlines};
use nalgebra::Point2;

/// Sub-samples per axis when antialiasing is enabled.
pub const SUPERSAMPLE: i32 = 3;

/// Per-pixel coverage over a polygon's integer bounding box, clipped to the
/// processed rect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoverageMask {
    /// Left column of the mask (pixel units)
    pub min_x: i32,
    /// Top row of the mask (pixel units)
    pub min_y: i32,
    pub w: usize,
    pub h: usize,
    pub supersample: i32,
    data: Vec<u8>,
}

impl CoverageMask {
    pub fn rasterize(poly: &Polygon, supersample: i32, clip: Rect) -> Option<Self> {
        let lines = Scanlines::from_polygon(poly, supersample, clip)?;
        let ss = lines.supersample;
        let w = (lines.max_x - lines.min_x).max(0) as usize;
        let h = lines.len() / ss as usize;
        let min_y = lines.min_y / ss;
        let mut acc = vec![0u32; w * h];
        let sub_w = (w as i32) * ss;
        let base_x = lines.min_x * ss;

        for (i, (_, lo, hi)) in lines.spans().enumerate() {
            let row = i / ss as usize;
            let dst = &mut acc[row * w..(row + 1) * w];
            for j in lo.max(base_x)..hi.min(base_x + sub_w) {
                dst[((j - base_x) / ss) as usize] += 255;
            }
        }

        let ss2 = (ss * ss) as u32;
        Some(Self {
            min_x: lines.min_x,
            min_y,
            w,
            h,
            supersample: ss,
            data: acc.into_iter().map(|v| (v / ss2).min(255) as u8).collect(),
        })
    }

    /// Coverage at absolute pixel `(x, y)`; zero outside the mask.
    pub fn get(&self, x: i32, y: i32) -> u8 {
        let (dx, dy) = (x - self.min_x, y - self.min_y);
        if dx < 0 || dy < 0 || dx as usize >= self.w || dy as usize >= self.h {
            return 0;
        }
        self.data[dy as usize * self.w + dx as usize]
    }

    /// Point at which lighting is evaluated for pixel `(x, y)`: the pixel's
    /// left edge on its last sub-sample row.
    #[inline]
    pub fn sample_point(&self, x: i32, y: i32) -> Point2<f64> {
        let ss = self.supersample as f64;
        Point2::new(x as f64, y as f64 + (ss - 1.0) / ss)
    }

    /// Covered pixels as `(x, y, coverage)` with `coverage > 0`, row-major.
    pub fn covered(&self) -> impl Iterator<Item = (i32, i32, u8)> + '_ {
        self.data.iter().enumerate().filter(|(_, v)| **v > 0).map(move |(i, &v)| {
            let x = self.min_x + (i % self.w) as i32;
            let y = self.min_y + (i / self.w) as i32;
            (x, y, v)
        })
    }

    /// Summed coverage as a fraction of fully covered pixels.
    pub fn area(&self) -> f64 {
        self.data.iter().map(|&v| v as f64).sum::<f64>() / 255.0
    }
}
