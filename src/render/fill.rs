//! Tile rasterization into per-cell fragments.
//!
//! A fill never touches the output directly: it records the blended pixels
//! in a [`TileFragment`], which the orchestrator applies in cell order. That
//! keeps overlapping grout lines resolved by draw order even when cells are
//! rendered concurrently.
use super::coverage::CoverageMask;
use super::grout::GroutColors;
use super::light::{spec_vectors, Bevel};
use crate::image::{PixelBlock, Rect, MAX_CHANNELS};
use crate::polygon::Polygon;
use nalgebra::Vector2;
use rand::Rng;

/// How a tile's base colour is obtained.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TileShade {
    /// One averaged colour for the whole tile
    Flat([u8; MAX_CHANNELS]),
    /// Each pixel keeps its source colour, brightened by `variation`
    Source { variation: f64 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelWrite {
    /// Column relative to the processed rect
    pub x: usize,
    /// Row relative to the processed rect
    pub y: usize,
    pub px: [u8; MAX_CHANNELS],
}

/// Pixels produced by one grid cell, in draw order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TileFragment {
    writes: Vec<PixelWrite>,
}

impl TileFragment {
    #[inline]
    pub fn len(&self) -> usize {
        self.writes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    pub fn writes(&self) -> &[PixelWrite] {
        &self.writes
    }

    /// Copy every write into `out`, later writes winning.
    pub fn apply(&self, out: &mut PixelBlock) {
        let c = out.channels;
        for w in &self.writes {
            out.pixel_mut(w.x, w.y).copy_from_slice(&w.px[..c]);
        }
    }
}

/// Per-run rendering state shared by all tiles.
#[derive(Clone, Debug)]
pub struct TileRenderer<'a> {
    /// Untouched source pixels of `rect`
    pub source: &'a PixelBlock,
    pub rect: Rect,
    pub grout: GroutColors,
    pub light: Vector2<f64>,
    pub bevel: Bevel,
    /// Sub-samples per axis (1 disables antialiasing)
    pub supersample: i32,
}

impl TileRenderer<'_> {
    /// Rasterize the (already inset) `poly` into `frag`. Returns the number
    /// of pixels written.
    pub fn fill<R: Rng>(
        &self,
        poly: &Polygon,
        shade: &TileShade,
        rng: &mut R,
        frag: &mut TileFragment,
    ) -> usize {
        let Some(mask) = CoverageMask::rasterize(poly, self.supersample, self.rect) else {
            return 0;
        };
        let vecs = spec_vectors(poly, &self.light);
        let c = self.source.channels;
        let colors = self.source.color_channels();
        let fore = self.grout.fore;
        let back = self.grout.back;
        let before = frag.writes.len();

        for (x, y, val) in mask.covered() {
            if !self.rect.contains(x as i64, y as i64) {
                continue;
            }
            let contrib = self.bevel.contribution(&vecs, mask.sample_point(x, y), rng);
            let rx = x as usize - self.rect.x;
            let ry = y as usize - self.rect.y;
            let val = val as i32;
            let mut px = [0u8; MAX_CHANNELS];

            match *shade {
                TileShade::Flat(col) => {
                    for b in 0..c {
                        let base = col[b] as i32;
                        let pixel = if b < colors {
                            shift(base, fore[b] as i32, back[b] as i32, contrib).clamp(0, 255)
                        } else {
                            base
                        };
                        let bk = back[b] as i32;
                        px[b] = ((pixel * val + bk * (255 - val)) / 255) as u8;
                    }
                }
                TileShade::Source { variation } => {
                    let src = self.source.pixel(rx, ry);
                    for b in 0..c {
                        let base = src[b] as i32;
                        let pixel = if b < colors {
                            let p = shift(base, fore[b] as i32, back[b] as i32, contrib);
                            ((p as f64 + variation) as i32).clamp(0, 255)
                        } else {
                            base
                        };
                        let bk = back[b] as i32;
                        px[b] = (((bk << 8) + (pixel - bk) * val) >> 8).clamp(0, 255) as u8;
                    }
                }
            }
            frag.writes.push(PixelWrite { x: rx, y: ry, px });
        }
        frag.writes.len() - before
    }
}

/// Move `base` towards `fore` (positive light) or `back` (negative light).
#[inline]
fn shift(base: i32, fore: i32, back: i32, contrib: f64) -> i32 {
    let span = if contrib < 0.0 { base - back } else { fore - base };
    base + (span as f64 * contrib) as i32
}
