//! Host raster surface abstraction.
//!
//! The mosaic core never owns the image it works on. It talks to the host
//! through [`RasterSurface`]: query geometry, read a rectangular block, write a
//! rectangular block back. Blocks are row-major with interleaved 8-bit
//! channels.
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest supported channel count (RGBA).
pub const MAX_CHANNELS: usize = 4;

/// Axis-aligned pixel rectangle `[x, x + w) × [y, y + h)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub w: usize,
    pub h: usize,
}

impl Rect {
    pub const fn new(x: usize, y: usize, w: usize, h: usize) -> Self {
        Self { x, y, w, h }
    }

    /// Exclusive right edge.
    #[inline]
    pub fn x2(&self) -> usize {
        self.x + self.w
    }

    /// Exclusive bottom edge.
    #[inline]
    pub fn y2(&self) -> usize {
        self.y + self.h
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// Whether `self` lies entirely inside a `width × height` image.
    pub fn fits_within(&self, width: usize, height: usize) -> bool {
        self.x2() <= width && self.y2() <= height
    }

    #[inline]
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= self.x as i64 && x < self.x2() as i64 && y >= self.y as i64 && y < self.y2() as i64
    }

    #[inline]
    pub fn area(&self) -> usize {
        self.w * self.h
    }
}

#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("block {x},{y} {w}x{h} lies outside the {width}x{height} surface")]
    OutOfBounds {
        x: usize,
        y: usize,
        w: usize,
        h: usize,
        width: usize,
        height: usize,
    },
    #[error("buffer holds {actual} bytes, expected {expected}")]
    BufferLength { expected: usize, actual: usize },
}

/// Image surface the mosaic reads from and writes into.
pub trait RasterSurface {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    /// Channels per pixel; the last one is alpha when the count is even.
    fn channels(&self) -> usize;

    fn get_block(&self, x: usize, y: usize, w: usize, h: usize) -> Result<Vec<u8>, SurfaceError>;

    fn set_block(
        &mut self,
        x: usize,
        y: usize,
        w: usize,
        h: usize,
        data: &[u8],
    ) -> Result<(), SurfaceError>;

    fn get_pixel(&self, x: usize, y: usize) -> Result<Vec<u8>, SurfaceError> {
        self.get_block(x, y, 1, 1)
    }

    fn set_pixel(&mut self, x: usize, y: usize, pixel: &[u8]) -> Result<(), SurfaceError> {
        self.set_block(x, y, 1, 1, pixel)
    }
}

/// Heap-backed surface with contiguous rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OwnedRaster {
    width: usize,
    height: usize,
    channels: usize,
    data: Vec<u8>,
}

impl OwnedRaster {
    /// Surface with every pixel set to `pixel[..channels]`.
    pub fn filled(width: usize, height: usize, channels: usize, pixel: &[u8]) -> Self {
        let mut data = Vec::with_capacity(width * height * channels);
        for _ in 0..width * height {
            data.extend_from_slice(&pixel[..channels]);
        }
        Self {
            width,
            height,
            channels,
            data,
        }
    }

    pub fn from_raw(
        width: usize,
        height: usize,
        channels: usize,
        data: Vec<u8>,
    ) -> Result<Self, SurfaceError> {
        let expected = width * height * channels;
        if data.len() != expected {
            return Err(SurfaceError::BufferLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> &[u8] {
        let o = (y * self.width + x) * self.channels;
        &self.data[o..o + self.channels]
    }

    #[inline]
    pub fn pixel_mut(&mut self, x: usize, y: usize) -> &mut [u8] {
        let o = (y * self.width + x) * self.channels;
        let c = self.channels;
        &mut self.data[o..o + c]
    }

    fn check_block(&self, x: usize, y: usize, w: usize, h: usize) -> Result<(), SurfaceError> {
        if Rect::new(x, y, w, h).fits_within(self.width, self.height) {
            Ok(())
        } else {
            Err(SurfaceError::OutOfBounds {
                x,
                y,
                w,
                h,
                width: self.width,
                height: self.height,
            })
        }
    }
}

impl RasterSurface for OwnedRaster {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn channels(&self) -> usize {
        self.channels
    }

    fn get_block(&self, x: usize, y: usize, w: usize, h: usize) -> Result<Vec<u8>, SurfaceError> {
        self.check_block(x, y, w, h)?;
        let row_len = w * self.channels;
        let mut out = Vec::with_capacity(row_len * h);
        for yy in y..y + h {
            let start = (yy * self.width + x) * self.channels;
            out.extend_from_slice(&self.data[start..start + row_len]);
        }
        Ok(out)
    }

    fn set_block(
        &mut self,
        x: usize,
        y: usize,
        w: usize,
        h: usize,
        data: &[u8],
    ) -> Result<(), SurfaceError> {
        self.check_block(x, y, w, h)?;
        let row_len = w * self.channels;
        if data.len() != row_len * h {
            return Err(SurfaceError::BufferLength {
                expected: row_len * h,
                actual: data.len(),
            });
        }
        for (row, src) in data.chunks_exact(row_len.max(1)).enumerate().take(h) {
            let start = ((y + row) * self.width + x) * self.channels;
            self.data[start..start + row_len].copy_from_slice(src);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_roundtrip_preserves_neighbours() {
        let mut surface = OwnedRaster::filled(4, 3, 3, &[1, 2, 3]);
        surface
            .set_block(1, 1, 2, 1, &[9, 9, 9, 8, 8, 8])
            .expect("block inside surface");
        assert_eq!(surface.pixel(0, 1), &[1, 2, 3]);
        assert_eq!(surface.pixel(1, 1), &[9, 9, 9]);
        assert_eq!(surface.pixel(2, 1), &[8, 8, 8]);
        assert_eq!(surface.pixel(3, 1), &[1, 2, 3]);
        let block = surface.get_block(1, 1, 2, 1).expect("readable");
        assert_eq!(block, vec![9, 9, 9, 8, 8, 8]);
    }

    #[test]
    fn out_of_bounds_block_is_rejected() {
        let surface = OwnedRaster::filled(4, 4, 4, &[0, 0, 0, 255]);
        assert!(matches!(
            surface.get_block(3, 0, 2, 1),
            Err(SurfaceError::OutOfBounds { .. })
        ));
    }
}
