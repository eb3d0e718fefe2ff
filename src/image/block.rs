//! Owned channel-interleaved pixel rectangle.
//!
//! A `PixelBlock` is what the mosaic reads out of a [`RasterSurface`] once at
//! the start of a run: the untouched source pixels for the processed rect.
//! Colour sampling and image-mode fills read from it while the output is
//! assembled in a second block, so the source is never observed half-written.
//!
//! [`RasterSurface`]: super::RasterSurface
use super::traits::{ImageView, ImageViewMut};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBlock {
    /// Block width in pixels
    pub w: usize,
    /// Block height in pixels
    pub h: usize,
    /// Interleaved channels per pixel (1..=4)
    pub channels: usize,
    /// Row-major samples, `w * h * channels` long
    pub data: Vec<u8>,
}

impl PixelBlock {
    /// Wrap existing samples. Returns `None` when the length does not match.
    pub fn from_raw(w: usize, h: usize, channels: usize, data: Vec<u8>) -> Option<Self> {
        (data.len() == w * h * channels).then_some(Self {
            w,
            h,
            channels,
            data,
        })
    }

    /// Block with every pixel set to `pixel[..channels]`.
    pub fn filled(w: usize, h: usize, channels: usize, pixel: &[u8]) -> Self {
        let mut data = Vec::with_capacity(w * h * channels);
        for _ in 0..w * h {
            data.extend_from_slice(&pixel[..channels]);
        }
        Self {
            w,
            h,
            channels,
            data,
        }
    }

    #[inline]
    pub fn offset(&self, x: usize, y: usize) -> usize {
        (y * self.w + x) * self.channels
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> &[u8] {
        let o = self.offset(x, y);
        &self.data[o..o + self.channels]
    }

    #[inline]
    pub fn pixel_mut(&mut self, x: usize, y: usize) -> &mut [u8] {
        let o = self.offset(x, y);
        let c = self.channels;
        &mut self.data[o..o + c]
    }

    /// Whether the last channel is alpha (gray+alpha or RGBA).
    #[inline]
    pub fn has_alpha(&self) -> bool {
        self.channels == 2 || self.channels == 4
    }

    /// Number of non-alpha channels.
    #[inline]
    pub fn color_channels(&self) -> usize {
        if self.has_alpha() {
            self.channels - 1
        } else {
            self.channels
        }
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }
}

impl ImageView for PixelBlock {
    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn channels(&self) -> usize {
        self.channels
    }
    #[inline]
    fn samples(&self) -> &[u8] {
        &self.data
    }
}

impl ImageViewMut for PixelBlock {
    #[inline]
    fn samples_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}
