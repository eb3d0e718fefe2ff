//! Owned single-channel byte map in row-major layout (stride == width).
//!
//! Holds the horizontal/vertical derivative maps and the gradient magnitude
//! map. Signed quantities are stored re-biased around 128, so a value of 128
//! means "no response".
use super::traits::{ImageView, ImageViewMut};

/// Byte value representing a zero signed response.
pub const FIELD_BIAS: i32 = 128;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScalarField {
    /// Field width in pixels
    pub w: usize,
    /// Field height in pixels
    pub h: usize,
    /// Backing storage in row-major order
    pub data: Vec<u8>,
}

impl ScalarField {
    /// Construct a field of size `w × h` filled with `value`.
    pub fn filled(w: usize, h: usize, value: u8) -> Self {
        Self {
            w,
            h,
            data: vec![value; w * h],
        }
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[self.idx(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: u8) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }

    /// Signed value at (x, y) with the 128 bias removed.
    #[inline]
    pub fn signed(&self, x: usize, y: usize) -> i32 {
        self.get(x, y) as i32 - FIELD_BIAS
    }
}

impl ImageView for ScalarField {
    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn samples(&self) -> &[u8] {
        &self.data
    }
}

impl ImageViewMut for ScalarField {
    #[inline]
    fn samples_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}
