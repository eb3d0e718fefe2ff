//! Row access over contiguous 8-bit rasters.
//!
//! Both [`ScalarField`](super::ScalarField) and
//! [`PixelBlock`](super::PixelBlock) store rows back to back with no padding,
//! so a row is `width() * channels()` samples starting at
//! `y * width() * channels()`.

pub trait ImageView {
    fn width(&self) -> usize;
    fn height(&self) -> usize;

    /// Interleaved samples per pixel (1 for scalar maps).
    fn channels(&self) -> usize {
        1
    }

    /// All samples, row-major.
    fn samples(&self) -> &[u8];

    #[inline]
    fn row_len(&self) -> usize {
        self.width() * self.channels()
    }

    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        let len = self.row_len();
        &self.samples()[y * len..(y + 1) * len]
    }

    /// Samples of pixel `(x, y)`.
    #[inline]
    fn sample_at(&self, x: usize, y: usize) -> &[u8] {
        let c = self.channels();
        &self.row(y)[x * c..(x + 1) * c]
    }

    fn rows(&self) -> Rows<'_, Self>
    where
        Self: Sized,
    {
        Rows { image: self, y: 0 }
    }
}

pub trait ImageViewMut: ImageView {
    fn samples_mut(&mut self) -> &mut [u8];

    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let len = self.row_len();
        &mut self.samples_mut()[y * len..(y + 1) * len]
    }
}

/// Iterator over the rows of an [`ImageView`], top to bottom.
pub struct Rows<'a, I: ?Sized + ImageView> {
    image: &'a I,
    y: usize,
}

impl<'a, I: ImageView> Iterator for Rows<'a, I> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        if self.y >= self.image.height() {
            return None;
        }
        let y = self.y;
        self.y += 1;
        Some(self.image.row(y))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.image.height().saturating_sub(self.y);
        (left, Some(left))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::{PixelBlock, ScalarField};

    #[test]
    fn rows_of_interleaved_block_span_all_channels() {
        let block = PixelBlock::from_raw(2, 3, 2, (0..12).collect()).expect("sized block");
        let rows: Vec<&[u8]> = block.rows().collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1], &[4, 5, 6, 7]);
        assert_eq!(block.sample_at(1, 2), &[10, 11]);
    }

    #[test]
    fn row_mut_writes_through_to_field() {
        let mut field = ScalarField::filled(3, 2, 0);
        field.row_mut(1).copy_from_slice(&[7, 8, 9]);
        assert_eq!(field.get(2, 1), 9);
        assert_eq!(field.row(0), &[0, 0, 0]);
    }
}
