//! Separable derivative-of-Gaussian filtering of a pixel block.
//!
//! A request for one axis runs two 1D passes over every channel:
//!
//! | axis         | column pass | row pass   |
//! |--------------|-------------|------------|
//! | `Horizontal` | smoothing   | derivative |
//! | `Vertical`   | derivative  | smoothing  |
//!
//! Each pass stores bytes, so the derivative bias (+128) applied in one pass
//! is carried through the other. Borders fold missing taps onto the edge
//! sample instead of padding the block.
use super::kernel::{convolve_line, GaussianKernel, SeparableFilter};
use crate::image::PixelBlock;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Derivative of `src` along `axis`, re-biased so 128 means zero response.
pub fn gaussian_derivative(src: &PixelBlock, axis: Axis, sigma: f64, radius: usize) -> PixelBlock {
    let smoothing = GaussianKernel::smoothing(sigma, radius);
    let derivative = GaussianKernel::derivative(sigma, radius);
    let (column_filter, row_filter): (&GaussianKernel, &GaussianKernel) = match axis {
        Axis::Horizontal => (&smoothing, &derivative),
        Axis::Vertical => (&derivative, &smoothing),
    };

    let mut tmp = src.clone();
    filter_columns(src, &mut tmp, column_filter);
    let mut out = tmp.clone();
    filter_rows(&tmp, &mut out, row_filter);
    out
}

fn filter_columns<F: SeparableFilter + ?Sized>(src: &PixelBlock, dst: &mut PixelBlock, filter: &F) {
    let (w, h, c) = (src.w, src.h, src.channels);
    if w == 0 || h == 0 {
        return;
    }
    let mut line = vec![0i32; h];
    let mut out = vec![0u8; h];
    for x in 0..w {
        for ch in 0..c {
            for (y, v) in line.iter_mut().enumerate() {
                *v = src.data[(y * w + x) * c + ch] as i32;
            }
            convolve_line(filter, &line, &mut out);
            for (y, &v) in out.iter().enumerate() {
                dst.data[(y * w + x) * c + ch] = v;
            }
        }
    }
}

fn filter_rows<F: SeparableFilter + ?Sized>(src: &PixelBlock, dst: &mut PixelBlock, filter: &F) {
    let (w, h, c) = (src.w, src.h, src.channels);
    if w == 0 || h == 0 {
        return;
    }
    let mut line = vec![0i32; w];
    let mut out = vec![0u8; w];
    for y in 0..h {
        let row_start = y * w * c;
        for ch in 0..c {
            for (x, v) in line.iter_mut().enumerate() {
                *v = src.data[row_start + x * c + ch] as i32;
            }
            convolve_line(filter, &line, &mut out);
            for (x, &v) in out.iter().enumerate() {
                dst.data[row_start + x * c + ch] = v;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertical_step(w: usize, h: usize, split_x: usize) -> PixelBlock {
        let mut block = PixelBlock::filled(w, h, 3, &[0, 0, 0]);
        for y in 0..h {
            for x in split_x..w {
                block.pixel_mut(x, y).copy_from_slice(&[255, 255, 255]);
            }
        }
        block
    }

    #[test]
    fn uniform_block_has_zero_derivative() {
        let block = PixelBlock::filled(9, 7, 4, &[90, 120, 30, 255]);
        for axis in [Axis::Horizontal, Axis::Vertical] {
            let d = gaussian_derivative(&block, axis, 1.0, 3);
            assert!(d.data.iter().all(|&v| v == 128), "axis {axis:?}");
        }
    }

    #[test]
    fn vertical_edge_only_excites_horizontal_axis() {
        let block = vertical_step(16, 8, 8);
        let dh = gaussian_derivative(&block, Axis::Horizontal, 1.0, 3);
        let dv = gaussian_derivative(&block, Axis::Vertical, 1.0, 3);
        assert_eq!(dh.pixel(7, 4)[0], 255);
        assert_eq!(dh.pixel(0, 4)[0], 128);
        assert!(dv.data.iter().all(|&v| v == 128));
    }
}
