//! Gradient maps built from per-channel derivative blocks.
//!
//! - For each pixel and axis, keep the colour channel with the largest
//!   absolute signed response (`byte − 128`), stored re-biased (+128).
//! - Magnitude is `sqrt(h² + v²)` of the signed responses, truncated to a byte.
//! - Border pixels of the processed rectangle carry a fixed sentinel
//!   magnitude instead of a measured one.
//!
//! Alpha channels are ignored when picking the strongest response.
//!
//! Complexity: O(W·H·C) per axis plus one O(W·H) combine.
use super::deriv::{gaussian_derivative, Axis};
use crate::image::field::FIELD_BIAS;
use crate::image::{ImageView, ImageViewMut, PixelBlock, ScalarField};

/// Per-axis signed gradients and combined magnitude for one rectangle.
#[derive(Clone, Debug)]
pub struct GradientMaps {
    /// Strongest horizontal derivative per pixel, biased at 128
    pub h_grad: ScalarField,
    /// Strongest vertical derivative per pixel, biased at 128
    pub v_grad: ScalarField,
    /// Gradient magnitude (unbiased)
    pub magnitude: ScalarField,
}

impl GradientMaps {
    #[inline]
    pub fn width(&self) -> usize {
        self.magnitude.w
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.magnitude.h
    }
}

/// Reduce a derivative block to the strongest colour-channel response.
///
/// Ties keep the lowest channel index.
pub fn max_channel_response(deriv: &PixelBlock) -> ScalarField {
    let mut field = ScalarField::filled(deriv.w, deriv.h, FIELD_BIAS as u8);
    let colors = deriv.color_channels();
    let c = deriv.channels;
    for y in 0..deriv.h {
        let src = deriv.row(y);
        let dst = field.row_mut(y);
        for (x, out) in dst.iter_mut().enumerate() {
            let px = &src[x * c..x * c + colors];
            let mut max = 0i32;
            for &v in px {
                let val = v as i32 - FIELD_BIAS;
                if val.abs() > max.abs() {
                    max = val;
                }
            }
            *out = (max + FIELD_BIAS) as u8;
        }
    }
    field
}

/// Combine per-axis maps into a magnitude map with a `border_value` frame.
pub fn combine_magnitude(h_grad: &ScalarField, v_grad: &ScalarField, border_value: u8) -> ScalarField {
    let (w, h) = (h_grad.w, h_grad.h);
    let mut mag = ScalarField::filled(w, h, 0);
    for y in 0..h {
        let out = mag.row_mut(y);
        for (x, px) in out.iter_mut().enumerate() {
            *px = if x == 0 || y == 0 || x == w - 1 || y == h - 1 {
                border_value
            } else {
                let hv = h_grad.signed(x, y) as f64;
                let vv = v_grad.signed(x, y) as f64;
                (hv * hv + vv * vv).sqrt().min(255.0) as u8
            };
        }
    }
    mag
}

/// Compute derivative maps along both axes and their magnitude.
pub fn gradient_maps(src: &PixelBlock, sigma: f64, radius: usize, border_value: u8) -> GradientMaps {
    let h_grad = max_channel_response(&gaussian_derivative(src, Axis::Horizontal, sigma, radius));
    let v_grad = max_channel_response(&gaussian_derivative(src, Axis::Vertical, sigma, radius));
    let magnitude = combine_magnitude(&h_grad, &v_grad, border_value);
    GradientMaps {
        h_grad,
        v_grad,
        magnitude,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strongest_channel_wins_with_sign() {
        let block = PixelBlock::from_raw(2, 1, 3, vec![130, 20, 140, 128, 128, 129])
            .expect("sized block");
        let field = max_channel_response(&block);
        assert_eq!(field.get(0, 0), 20);
        assert_eq!(field.get(1, 0), 129);
    }

    #[test]
    fn alpha_channel_is_not_a_response() {
        let block = PixelBlock::from_raw(1, 1, 4, vec![130, 128, 128, 0]).expect("sized block");
        assert_eq!(max_channel_response(&block).get(0, 0), 130);
    }

    #[test]
    fn uniform_block_yields_border_frame_only() {
        let block = PixelBlock::filled(6, 5, 3, &[10, 200, 90]);
        let maps = gradient_maps(&block, 1.0, 3, 7);
        assert!(maps.h_grad.data.iter().all(|&v| v == 128));
        assert!(maps.v_grad.data.iter().all(|&v| v == 128));
        for y in 0..5 {
            for x in 0..6 {
                let border = x == 0 || y == 0 || x == 5 || y == 4;
                assert_eq!(maps.magnitude.get(x, y), if border { 7 } else { 0 });
            }
        }
    }

    #[test]
    fn magnitude_combines_signed_responses() {
        let h_grad = ScalarField::filled(3, 3, 158);
        let v_grad = ScalarField::filled(3, 3, 88);
        assert_eq!(v_grad.signed(1, 1), -40);
        let mag = combine_magnitude(&h_grad, &v_grad, 7);
        assert_eq!(mag.get(1, 1), 50);
        assert_eq!(mag.get(0, 1), 7);
    }
}
