//! Edge measurement: derivative-of-Gaussian filtering and gradient maps.
//!
//! - [`kernel`] builds the integer smoothing/derivative taps and the folded
//!   1D convolution.
//! - [`deriv`] runs the separable two-pass derivative over a pixel block.
//! - [`grad`] reduces channels to the strongest response per axis and forms
//!   the magnitude map consumed by grid localization and the split decision.
//!
//! Borders are handled by folding out-of-range taps onto the edge sample, so
//! a constant region yields exactly zero response (128 in biased form).

pub mod deriv;
pub mod grad;
pub mod kernel;

pub use deriv::{gaussian_derivative, Axis};
pub use grad::{gradient_maps, GradientMaps};
pub use kernel::{GaussianKernel, SeparableFilter, DEFAULT_RADIUS};
