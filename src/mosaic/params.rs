//! Run parameters for one mosaic operation.
//!
//! Defaults reproduce the classic filter: 15 px hexagons with 4 px bevels,
//! 1 px grout, 0.65 neatness and light from 135°. Every run validates its
//! parameters before the surface is read.
use crate::error::MosaicError;
use crate::grid::TilingKind;
use crate::render::coverage::SUPERSAMPLE;
use crate::render::{light_vector, GroutSource, Rgba, SurfaceKind};
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Gates deciding whether a tile straddles a genuine edge.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitThresholds {
    /// Gradient magnitude a pixel (and a tile's mean direction) must exceed
    pub magnitude: f64,
    /// Minimum share of strong pixels inside a tile
    pub strong_fraction: f64,
    /// Maximum `2 · distance / tile_size` between the strong-pixel centroid
    /// and the tile centre
    pub distance_ratio: f64,
}

impl Default for SplitThresholds {
    fn default() -> Self {
        Self {
            magnitude: 7.5,
            strong_fraction: 0.1,
            distance_ratio: 0.5,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MosaicParams {
    /// Nominal tile edge in pixels
    pub tile_size: f64,
    /// Bevel depth in pixels
    pub tile_height: f64,
    /// Grout width in pixels
    pub tile_spacing: f64,
    /// 0 = fully jittered, 1 = regular lattice
    pub tile_neatness: f64,
    pub allow_split: bool,
    /// Light direction in degrees
    pub light_dir: f64,
    /// Amplitude of the per-tile brightness variation, 0..=1
    pub color_variation: f64,
    pub antialiasing: bool,
    /// Fill tiles with their average colour instead of the source pixels
    pub color_averaging: bool,
    pub tiling: TilingKind,
    pub surface: SurfaceKind,
    pub grout: GroutSource,
    pub seed: u64,
    /// σ of the edge-detection Gaussian
    pub std_dev: f64,
    pub kernel_radius: usize,
    /// Highlight colour for [`GroutSource::ForegroundBackground`]
    pub foreground: Rgba,
    /// Grout colour for [`GroutSource::ForegroundBackground`]
    pub background: Rgba,
    pub thresholds: SplitThresholds,
}

impl Default for MosaicParams {
    fn default() -> Self {
        Self {
            tile_size: 15.0,
            tile_height: 4.0,
            tile_spacing: 1.0,
            tile_neatness: 0.65,
            allow_split: true,
            light_dir: 135.0,
            color_variation: 0.2,
            antialiasing: true,
            color_averaging: true,
            tiling: TilingKind::Hexagons,
            surface: SurfaceKind::Smooth,
            grout: GroutSource::BlackWhite,
            seed: 0,
            std_dev: 1.0,
            kernel_radius: crate::edges::DEFAULT_RADIUS,
            foreground: [0, 0, 0, 255],
            background: [255, 255, 255, 255],
            thresholds: SplitThresholds::default(),
        }
    }
}

impl MosaicParams {
    pub fn validate(&self) -> Result<(), MosaicError> {
        if !self.tile_size.is_finite() || self.tile_size < 1.0 {
            return Err(MosaicError::config("tile_size", format!("{} is below 1", self.tile_size)));
        }
        non_negative("tile_height", self.tile_height)?;
        non_negative("tile_spacing", self.tile_spacing)?;
        unit_range("tile_neatness", self.tile_neatness)?;
        unit_range("color_variation", self.color_variation)?;
        if !self.light_dir.is_finite() {
            return Err(MosaicError::config("light_dir", "must be finite"));
        }
        if !self.std_dev.is_finite() || self.std_dev <= 0.0 {
            return Err(MosaicError::config("std_dev", format!("{} must be positive", self.std_dev)));
        }
        if self.kernel_radius == 0 {
            return Err(MosaicError::config("kernel_radius", "must be at least 1"));
        }
        non_negative("thresholds.magnitude", self.thresholds.magnitude)?;
        non_negative("thresholds.strong_fraction", self.thresholds.strong_fraction)?;
        non_negative("thresholds.distance_ratio", self.thresholds.distance_ratio)?;
        Ok(())
    }

    /// Inset factor towards the tile centre that opens the grout gap.
    pub fn inset_scale(&self) -> f64 {
        if self.tile_spacing > self.tile_size / 2.0 {
            0.5
        } else {
            1.0 - self.tile_spacing / self.tile_size
        }
    }

    #[inline]
    pub fn supersample(&self) -> i32 {
        if self.antialiasing {
            SUPERSAMPLE
        } else {
            1
        }
    }

    #[inline]
    pub fn light(&self) -> Vector2<f64> {
        light_vector(self.light_dir)
    }

    /// Magnitude written on the rect border, the threshold cast to a byte.
    #[inline]
    pub fn border_magnitude(&self) -> u8 {
        self.thresholds.magnitude.clamp(0.0, 255.0) as u8
    }

    /// Build parameters from the classic integer codes.
    pub fn with_codes(mut self, tiling: i32, surface: i32, grout: i32) -> Result<Self, MosaicError> {
        self.tiling = TilingKind::try_from(tiling)?;
        self.surface = SurfaceKind::try_from(surface)?;
        self.grout = GroutSource::try_from(grout)?;
        Ok(self)
    }
}

fn non_negative(field: &'static str, v: f64) -> Result<(), MosaicError> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(MosaicError::config(field, format!("{v} must be finite and non-negative")))
    }
}

fn unit_range(field: &'static str, v: f64) -> Result<(), MosaicError> {
    if (0.0..=1.0).contains(&v) {
        Ok(())
    } else {
        Err(MosaicError::config(field, format!("{v} is outside [0, 1]")))
    }
}
