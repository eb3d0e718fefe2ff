//! Grout colours resolved once per run.
use crate::error::MosaicError;
use crate::image::MAX_CHANNELS;
use serde::{Deserialize, Serialize};

/// An RGBA colour as configured by the caller.
pub type Rgba = [u8; 4];

/// Where the grout (`back`) and highlight (`fore`) colours come from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroutSource {
    /// White highlights over black grout
    #[default]
    BlackWhite = 0,
    /// The configured foreground/background pair
    ForegroundBackground = 1,
}

impl TryFrom<i32> for GroutSource {
    type Error = MosaicError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(GroutSource::BlackWhite),
            1 => Ok(GroutSource::ForegroundBackground),
            other => Err(MosaicError::config(
                "grout",
                format!("unknown grout colour code {other} (expected 0 or 1)"),
            )),
        }
    }
}

/// Highlight and grout colours laid out for the surface's channel count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GroutColors {
    pub channels: usize,
    pub fore: [u8; MAX_CHANNELS],
    pub back: [u8; MAX_CHANNELS],
}

impl GroutColors {
    pub fn resolve(source: GroutSource, foreground: Rgba, background: Rgba, channels: usize) -> Self {
        let (fore, back) = match source {
            GroutSource::BlackWhite => ([255, 255, 255, 255], [0, 0, 0, 255]),
            GroutSource::ForegroundBackground => (foreground, background),
        };
        Self {
            channels,
            fore: layout(fore, channels),
            back: layout(back, channels),
        }
    }

    #[inline]
    pub fn fore(&self) -> &[u8] {
        &self.fore[..self.channels]
    }

    #[inline]
    pub fn back(&self) -> &[u8] {
        &self.back[..self.channels]
    }
}

/// Rec. 709 luma of an RGB triple, rounded.
pub fn luminance(rgb: [u8; 3]) -> u8 {
    let y = 0.2126 * rgb[0] as f64 + 0.7152 * rgb[1] as f64 + 0.0722 * rgb[2] as f64;
    y.round().clamp(0.0, 255.0) as u8
}

fn layout(c: Rgba, channels: usize) -> [u8; MAX_CHANNELS] {
    let gray = luminance([c[0], c[1], c[2]]);
    match channels {
        1 => [gray, 0, 0, 0],
        2 => [gray, c[3], 0, 0],
        3 => [c[0], c[1], c[2], 0],
        _ => c,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn black_white_ignores_configured_colours() {
        let g = GroutColors::resolve(GroutSource::BlackWhite, [1, 2, 3, 4], [5, 6, 7, 8], 4);
        assert_eq!(g.fore(), &[255, 255, 255, 255]);
        assert_eq!(g.back(), &[0, 0, 0, 255]);
    }

    #[test]
    fn gray_surfaces_use_luminance() {
        let g = GroutColors::resolve(
            GroutSource::ForegroundBackground,
            [255, 0, 0, 255],
            [0, 0, 255, 128],
            2,
        );
        assert_eq!(g.fore(), &[54, 255]);
        assert_eq!(g.back(), &[18, 128]);
        let rgb = GroutColors::resolve(GroutSource::BlackWhite, [0; 4], [0; 4], 3);
        assert_eq!(rgb.back(), &[0, 0, 0]);
    }

    #[test]
    fn codes_are_checked() {
        assert_eq!(GroutSource::try_from(1).ok(), Some(GroutSource::ForegroundBackground));
        assert!(GroutSource::try_from(2).is_err());
    }
}
