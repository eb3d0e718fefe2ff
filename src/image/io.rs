//! I/O helpers for rasters, scalar fields and JSON.
//!
//! - `load_raster`: read a PNG/JPEG/etc. into an [`OwnedRaster`], keeping the
//!   file's gray/gray+alpha/RGB/RGBA layout.
//! - `save_raster`: write an [`OwnedRaster`] (or raw block) to disk.
//! - `save_field`: write a [`ScalarField`] as an 8-bit grayscale PNG.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{ImageView, OwnedRaster, RasterSurface, ScalarField};
use image::{ColorType, GrayImage, Luma};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load an image from disk without changing its channel layout (16-bit and
/// float inputs are reduced to 8 bits).
pub fn load_raster(path: &Path) -> Result<OwnedRaster, String> {
    let img = image::open(path).map_err(|e| format!("Failed to open {}: {e}", path.display()))?;
    let (width, height) = (img.width() as usize, img.height() as usize);
    let (channels, data) = match img.color().channel_count() {
        1 => (1, img.into_luma8().into_raw()),
        2 => (2, img.into_luma_alpha8().into_raw()),
        3 => (3, img.into_rgb8().into_raw()),
        _ => (4, img.into_rgba8().into_raw()),
    };
    OwnedRaster::from_raw(width, height, channels, data)
        .map_err(|e| format!("Failed to wrap {}: {e}", path.display()))
}

/// Save an interleaved 8-bit buffer with 1..=4 channels.
pub fn save_pixels(
    data: &[u8],
    width: usize,
    height: usize,
    channels: usize,
    path: &Path,
) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let color = match channels {
        1 => ColorType::L8,
        2 => ColorType::La8,
        3 => ColorType::Rgb8,
        4 => ColorType::Rgba8,
        n => return Err(format!("Cannot save image with {n} channels")),
    };
    image::save_buffer(path, data, width as u32, height as u32, color)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

pub fn save_raster(raster: &OwnedRaster, path: &Path) -> Result<(), String> {
    save_pixels(
        raster.data(),
        raster.width(),
        raster.height(),
        raster.channels(),
        path,
    )
}

/// Save a scalar field to a grayscale PNG.
pub fn save_field(field: &ScalarField, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let mut out = GrayImage::new(field.w as u32, field.h as u32);
    for (y, row) in field.rows().enumerate() {
        for (x, &px) in row.iter().enumerate() {
            out.put_pixel(x as u32, y as u32, Luma([px]));
        }
    }
    out.save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
