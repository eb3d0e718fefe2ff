use std::env;
use std::path::Path;
use tile_mosaic::config::mosaic::load_gradient_config;
use tile_mosaic::edges::{gaussian_derivative, gradient_maps, Axis};
use tile_mosaic::image::io::{load_raster, save_field, save_pixels};
use tile_mosaic::image::{PixelBlock, RasterSurface, Rect};
use tile_mosaic::mosaic::check_request;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_gradient_config(Path::new(&config_path))?;

    let raster = load_raster(&config.input)?;
    let rect = config
        .rect
        .unwrap_or(Rect::new(0, 0, raster.width(), raster.height()));
    check_request(&raster, rect, &config.params).map_err(|e| e.to_string())?;
    let raw = raster
        .get_block(rect.x, rect.y, rect.w, rect.h)
        .map_err(|e| e.to_string())?;
    let block = PixelBlock::from_raw(rect.w, rect.h, raster.channels(), raw)
        .ok_or_else(|| "surface returned a short block".to_string())?;

    let params = &config.params;
    let dir = &config.output_dir;
    for (axis, name) in [(Axis::Horizontal, "deriv_h.png"), (Axis::Vertical, "deriv_v.png")] {
        let d = gaussian_derivative(&block, axis, params.std_dev, params.kernel_radius);
        save_pixels(&d.data, d.w, d.h, d.channels, &dir.join(name))?;
    }
    let maps = gradient_maps(&block, params.std_dev, params.kernel_radius, params.border_magnitude());
    save_field(&maps.h_grad, &dir.join("h_grad.png"))?;
    save_field(&maps.v_grad, &dir.join("v_grad.png"))?;
    save_field(&maps.magnitude, &dir.join("magnitude.png"))?;
    println!("Gradient maps written to {}", dir.display());
    Ok(())
}

fn usage() -> String {
    "Usage: gradient_dump <config.json>".to_string()
}
