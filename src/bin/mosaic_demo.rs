use log::info;
use std::env;
use std::path::Path;
use tile_mosaic::config::mosaic::{load_config, MosaicToolConfig};
use tile_mosaic::image::io::{load_raster, save_pixels, save_raster, write_json_file};
use tile_mosaic::mosaic::{run_mosaic, run_mosaic_preview};
use tile_mosaic::{MosaicReport, RasterSurface};

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    let mut raster = load_raster(&config.input)?;
    let rect = config.rect_or_full(raster.width(), raster.height());
    let mut last_decile = 0;
    let mut progress = |fraction: f64| {
        let decile = (fraction * 10.0) as u32;
        if decile > last_decile {
            last_decile = decile;
            info!("mosaic: {:>3}%", decile * 10);
        }
    };

    let report = if config.preview {
        let (block, report) = run_mosaic_preview(&raster, rect, &config.params, &mut progress)
            .map_err(|e| format!("Mosaic failed: {e}"))?;
        save_pixels(&block.data, block.w, block.h, block.channels, &config.output.image)?;
        report
    } else {
        let report = run_mosaic(&mut raster, rect, &config.params, &mut progress)
            .map_err(|e| format!("Mosaic failed: {e}"))?;
        save_raster(&raster, &config.output.image)?;
        report
    };

    print_summary(&config, &report);
    if let Some(path) = &config.output.report_json {
        write_json_file(path, &report)?;
        println!("JSON report written to {}", path.display());
    }
    Ok(())
}

fn print_summary(config: &MosaicToolConfig, report: &MosaicReport) {
    let t = &report.tiles;
    let l = &report.lattice;
    println!("Mosaic summary");
    println!("  input: {} ({}x{}, {} ch)", config.input.display(), report.input.width, report.input.height, report.input.channels);
    println!("  rect: {:?}", report.input.rect);
    println!("  lattice: {:?} {}x{} (x{})", l.kind, l.rows, l.cols, l.multiplicity);
    println!(
        "  tiles: {} rendered, {} split into {} children, {} empty, {} offscreen, {} skipped",
        t.rendered, t.split, t.split_children, t.empty_children, t.offscreen, t.skipped
    );
    for stage in &report.timings.stages {
        println!("  {:<10} {:>9.3} ms", stage.label, stage.elapsed_ms);
    }
    println!("  total      {:>9.3} ms", report.timings.total_ms);
    println!("Output written to {}", config.output.image.display());
}

fn usage() -> String {
    "Usage: mosaic_demo <config.json>".to_string()
}
