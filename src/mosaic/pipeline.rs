//! Mosaic orchestration over one rectangle of a [`RasterSurface`].
//!
//! Stages, in order:
//!
//! 1. validate parameters, channel count and rect (no surface access yet),
//! 2. read the rect once and build the gradient maps,
//! 3. build the regular lattice and pull its vertices onto edges,
//! 4. process every cell into a fragment and apply the fragments in
//!    row-major cell order over a grout-filled output block,
//! 5. write the block back (or hand it out as a preview).
//!
//! All randomness derives from `params.seed`: the lattice jitter draws from
//! a master RNG, which then deals one seed per cell in row-major order. The
//! output is therefore identical with and without the `parallel` feature.
use super::params::MosaicParams;
use super::process::{process_cell, CellContext, CellOutcome};
use super::progress::{render_fraction, Progress, GRADIENT_SHARE};
use crate::diagnostics::{
    elapsed_ms, InputDescriptor, LatticeDescriptor, MosaicReport, TileStats, TimingBreakdown,
};
use crate::edges::gradient_maps;
use crate::error::MosaicError;
use crate::grid::localize;
use crate::image::{PixelBlock, RasterSurface, Rect, MAX_CHANNELS};
use crate::render::{Bevel, GroutColors, TileRenderer};
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Run the mosaic over `rect` and write the result into `surface`.
pub fn run_mosaic<S, P>(
    surface: &mut S,
    rect: Rect,
    params: &MosaicParams,
    progress: &mut P,
) -> Result<MosaicReport, MosaicError>
where
    S: RasterSurface + ?Sized,
    P: Progress + ?Sized,
{
    let (out, mut report) = render(&*surface, rect, params, progress, false)?;
    let t0 = Instant::now();
    surface.set_block(rect.x, rect.y, rect.w, rect.h, &out.data)?;
    report.timings.total_ms += report.timings.lap("write", t0);
    Ok(report)
}

/// Run the mosaic over `rect` without touching `surface`. The returned block
/// covers exactly `rect`.
pub fn run_mosaic_preview<S, P>(
    surface: &S,
    rect: Rect,
    params: &MosaicParams,
    progress: &mut P,
) -> Result<(PixelBlock, MosaicReport), MosaicError>
where
    S: RasterSurface + ?Sized,
    P: Progress + ?Sized,
{
    render(surface, rect, params, progress, true)
}

/// Reject a run before any pixel is read.
pub fn check_request<S: RasterSurface + ?Sized>(
    surface: &S,
    rect: Rect,
    params: &MosaicParams,
) -> Result<(), MosaicError> {
    params.validate()?;
    let channels = surface.channels();
    if channels == 0 || channels > MAX_CHANNELS {
        return Err(MosaicError::UnsupportedChannels(channels));
    }
    let (width, height) = (surface.width(), surface.height());
    if rect.is_empty() || !rect.fits_within(width, height) {
        return Err(MosaicError::InvalidRect {
            rect,
            width,
            height,
        });
    }
    Ok(())
}

fn render<S, P>(
    surface: &S,
    rect: Rect,
    params: &MosaicParams,
    progress: &mut P,
    preview: bool,
) -> Result<(PixelBlock, MosaicReport), MosaicError>
where
    S: RasterSurface + ?Sized,
    P: Progress + ?Sized,
{
    check_request(surface, rect, params)?;
    let total_start = Instant::now();
    let mut timings = TimingBreakdown::default();
    let channels = surface.channels();

    let t0 = Instant::now();
    let raw = surface.get_block(rect.x, rect.y, rect.w, rect.h)?;
    let expected = rect.area() * channels;
    let actual = raw.len();
    let source = PixelBlock::from_raw(rect.w, rect.h, channels, raw)
        .ok_or(MosaicError::BufferSize { expected, actual })?;
    timings.lap("read", t0);

    let t0 = Instant::now();
    progress.update(0.0);
    let maps = gradient_maps(&source, params.std_dev, params.kernel_radius, params.border_magnitude());
    let ms = timings.lap("gradients", t0);
    progress.update(GRADIENT_SHARE);
    debug!(
        "mosaic: gradients {}x{} (sigma {:.2}, radius {}) in {:.3} ms",
        rect.w, rect.h, params.std_dev, params.kernel_radius, ms
    );

    let t0 = Instant::now();
    let tiling = params.tiling.tiling();
    let mut lattice = tiling.build_lattice(rect, params.tile_size);
    let ms = timings.lap("grid", t0);
    debug!(
        "mosaic: {:?} lattice {}x{} (x{}) in {:.3} ms",
        params.tiling,
        lattice.rows(),
        lattice.cols(),
        lattice.multiplicity(),
        ms
    );

    let t0 = Instant::now();
    let mut rng = StdRng::seed_from_u64(params.seed);
    localize(
        &mut lattice,
        &maps.magnitude,
        rect,
        params.tile_size,
        params.tile_neatness,
        &mut rng,
    );
    timings.lap("localize", t0);

    let t0 = Instant::now();
    let grout = GroutColors::resolve(params.grout, params.foreground, params.background, channels);
    let renderer = TileRenderer {
        source: &source,
        rect,
        grout,
        light: params.light(),
        bevel: Bevel {
            tile_height: params.tile_height,
            surface: params.surface,
        },
        supersample: params.supersample(),
    };
    let ctx = CellContext::new(renderer, &maps, params, &lattice);
    let jobs: Vec<(isize, isize, u64)> = lattice
        .render_cells()
        .map(|(row, col)| (row, col, rng.random::<u64>()))
        .collect();

    let mut out = PixelBlock::filled(rect.w, rect.h, channels, grout.back());
    let mut stats = TileStats::default();
    let mut diagnostics = Vec::new();
    let total = jobs.len();
    let mut apply = |i: usize, outcome: CellOutcome| {
        outcome.fragment.apply(&mut out);
        stats.merge(&outcome.stats);
        for d in outcome.diagnostics {
            warn!("mosaic: skipped tile, {d}");
            diagnostics.push(d);
        }
        progress.update(render_fraction(i + 1, total));
    };

    #[cfg(feature = "parallel")]
    {
        let outcomes: Vec<CellOutcome> = jobs
            .par_iter()
            .map(|&(row, col, seed)| process_cell(&ctx, tiling, &lattice, row, col, seed))
            .collect();
        for (i, outcome) in outcomes.into_iter().enumerate() {
            apply(i, outcome);
        }
    }
    #[cfg(not(feature = "parallel"))]
    {
        for (i, &(row, col, seed)) in jobs.iter().enumerate() {
            apply(i, process_cell(&ctx, tiling, &lattice, row, col, seed));
        }
    }
    let ms = timings.lap("render", t0);
    debug!(
        "mosaic: {} cells, {} tiles rendered, {} split, {} skipped in {:.3} ms",
        stats.cells, stats.rendered, stats.split, stats.skipped, ms
    );

    timings.total_ms = elapsed_ms(total_start);
    let report = MosaicReport {
        input: InputDescriptor {
            width: surface.width(),
            height: surface.height(),
            channels,
            rect,
            preview,
        },
        lattice: LatticeDescriptor::describe(tiling, &lattice),
        tiles: stats,
        diagnostics,
        timings,
    };
    Ok((out, report))
}
