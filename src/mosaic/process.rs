//! Per-cell tile processing: edge direction, split decision and fills.
//!
//! For every polygon a cell emits:
//!
//! 1. draw the tile's brightness variation,
//! 2. average the biased gradient direction over the strong-magnitude pixels
//!    inside the polygon ([`find_poly_dir`]),
//! 3. split along the edge when the mean direction is strong and the strong
//!    pixels sit near the polygon centre ([`should_split`]),
//! 4. fill the whole polygon or both children. Children are never split again.
use super::params::{MosaicParams, SplitThresholds};
use crate::diagnostics::{TileDiagnostic, TileStats};
use crate::edges::GradientMaps;
use crate::error::GeometryError;
use crate::grid::{CellPolygon, Lattice, Tiling};
use crate::image::field::FIELD_BIAS;
use crate::image::Rect;
use crate::polygon::{clip, HalfPlane, Polygon, Scanlines, Vertex};
use crate::render::{average_color, TileFragment, TileRenderer, TileShade};
use nalgebra::{Point2, Vector2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Mean gradient inside one polygon.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PolyDirection {
    /// Mean biased `(h, v)` gradient of the strong pixels; `(128, 128)` when
    /// too few pixels are strong
    pub dir: Vector2<f64>,
    /// Mean position of the strong pixels; the origin when too few are strong
    pub loc: Point2<f64>,
    /// Pixels above the magnitude threshold
    pub strong: usize,
    /// Pixels of the polygon inside the rect
    pub total: usize,
}

impl PolyDirection {
    fn centred(strong: usize, total: usize) -> Self {
        Self {
            dir: Vector2::repeat(FIELD_BIAS as f64),
            loc: Point2::origin(),
            strong,
            total,
        }
    }

    /// Signed mean gradient with the bias removed.
    #[inline]
    pub fn gradient(&self) -> Vector2<f64> {
        self.dir - Vector2::repeat(FIELD_BIAS as f64)
    }

    #[inline]
    pub fn magnitude(&self) -> f64 {
        self.gradient().norm()
    }
}

/// Average the gradient direction over the strong pixels of `poly`.
///
/// The maps cover `rect` with their origin at its top-left corner.
pub fn find_poly_dir(
    poly: &Polygon,
    maps: &GradientMaps,
    rect: Rect,
    thresholds: &SplitThresholds,
) -> PolyDirection {
    let Some(lines) = Scanlines::from_polygon(poly, 1, rect) else {
        return PolyDirection::centred(0, 0);
    };
    let mut dir = Vector2::zeros();
    let mut loc = Vector2::zeros();
    let (mut strong, mut total) = (0usize, 0usize);

    for (y, lo, hi) in lines.spans() {
        for x in lo..hi {
            if !rect.contains(x as i64, y as i64) {
                continue;
            }
            let (fx, fy) = (x as usize - rect.x, y as usize - rect.y);
            if maps.magnitude.get(fx, fy) as f64 > thresholds.magnitude {
                dir += Vector2::new(maps.h_grad.get(fx, fy) as f64, maps.v_grad.get(fx, fy) as f64);
                loc += Vector2::new(x as f64, y as f64);
                strong += 1;
            }
            total += 1;
        }
    }

    if total == 0 || (strong as f64 / total as f64) <= thresholds.strong_fraction {
        return PolyDirection::centred(strong, total);
    }
    let n = strong as f64;
    PolyDirection {
        dir: dir / n,
        loc: Point2::from(loc / n),
        strong,
        total,
    }
}

/// Split when the mean gradient is strong and centred within the tile.
pub fn should_split(
    d: &PolyDirection,
    center: Vertex,
    tile_size: f64,
    thresholds: &SplitThresholds,
) -> bool {
    let distance = (d.loc - center).norm();
    d.magnitude() > thresholds.magnitude && 2.0 * distance / tile_size < thresholds.distance_ratio
}

/// Cut `poly` along the line through `center` perpendicular to `gradient`,
/// leaving a `spacing` gap on each side. Either child may come back empty.
pub fn split_polygon(
    poly: &Polygon,
    center: Vertex,
    gradient: Vector2<f64>,
    spacing: f64,
) -> Result<[Polygon; 2], GeometryError> {
    let mag = gradient.norm();
    let dir = Vector2::new(-gradient.y, gradient.x) / mag;
    let offset = Point2::new(-dir.y * spacing, dir.x * spacing);
    let plane = HalfPlane::new(dir, offset);

    let mut local = *poly;
    local.translate(-center.coords);
    let mut first = clip(&local, &plane)?;
    let mut second = clip(&local, &plane.mirrored())?;
    first.translate(center.coords);
    second.translate(center.coords);
    Ok([first, second])
}

/// Run-wide inputs shared by every cell.
#[derive(Clone, Debug)]
pub struct CellContext<'a> {
    pub renderer: TileRenderer<'a>,
    pub maps: &'a GradientMaps,
    pub params: &'a MosaicParams,
    /// Inset factor applied to every tile
    pub scale: f64,
    /// Half-gap between split children, before the inset
    pub split_spacing: f64,
    /// Render cells in the lattice, for the variation draw
    pub cell_count: usize,
    /// Cells below this draw get a brightness variation
    pub vary_cutoff: usize,
}

impl<'a> CellContext<'a> {
    pub fn new(renderer: TileRenderer<'a>, maps: &'a GradientMaps, params: &'a MosaicParams, lattice: &Lattice) -> Self {
        let scale = params.inset_scale();
        let cell_count = lattice.render_cell_count();
        Self {
            renderer,
            maps,
            params,
            scale,
            split_spacing: params.tile_spacing / (2.0 * scale),
            cell_count,
            vary_cutoff: (cell_count as f64 * params.color_variation) as usize,
        }
    }
}

/// Everything one cell produced.
#[derive(Clone, Debug, Default)]
pub struct CellOutcome {
    pub fragment: TileFragment,
    pub stats: TileStats,
    pub diagnostics: Vec<TileDiagnostic>,
}

/// Assemble, split and fill every polygon of cell `(row, col)`.
pub fn process_cell(
    ctx: &CellContext<'_>,
    tiling: &dyn Tiling,
    lattice: &Lattice,
    row: isize,
    col: isize,
    seed: u64,
) -> CellOutcome {
    let mut out = CellOutcome::default();
    out.stats.cells = 1;
    let mut rng = StdRng::seed_from_u64(seed);
    let vary = ctx.cell_count > 0 && rng.random_range(0..ctx.cell_count) < ctx.vary_cutoff;

    let polys = match tiling.cell_polygons(lattice.cell(row, col)) {
        Ok(polys) => polys,
        Err(e) => {
            out.stats.skipped += 1;
            out.diagnostics.push(TileDiagnostic {
                row,
                col,
                role: None,
                reason: e.to_string(),
            });
            return out;
        }
    };

    for cp in &polys {
        out.stats.polygons += 1;
        if let Err(e) = process_polygon(ctx, cp, vary, &mut rng, &mut out) {
            out.stats.skipped += 1;
            out.diagnostics.push(TileDiagnostic {
                row,
                col,
                role: Some(cp.role),
                reason: e.to_string(),
            });
        }
    }
    out
}

fn process_polygon(
    ctx: &CellContext<'_>,
    cp: &CellPolygon,
    vary: bool,
    rng: &mut StdRng,
    out: &mut CellOutcome,
) -> Result<(), GeometryError> {
    let params = ctx.params;
    let mut variation = if vary {
        rng.random::<f64>() * params.color_variation
    } else {
        0.0
    };
    variation *= if rng.random_range(0..2) == 1 { 127.0 } else { -127.0 };

    let poly = &cp.polygon;
    let Some(center) = poly.center() else {
        return Ok(());
    };
    let d = find_poly_dir(poly, ctx.maps, ctx.renderer.rect, &params.thresholds);
    let split = params.allow_split
        && cp.role.allows_split()
        && should_split(&d, center, params.tile_size, &params.thresholds);

    if !split {
        render_tile(ctx, poly, center, variation, rng, out);
        return Ok(());
    }

    let children = split_polygon(poly, center, d.gradient(), ctx.split_spacing)?;
    out.stats.split += 1;
    for child in &children {
        if child.is_empty() {
            out.stats.empty_children += 1;
            continue;
        }
        out.stats.split_children += 1;
        render_tile(ctx, child, center, variation, rng, out);
    }
    Ok(())
}

/// Colour `poly`, inset it about `center` and fill it.
fn render_tile(
    ctx: &CellContext<'_>,
    poly: &Polygon,
    center: Vertex,
    variation: f64,
    rng: &mut StdRng,
    out: &mut CellOutcome,
) {
    let r = &ctx.renderer;
    let shade = if ctx.params.color_averaging {
        match average_color(poly, r.source, r.rect, variation) {
            Some(col) => TileShade::Flat(col),
            None => {
                out.stats.offscreen += 1;
                return;
            }
        }
    } else {
        TileShade::Source { variation }
    };
    let mut inset = *poly;
    inset.scale_about(center, ctx.scale);
    let written = r.fill(&inset, &shade, rng, &mut out.fragment);
    if written == 0 {
        out.stats.offscreen += 1;
    } else {
        out.stats.rendered += 1;
        out.stats.pixels_written += written;
    }
}
