//! Flat tile colour from the source pixels under a polygon.
use crate::image::{PixelBlock, Rect, MAX_CHANNELS};
use crate::polygon::{Polygon, Scanlines};

/// Mean colour of the source pixels covered by `poly`, restricted to `rect`.
///
/// `source` holds the pixels of `rect` with its origin at the rect's top-left.
/// Colour channels are shifted by `variation` after the (truncating) integer
/// mean and clamped; alpha is averaged only. Returns `None` when no pixel of
/// `rect` is covered.
pub fn average_color(
    poly: &Polygon,
    source: &PixelBlock,
    rect: Rect,
    variation: f64,
) -> Option<[u8; MAX_CHANNELS]> {
    let lines = Scanlines::from_polygon(poly, 1, rect)?;
    let c = source.channels;
    let colors = source.color_channels();
    let mut sum = [0u64; MAX_CHANNELS];
    let mut count = 0u64;

    for (y, lo, hi) in lines.spans() {
        let y = y as i64;
        for x in lo as i64..hi as i64 {
            if !rect.contains(x, y) {
                continue;
            }
            let px = source.pixel(x as usize - rect.x, y as usize - rect.y);
            for (s, &v) in sum.iter_mut().zip(px) {
                *s += v as u64;
            }
            count += 1;
        }
    }
    if count == 0 {
        return None;
    }

    let mut out = [0u8; MAX_CHANNELS];
    for b in 0..c {
        let mean = (sum[b] / count) as f64;
        let v = if b < colors { mean + variation } else { mean };
        out[b] = (v as i32).clamp(0, 255) as u8;
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point2;

    fn square(x: f64, y: f64, s: f64) -> Polygon {
        Polygon::from_points(&[
            Point2::new(x, y),
            Point2::new(x + s, y),
            Point2::new(x + s, y + s),
            Point2::new(x, y + s),
        ])
        .expect("fits")
    }

    fn split_block() -> PixelBlock {
        // Left half 0, right half 200, alpha 255.
        let mut block = PixelBlock::filled(10, 10, 4, &[0, 0, 0, 255]);
        for y in 0..10 {
            for x in 5..10 {
                block.pixel_mut(x, y)[..3].copy_from_slice(&[200, 200, 200]);
            }
        }
        block
    }

    #[test]
    fn averages_covered_pixels() {
        let block = split_block();
        let rect = Rect::new(0, 0, 10, 10);
        let all = average_color(&square(0.0, 0.0, 10.0), &block, rect, 0.0).expect("covered");
        assert_eq!(all, [100, 100, 100, 255]);
        let right = average_color(&square(5.0, 0.0, 5.0), &block, rect, 0.0).expect("covered");
        assert_eq!(right, [200, 200, 200, 255]);
    }

    #[test]
    fn variation_shifts_colour_but_not_alpha() {
        let block = split_block();
        let rect = Rect::new(0, 0, 10, 10);
        let dark = average_color(&square(0.0, 0.0, 5.0), &block, rect, -20.0).expect("covered");
        assert_eq!(dark, [0, 0, 0, 255]);
        let lit = average_color(&square(5.0, 0.0, 5.0), &block, rect, 80.6).expect("covered");
        assert_eq!(lit, [255, 255, 255, 255]);
    }

    #[test]
    fn polygon_outside_rect_has_no_colour() {
        let block = split_block();
        let rect = Rect::new(0, 0, 10, 10);
        assert!(average_color(&square(20.0, 20.0, 4.0), &block, rect, 0.0).is_none());
    }
}
