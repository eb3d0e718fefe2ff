//! Scanline conversion of polygons into per-row spans.
//!
//! Vertices are truncated to integers (then multiplied by the supersampling
//! factor). Each non-horizontal edge walks its rows `[y_top, y_bottom)`,
//! sampling x at the row's half step and widening that row's `[min, max)`
//! span. Rows no edge reaches keep an empty span.
//!
//! Rows and spans are limited to a clip rectangle, so storage is bounded by
//! the clip area however far the polygon reaches beyond it.
use super::Polygon;
use crate::image::Rect;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scanlines {
    /// First row (in supersampled units)
    pub min_y: i32,
    /// Left bound of the clipped extents (in pixel units)
    pub min_x: i32,
    /// Right bound of the clipped extents (in pixel units)
    pub max_x: i32,
    /// Supersampling factor per axis
    pub supersample: i32,
    mins: Vec<i32>,
    maxs: Vec<i32>,
}

impl Scanlines {
    /// Spans of `poly` inside `clip` at `supersample`× resolution, or `None`
    /// when the polygon is empty.
    pub fn from_polygon(poly: &Polygon, supersample: i32, clip: Rect) -> Option<Self> {
        let e = poly.extents()?;
        let ss = supersample.max(1);
        let clamp_x = |v: f64| (v as i64).clamp(clip.x as i64, clip.x2() as i64) as i32;
        let clamp_y = |v: f64| (v as i64).clamp(clip.y as i64, clip.y2() as i64) as i32;
        let (min_x, max_x) = (clamp_x(e.min_x), clamp_x(e.max_x));
        let (min_y, max_y) = (clamp_y(e.min_y), clamp_y(e.max_y));
        let rows = ((max_y - min_y) * ss).max(0) as usize;

        let mut lines = Self {
            min_y: min_y * ss,
            min_x,
            max_x,
            supersample: ss,
            mins: vec![max_x * ss; rows],
            maxs: vec![min_x * ss; rows],
        };
        let ss = ss as i64;
        for (a, b) in poly.edges() {
            lines.add_segment(
                a.x as i64 * ss,
                a.y as i64 * ss,
                b.x as i64 * ss,
                b.y as i64 * ss,
            );
        }
        Some(lines)
    }

    fn add_segment(&mut self, mut x1: i64, mut y1: i64, mut x2: i64, mut y2: i64) {
        if y1 > y2 {
            std::mem::swap(&mut y1, &mut y2);
            std::mem::swap(&mut x1, &mut x2);
        }
        let ydiff = y2 - y1;
        if ydiff == 0 {
            return;
        }
        let first = self.min_y as i64;
        let end = (first + self.mins.len() as i64).min(y2);
        let xinc = (x2 - x1) as f64 / ydiff as f64;
        let mut xstart = x1 as f64 + 0.5 * xinc;
        for y in y1..end {
            if y >= first {
                let row = (y - first) as usize;
                self.mins[row] = (self.mins[row] as f64).min(xstart) as i32;
                self.maxs[row] = (self.maxs[row] as f64).max(xstart) as i32;
            }
            xstart += xinc;
        }
    }

    /// Number of (supersampled) rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.mins.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.mins.is_empty()
    }

    /// `(y, x_start, x_end)` for every row, `x_end` exclusive and both
    /// limited to the clipped columns.
    pub fn spans(&self) -> impl Iterator<Item = (i32, i32, i32)> + '_ {
        let (left, right) = (self.min_x * self.supersample, self.max_x * self.supersample);
        self.mins
            .iter()
            .zip(&self.maxs)
            .enumerate()
            .map(move |(i, (&lo, &hi))| (self.min_y + i as i32, lo.max(left), hi.min(right)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point2;

    const CLIP: Rect = Rect::new(0, 0, 64, 64);

    #[test]
    fn axis_aligned_square_spans_every_row() {
        let poly = Polygon::from_points(&[
            Point2::new(2.0, 3.0),
            Point2::new(6.0, 3.0),
            Point2::new(6.0, 7.0),
            Point2::new(2.0, 7.0),
        ])
        .expect("four points fit");
        let lines = Scanlines::from_polygon(&poly, 1, CLIP).expect("non-empty");
        let spans: Vec<_> = lines.spans().collect();
        assert_eq!(spans.len(), 4);
        for (i, &(y, lo, hi)) in spans.iter().enumerate() {
            assert_eq!(y, 3 + i as i32);
            assert_eq!((lo, hi), (2, 6));
        }
    }

    #[test]
    fn supersampled_rows_scale_with_factor() {
        let poly = Polygon::from_points(&[
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(0.0, 4.0),
        ])
        .expect("three points fit");
        let lines = Scanlines::from_polygon(&poly, 3, CLIP).expect("non-empty");
        assert_eq!(lines.len(), 12);
        let widths: Vec<i32> = lines.spans().map(|(_, lo, hi)| hi - lo).collect();
        assert!(widths.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(lines.spans().next().map(|s| s.1), Some(0));
    }

    #[test]
    fn empty_polygon_has_no_scanlines() {
        assert!(Scanlines::from_polygon(&Polygon::new(), 1, CLIP).is_none());
    }

    #[test]
    fn storage_is_bounded_by_the_clip() {
        let poly = Polygon::from_points(&[
            Point2::new(-50_000.0, -50_000.0),
            Point2::new(50_000.0, -50_000.0),
            Point2::new(50_000.0, 50_000.0),
            Point2::new(-50_000.0, 50_000.0),
        ])
        .expect("four points fit");
        let clip = Rect::new(10, 20, 30, 40);
        let lines = Scanlines::from_polygon(&poly, 3, clip).expect("non-empty");
        assert_eq!(lines.len(), 40 * 3);
        assert_eq!(lines.min_y, 60);
        for (_, lo, hi) in lines.spans() {
            assert_eq!((lo, hi), (30, 120));
        }
    }

    #[test]
    fn clipping_keeps_spans_inside_the_clip_unchanged() {
        let poly = Polygon::from_points(&[
            Point2::new(-7.0, -5.0),
            Point2::new(13.0, -3.0),
            Point2::new(9.0, 17.0),
            Point2::new(-4.0, 11.0),
        ])
        .expect("four points fit");
        let wide = Scanlines::from_polygon(&poly, 3, Rect::new(0, 0, 64, 64)).expect("non-empty");
        let narrow = Scanlines::from_polygon(&poly, 3, Rect::new(2, 4, 5, 6)).expect("non-empty");
        let wide_rows: Vec<_> = wide.spans().collect();
        for (y, lo, hi) in narrow.spans() {
            let &(_, wlo, whi) = wide_rows
                .iter()
                .find(|r| r.0 == y)
                .expect("row present in the wider clip");
            assert_eq!((lo, hi), (wlo.max(6), whi.min(21)));
        }
        assert_eq!(narrow.len(), 18);
    }
}
