//! Bounded tile polygons and the geometry run on them.
//!
//! A [`Polygon`] holds at most [`MAX_POINTS`] vertices inline and is closed
//! implicitly (the last vertex connects to the first). Winding follows the
//! tiling generator; the split clipper can make a polygon non-convex in
//! principle but never self-intersecting for the supported tilings.
//!
//! - [`clip`] cuts a polygon by a single half-plane (one Sutherland–Hodgman
//!   stage).
//! - [`scan`] converts a polygon into per-row `[min, max)` spans, optionally
//!   at an integer supersampling factor.

pub mod clip;
pub mod scan;

use crate::error::GeometryError;
use nalgebra::{Point2, Vector2};

pub use clip::{clip, HalfPlane};
pub use scan::Scanlines;

/// Upper bound on vertices per polygon.
pub const MAX_POINTS: usize = 12;

pub type Vertex = Point2<f64>;

/// Axis-aligned bounds of a polygon's vertices.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extents {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Polygon {
    npts: usize,
    pts: [Vertex; MAX_POINTS],
}

impl Default for Polygon {
    fn default() -> Self {
        Self::new()
    }
}

impl Polygon {
    pub fn new() -> Self {
        Self {
            npts: 0,
            pts: [Point2::origin(); MAX_POINTS],
        }
    }

    pub fn from_points(points: &[Vertex]) -> Result<Self, GeometryError> {
        let mut poly = Self::new();
        for &p in points {
            poly.push(p)?;
        }
        Ok(poly)
    }

    /// Append a vertex, failing once [`MAX_POINTS`] is reached.
    pub fn push(&mut self, v: Vertex) -> Result<(), GeometryError> {
        if self.npts >= MAX_POINTS {
            return Err(GeometryError::PolygonOverflow { max: MAX_POINTS });
        }
        self.pts[self.npts] = v;
        self.npts += 1;
        Ok(())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.npts
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.npts == 0
    }

    #[inline]
    pub fn points(&self) -> &[Vertex] {
        &self.pts[..self.npts]
    }

    /// Edges as `(start, end)` pairs, starting with the closing edge
    /// `last → first`.
    pub fn edges(&self) -> impl Iterator<Item = (Vertex, Vertex)> + '_ {
        let pts = self.points();
        (0..pts.len()).map(move |i| {
            let prev = if i == 0 { pts[pts.len() - 1] } else { pts[i - 1] };
            (prev, pts[i])
        })
    }

    /// Arithmetic mean of the vertices (not the area centroid).
    pub fn center(&self) -> Option<Vertex> {
        if self.is_empty() {
            return None;
        }
        let sum = self
            .points()
            .iter()
            .fold(Vector2::zeros(), |acc, p| acc + p.coords);
        Some(Point2::from(sum / self.npts as f64))
    }

    pub fn extents(&self) -> Option<Extents> {
        let (first, rest) = self.points().split_first()?;
        let mut e = Extents {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        for p in rest {
            e.min_x = e.min_x.min(p.x);
            e.max_x = e.max_x.max(p.x);
            e.min_y = e.min_y.min(p.y);
            e.max_y = e.max_y.max(p.y);
        }
        Some(e)
    }

    pub fn translate(&mut self, t: Vector2<f64>) {
        for p in &mut self.pts[..self.npts] {
            *p += t;
        }
    }

    /// Scale every vertex towards (or away from) `center` by `factor`.
    pub fn scale_about(&mut self, center: Vertex, factor: f64) {
        for p in &mut self.pts[..self.npts] {
            *p = center + (*p - center) * factor;
        }
    }

    /// Absolute shoelace area.
    pub fn area(&self) -> f64 {
        let twice: f64 = self
            .edges()
            .map(|(a, b)| a.x * b.y - b.x * a.y)
            .sum();
        twice.abs() * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: f64, y: f64, s: f64) -> Polygon {
        Polygon::from_points(&[
            Point2::new(x, y),
            Point2::new(x + s, y),
            Point2::new(x + s, y + s),
            Point2::new(x, y + s),
        ])
        .expect("four points fit")
    }

    #[test]
    fn push_is_bounded() {
        let mut poly = Polygon::new();
        for i in 0..MAX_POINTS {
            poly.push(Point2::new(i as f64, 0.0)).expect("within bound");
        }
        assert_eq!(
            poly.push(Point2::new(0.0, 1.0)),
            Err(GeometryError::PolygonOverflow { max: MAX_POINTS })
        );
        assert_eq!(poly.len(), MAX_POINTS);
    }

    #[test]
    fn scale_about_center_preserves_center() {
        let mut poly = square(10.0, 20.0, 4.0);
        let c = poly.center().expect("non-empty");
        poly.scale_about(c, 0.5);
        assert_eq!(poly.center(), Some(c));
        assert!((poly.area() - 4.0).abs() < 1e-12);
        let e = poly.extents().expect("non-empty");
        assert_eq!((e.min_x, e.max_x), (11.0, 13.0));
    }

    #[test]
    fn edges_start_with_closing_edge() {
        let poly = square(0.0, 0.0, 1.0);
        let first = poly.edges().next().expect("has edges");
        assert_eq!(first, (Point2::new(0.0, 1.0), Point2::new(0.0, 0.0)));
        assert_eq!(poly.edges().count(), 4);
    }
}
