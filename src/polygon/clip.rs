//! Single half-plane polygon clipping.
//!
//! The kept side of a [`HalfPlane`] is where the 2D cross product
//! `dir × (p − point)` is non-negative, i.e. the left side when walking along
//! `dir`. Walking each edge `prev → cur`:
//!
//! - both outside: emit nothing
//! - both inside: emit `cur`
//! - crossing: emit the intersection, then `cur` if it is strictly inside
//!
//! A crossing edge parallel to the line (zero determinant) emits `cur`.
use super::{Polygon, Vertex};
use crate::error::GeometryError;
use nalgebra::{Point2, Vector2};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HalfPlane {
    /// Direction of the boundary line (need not be unit length)
    pub dir: Vector2<f64>,
    /// Any point on the boundary line
    pub point: Vertex,
}

impl HalfPlane {
    pub fn new(dir: Vector2<f64>, point: Vertex) -> Self {
        Self { dir, point }
    }

    /// The complementary half-plane across the point reflected through the
    /// origin, used to cut the opposite child of a split.
    pub fn mirrored(&self) -> Self {
        Self {
            dir: -self.dir,
            point: Point2::from(-self.point.coords),
        }
    }

    #[inline]
    fn side(&self, rel: Vector2<f64>) -> f64 {
        rel.x * -self.dir.y + rel.y * self.dir.x
    }
}

/// Clip `poly` to `plane`, returning the kept part (possibly empty).
pub fn clip(poly: &Polygon, plane: &HalfPlane) -> Result<Polygon, GeometryError> {
    let mut out = Polygon::new();
    for (a, b) in poly.edges() {
        clip_edge(plane, a, b, &mut out)?;
    }
    Ok(out)
}

fn clip_edge(
    plane: &HalfPlane,
    a: Vertex,
    b: Vertex,
    out: &mut Polygon,
) -> Result<(), GeometryError> {
    let p1 = a - plane.point;
    let p2 = b - plane.point;
    let side1 = plane.side(p1);
    let side2 = plane.side(p2);

    if side1 < 0.0 && side2 < 0.0 {
        return Ok(());
    }
    if side1 >= 0.0 && side2 >= 0.0 {
        return out.push(b);
    }

    let vec = p1 - p2;
    let dir = plane.dir;
    let det = dir.x * vec.y - dir.y * vec.x;
    if det == 0.0 {
        return out.push(b);
    }
    let t = (vec.y * p1.x - vec.x * p1.y) / det;
    let hit = plane.point + dir * t;

    out.push(hit)?;
    if side1 < 0.0 && side2 > 0.0 {
        out.push(b)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square_centered() -> Polygon {
        Polygon::from_points(&[
            Point2::new(-1.0, -1.0),
            Point2::new(1.0, -1.0),
            Point2::new(1.0, 1.0),
            Point2::new(-1.0, 1.0),
        ])
        .expect("four points fit")
    }

    #[test]
    fn vertical_cut_keeps_left_half() {
        let poly = unit_square_centered();
        let plane = HalfPlane::new(Vector2::new(0.0, 1.0), Point2::origin());
        let left = clip(&poly, &plane).expect("no overflow");
        assert_eq!(left.len(), 4);
        assert!(left.points().iter().all(|p| p.x <= 1e-12));
        assert!((left.area() - 2.0).abs() < 1e-12);

        let right = clip(&poly, &plane.mirrored()).expect("no overflow");
        assert!(right.points().iter().all(|p| p.x >= -1e-12));
        assert!((left.area() + right.area() - poly.area()).abs() < 1e-12);
    }

    #[test]
    fn offset_cut_leaves_a_gap() {
        let poly = unit_square_centered();
        let gap = 0.25;
        let plane = HalfPlane::new(Vector2::new(0.0, 1.0), Point2::new(-gap, 0.0));
        let left = clip(&poly, &plane).expect("no overflow");
        let right = clip(&poly, &plane.mirrored()).expect("no overflow");
        let total = left.area() + right.area();
        assert!((total - (poly.area() - 4.0 * gap)).abs() < 1e-12);
    }

    #[test]
    fn line_outside_polygon_yields_empty_or_whole() {
        let poly = unit_square_centered();
        let away = HalfPlane::new(Vector2::new(0.0, 1.0), Point2::new(-5.0, 0.0));
        assert!(clip(&poly, &away).expect("no overflow").is_empty());
        let keep_all = HalfPlane::new(Vector2::new(0.0, -1.0), Point2::new(-5.0, 0.0));
        let whole = clip(&poly, &keep_all).expect("no overflow");
        assert_eq!(whole, poly);
    }
}
