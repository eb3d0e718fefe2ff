//! Bevel lighting per tile edge.
//!
//! Each edge of the inset polygon gets a [`SpecVec`]: its start vertex, the
//! unit normal `(−dy, dx)/r` and the normal's dot product with the light
//! vector. A pixel's contribution sums `light · falloff(dist)` over all edges,
//! where `falloff` is 1 within one pixel of the edge line, ramps linearly to 0
//! at `tile_height` and vanishes beyond. The sum is divided by
//! [`BEVEL_DIVISOR`] regardless of the edge count.
use crate::error::MosaicError;
use crate::polygon::Polygon;
use nalgebra::{Point2, Vector2};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Fixed normaliser applied to the summed edge contributions.
pub const BEVEL_DIVISOR: f64 = 4.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceKind {
    #[default]
    Smooth = 0,
    /// Edge distances are randomly shortened per pixel
    Rough = 1,
}

impl TryFrom<i32> for SurfaceKind {
    type Error = MosaicError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(SurfaceKind::Smooth),
            1 => Ok(SurfaceKind::Rough),
            other => Err(MosaicError::config(
                "surface",
                format!("unknown surface code {other} (expected 0 or 1)"),
            )),
        }
    }
}

/// Light vector for an angle in degrees: `(−cos θ, sin θ)`.
pub fn light_vector(light_dir_deg: f64) -> Vector2<f64> {
    let t = light_dir_deg.to_radians();
    Vector2::new(-t.cos(), t.sin())
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpecVec {
    pub base: Point2<f64>,
    pub norm: Vector2<f64>,
    pub light: f64,
}

impl SpecVec {
    /// Edge `start → end` with integer endpoints. A zero-length edge has a
    /// zero normal and contributes no light.
    pub fn from_edge(start: (i32, i32), end: (i32, i32), light: &Vector2<f64>) -> Self {
        let d = Vector2::new((end.0 - start.0) as f64, (end.1 - start.1) as f64);
        let r = d.norm();
        let norm = if r > 0.0 {
            Vector2::new(-d.y / r, d.x / r)
        } else {
            Vector2::zeros()
        };
        Self {
            base: Point2::new(start.0 as f64, start.1 as f64),
            norm,
            light: norm.dot(light),
        }
    }

    /// Unsigned distance from `p` to the edge's supporting line.
    #[inline]
    pub fn distance(&self, p: &Point2<f64>) -> f64 {
        (p - self.base).dot(&self.norm).abs()
    }
}

/// Spec vectors for every edge of `poly`, closing edge first. Vertices are
/// truncated to whole pixels.
pub fn spec_vectors(poly: &Polygon, light: &Vector2<f64>) -> Vec<SpecVec> {
    let snap = |p: Point2<f64>| (p.x as i32, p.y as i32);
    poly.edges()
        .map(|(a, b)| SpecVec::from_edge(snap(a), snap(b), light))
        .collect()
}

/// Bevel shading parameters shared by every tile of a run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bevel {
    pub tile_height: f64,
    pub surface: SurfaceKind,
}

impl Bevel {
    /// Summed edge contribution at `p`, in roughly `[-1, 1]`.
    pub fn contribution<R: Rng>(&self, vecs: &[SpecVec], p: Point2<f64>, rng: &mut R) -> f64 {
        let mut contrib = 0.0;
        for v in vecs {
            let mut dist = v.distance(&p);
            if self.surface == SurfaceKind::Rough {
                dist -= dist * rng.random::<f64>();
            }
            if dist < 1.0 {
                contrib += v.light;
            } else if dist <= self.tile_height {
                contrib += v.light * (1.0 - dist / self.tile_height);
            }
        }
        contrib / BEVEL_DIVISOR
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn square() -> Polygon {
        Polygon::from_points(&[
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
        ])
        .expect("four points fit")
    }

    #[test]
    fn zero_length_edge_has_no_light() {
        let v = SpecVec::from_edge((3, 3), (3, 3), &light_vector(135.0));
        assert_eq!(v.norm, Vector2::zeros());
        assert_eq!(v.light, 0.0);
    }

    #[test]
    fn normals_are_unit_and_truncated() {
        let poly = Polygon::from_points(&[
            Point2::new(0.9, 0.2),
            Point2::new(10.7, 0.9),
            Point2::new(10.2, 10.5),
        ])
        .expect("three points fit");
        let vecs = spec_vectors(&poly, &light_vector(90.0));
        assert_eq!(vecs.len(), 3);
        assert_eq!(vecs[0].base, Point2::new(10.0, 10.0));
        assert_eq!(vecs[1].base, Point2::new(0.0, 0.0));
        for v in &vecs {
            assert!((v.norm.norm() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn interior_far_from_edges_is_unlit() {
        let vecs = spec_vectors(&square(), &light_vector(135.0));
        let bevel = Bevel {
            tile_height: 2.0,
            surface: SurfaceKind::Smooth,
        };
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(bevel.contribution(&vecs, Point2::new(5.0, 5.0), &mut rng), 0.0);
    }

    #[test]
    fn opposite_edges_light_with_opposite_signs() {
        let vecs = spec_vectors(&square(), &light_vector(0.0));
        let bevel = Bevel {
            tile_height: 3.0,
            surface: SurfaceKind::Smooth,
        };
        let mut rng = StdRng::seed_from_u64(0);
        let left = bevel.contribution(&vecs, Point2::new(0.5, 5.0), &mut rng);
        let right = bevel.contribution(&vecs, Point2::new(9.5, 5.0), &mut rng);
        assert!((left + right).abs() < 1e-12);
        assert!((left.abs() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn rough_surface_is_seeded_and_bounded() {
        let vecs = spec_vectors(&square(), &light_vector(180.0));
        let rough = Bevel {
            tile_height: 4.0,
            surface: SurfaceKind::Rough,
        };
        let p = Point2::new(2.0, 5.0);
        let a = rough.contribution(&vecs, p, &mut StdRng::seed_from_u64(11));
        let b = rough.contribution(&vecs, p, &mut StdRng::seed_from_u64(11));
        assert_eq!(a, b);
        let bound: f64 = vecs.iter().map(|v| v.light.abs()).sum::<f64>() / BEVEL_DIVISOR;
        assert!(a.abs() <= bound + 1e-12);
    }
}
