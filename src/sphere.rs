//! Deterministic sampling of points on a sphere surface.

use crate::error::SasaError;
use nalgebra::{Point3, Vector3};
use std::f64::consts::PI;

/// Golden-spiral lattice on the unit sphere.
///
/// The lattice depends only on the number of points, so it is built once
/// and then scaled and translated onto each atom's extended sphere.
#[derive(Clone, Debug)]
pub struct SphereSampler {
    unit_points: Vec<Vector3<f64>>,
}

impl SphereSampler {
    /// Build a lattice of `n` points; fails when `n` is zero.
    pub fn new(n: usize) -> Result<Self, SasaError> {
        if n == 0 {
            return Err(SasaError::InvalidParameter(
                "number of sphere points must be positive".to_string(),
            ));
        }

        let inc = PI * (3.0 - 5.0_f64.sqrt());
        let off = 2.0 / n as f64;
        let unit_points = (0..n)
            .map(|k| {
                let k = k as f64;
                let y = k * off - 1.0 + off / 2.0;
                let r = (1.0 - y * y).sqrt();
                let phi = k * inc;
                Vector3::new(phi.cos() * r, y, phi.sin() * r)
            })
            .collect();

        Ok(Self { unit_points })
    }

    /// Number of points in the lattice.
    pub fn len(&self) -> usize {
        self.unit_points.len()
    }

    /// Always false for a sampler built by [`SphereSampler::new`].
    pub fn is_empty(&self) -> bool {
        self.unit_points.is_empty()
    }

    /// Points on the sphere of `radius` around `center`, in lattice order.
    pub fn sample<'a>(
        &'a self,
        center: &'a Point3<f64>,
        radius: f64,
    ) -> impl Iterator<Item = Point3<f64>> + 'a {
        self.unit_points.iter().map(move |u| center + u * radius)
    }
}

/// Generate `n` near-uniform points on the sphere of `radius` around `center`.
pub fn sphere_points(
    center: &Point3<f64>,
    radius: f64,
    n: usize,
) -> Result<Vec<Point3<f64>>, SasaError> {
    let sampler = SphereSampler::new(n)?;
    Ok(sampler.sample(center, radius).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_lie_on_sphere() {
        let center = Point3::new(1.0, -2.0, 3.5);
        let points = sphere_points(&center, 3.4, 150).unwrap();
        assert_eq!(points.len(), 150);
        for p in &points {
            let d = (p - center).norm();
            assert!((d - 3.4).abs() < 1e-9, "Point {p} is {d} from the center");
        }
    }

    #[test]
    fn test_lattice_is_deterministic() {
        let center = Point3::new(0.3, 0.2, 0.1);
        let a = sphere_points(&center, 2.0, 97).unwrap();
        let b = sphere_points(&center, 2.0, 97).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_first_point_matches_spiral_formula() {
        let points = sphere_points(&Point3::origin(), 1.0, 4).unwrap();
        // k = 0: y = off / 2 - 1 = -0.75, phi = 0
        let r = (1.0 - 0.75_f64 * 0.75).sqrt();
        assert!((points[0].x - r).abs() < 1e-12);
        assert!((points[0].y + 0.75).abs() < 1e-12);
        assert!(points[0].z.abs() < 1e-12);
    }

    #[test]
    fn test_points_are_spread_over_both_hemispheres() {
        let points = sphere_points(&Point3::origin(), 1.0, 150).unwrap();
        let upper = points.iter().filter(|p| p.y > 0.0).count();
        assert_eq!(upper, 75);
        let centroid = points
            .iter()
            .fold(Vector3::zeros(), |acc, p| acc + p.coords)
            / points.len() as f64;
        assert!(centroid.norm() < 0.05, "Centroid too far off: {centroid}");
    }

    #[test]
    fn test_zero_points_is_invalid() {
        assert!(matches!(
            sphere_points(&Point3::origin(), 1.0, 0),
            Err(SasaError::InvalidParameter(_))
        ));
    }
}
