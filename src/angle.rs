//! Angle and unit-vector utilities shared by the estimation stages.

use nalgebra::Vector3;

const MIN_NORM: f64 = 1e-12;

/// Returns the unit vector along `v`, or `None` when `v` has (near) zero length.
#[inline]
pub fn unit(v: &Vector3<f64>) -> Option<Vector3<f64>> {
    let norm = v.norm();
    if norm.is_finite() && norm > MIN_NORM {
        Some(v / norm)
    } else {
        None
    }
}

/// Computes the unsigned angle between two 3D vectors in radians.
/// Returns a value in [0, π], or `None` if either vector has zero length.
#[inline]
pub fn angle_between(a: &Vector3<f64>, b: &Vector3<f64>) -> Option<f64> {
    let ua = unit(a)?;
    let ub = unit(b)?;
    Some(ua.dot(&ub).clamp(-1.0, 1.0).acos())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn unit_rejects_zero() {
        assert!(unit(&Vector3::zeros()).is_none());
        let u = unit(&Vector3::new(0.0, 3.0, 4.0)).unwrap();
        assert!(approx_eq(u.norm(), 1.0));
        assert!(approx_eq(u.y, 0.6));
    }

    #[test]
    fn angle_between_basic() {
        let a = Vector3::new(1.0, 0.0, 0.0);
        assert!(approx_eq(angle_between(&a, &a).unwrap(), 0.0));
        assert!(approx_eq(angle_between(&a, &-a).unwrap(), PI));
        let d = Vector3::new(0.0, 0.0, 2.0);
        assert!(approx_eq(angle_between(&a, &d).unwrap(), FRAC_PI_2));
        let e = Vector3::new(1.0, 1.0, 0.0);
        assert!(approx_eq(angle_between(&a, &e).unwrap(), FRAC_PI_4));
    }

    #[test]
    fn angle_between_zero_vector_is_none() {
        let a = Vector3::new(1.0, 0.0, 0.0);
        assert!(angle_between(&a, &Vector3::zeros()).is_none());
    }
}
