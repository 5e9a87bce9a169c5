//! Representative centre of a spacepoint cloud.
//!
//! Two modes are provided:
//! - [`centroid`]: plain arithmetic mean of the points.
//! - [`weighted_centroid`]: charge-weighted mean, where each point's charge is
//!   corrected for exponential signal loss during drift before weighting.
//!
//! The charge/time of a point comes from a caller-supplied [`ChargeLookup`];
//! detector conditions (electron lifetime, sampling interval) are injected as a
//! plain [`DriftConditions`] value.

use crate::error::AxisError;
use crate::types::{ChargeSample, Point};
use log::debug;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Source of the charge/time reading behind each spacepoint.
///
/// `index` is the position of `point` in the cloud being processed. Returning
/// `None` means no hit backs the point; it then contributes zero charge.
pub trait ChargeLookup {
    fn charge_sample(&self, index: usize, point: &Point) -> Option<ChargeSample>;
}

impl ChargeLookup for [ChargeSample] {
    fn charge_sample(&self, index: usize, _point: &Point) -> Option<ChargeSample> {
        self.get(index).copied()
    }
}

impl ChargeLookup for Vec<ChargeSample> {
    fn charge_sample(&self, index: usize, point: &Point) -> Option<ChargeSample> {
        self.as_slice().charge_sample(index, point)
    }
}

impl<T: ChargeLookup + ?Sized> ChargeLookup for &T {
    fn charge_sample(&self, index: usize, point: &Point) -> Option<ChargeSample> {
        (**self).charge_sample(index, point)
    }
}

/// Adapts a closure `(index, point) -> Option<ChargeSample>` into a lookup.
pub struct LookupFn<F>(pub F);

impl<F> ChargeLookup for LookupFn<F>
where
    F: Fn(usize, &Point) -> Option<ChargeSample>,
{
    fn charge_sample(&self, index: usize, point: &Point) -> Option<ChargeSample> {
        (self.0)(index, point)
    }
}

/// Detector conditions entering the drift attenuation correction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DriftConditions {
    /// Electron lifetime in milliseconds.
    pub electron_lifetime: f64,
    /// Sampling interval in microseconds per tick.
    pub sampling_interval: f64,
}

impl Default for DriftConditions {
    fn default() -> Self {
        Self {
            electron_lifetime: 3.0,
            sampling_interval: 0.5,
        }
    }
}

impl DriftConditions {
    /// Conditions for which the correction factor is exactly one.
    pub fn disabled() -> Self {
        Self {
            electron_lifetime: f64::INFINITY,
            sampling_interval: 0.0,
        }
    }

    pub fn validate(&self) -> Result<(), AxisError> {
        if self.electron_lifetime.is_nan() || self.electron_lifetime <= 0.0 {
            return Err(AxisError::Configuration {
                parameter: "electron_lifetime",
                reason: "must be positive",
            });
        }
        if !self.sampling_interval.is_finite() || self.sampling_interval < 0.0 {
            return Err(AxisError::Configuration {
                parameter: "sampling_interval",
                reason: "must be finite and non-negative",
            });
        }
        Ok(())
    }

    /// `exp(sampling_interval * time / (electron_lifetime * 1000))`.
    #[inline]
    pub fn lifetime_correction(&self, time: f64) -> f64 {
        (self.sampling_interval * time / (self.electron_lifetime * 1e3)).exp()
    }

    #[inline]
    pub fn correct_charge(&self, sample: &ChargeSample) -> f64 {
        sample.charge * self.lifetime_correction(sample.time)
    }
}

/// Result of [`weighted_centroid`].
#[derive(Clone, Debug, PartialEq)]
pub struct WeightedCentroid {
    pub centre: Point,
    /// Sum of the corrected charges.
    pub total_charge: f64,
    /// Corrected charge per point, in cloud order.
    pub charges: Vec<f64>,
}

/// Arithmetic mean of the cloud.
pub fn centroid(cloud: &[Point]) -> Result<Point, AxisError> {
    if cloud.is_empty() {
        return Err(AxisError::InsufficientPoints {
            found: 0,
            minimum: 1,
        });
    }
    let mut sum = Vector3::zeros();
    for p in cloud {
        sum += p.coords;
    }
    Ok(Point::from(sum / cloud.len() as f64))
}

/// Charge-weighted mean of the cloud with drift-lifetime corrected charges.
pub fn weighted_centroid<L>(
    cloud: &[Point],
    lookup: &L,
    drift: &DriftConditions,
) -> Result<WeightedCentroid, AxisError>
where
    L: ChargeLookup + ?Sized,
{
    if cloud.is_empty() {
        return Err(AxisError::InsufficientPoints {
            found: 0,
            minimum: 1,
        });
    }
    drift.validate()?;

    let mut charges = Vec::with_capacity(cloud.len());
    let mut total_charge = 0.0f64;
    let mut sum = Vector3::zeros();
    for (index, p) in cloud.iter().enumerate() {
        let charge = match lookup.charge_sample(index, p) {
            Some(sample) => drift.correct_charge(&sample),
            None => {
                debug!("weighted centroid: no charge sample for point {index}, using zero");
                0.0
            }
        };
        sum += p.coords * charge;
        total_charge += charge;
        charges.push(charge);
    }

    if total_charge == 0.0 || !total_charge.is_finite() {
        return Err(AxisError::DegenerateWeight {
            total: total_charge,
        });
    }

    Ok(WeightedCentroid {
        centre: Point::from(sum / total_charge),
        total_charge,
        charges,
    })
}

/// Euclidean distance between two spacepoints.
#[inline]
pub fn distance_between(a: &Point, b: &Point) -> f64 {
    (a - b).norm()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn cloud() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0, 0.0),
            Point::new(2.0, 0.0, 1.0),
            Point::new(4.0, 3.0, 2.0),
            Point::new(-1.0, 1.0, 5.0),
        ]
    }

    #[test]
    fn centroid_is_mean() {
        let c = centroid(&cloud()).unwrap();
        assert!(approx_eq(c.x, 1.25));
        assert!(approx_eq(c.y, 1.0));
        assert!(approx_eq(c.z, 2.0));
    }

    #[test]
    fn centroid_is_order_independent() {
        let mut pts = cloud();
        let a = centroid(&pts).unwrap();
        pts.reverse();
        pts.swap(0, 2);
        let b = centroid(&pts).unwrap();
        assert!((a - b).norm() < 1e-12);
    }

    #[test]
    fn centroid_of_empty_cloud_fails() {
        assert_eq!(
            centroid(&[]),
            Err(AxisError::InsufficientPoints {
                found: 0,
                minimum: 1
            })
        );
    }

    #[test]
    fn uniform_charge_without_correction_matches_plain_mean() {
        let pts = cloud();
        let samples = vec![ChargeSample::new(1.0, 1234.0); pts.len()];
        let weighted = weighted_centroid(&pts, &samples, &DriftConditions::disabled()).unwrap();
        assert_eq!(weighted.centre, centroid(&pts).unwrap());
        assert_eq!(weighted.total_charge, pts.len() as f64);
    }

    #[test]
    fn heavier_point_pulls_centre() {
        let pts = vec![Point::new(0.0, 0.0, 0.0), Point::new(10.0, 0.0, 0.0)];
        let samples = [ChargeSample::new(1.0, 0.0), ChargeSample::new(3.0, 0.0)];
        let weighted =
            weighted_centroid(&pts, &samples[..], &DriftConditions::default()).unwrap();
        assert!(approx_eq(weighted.centre.x, 7.5));
        assert!(approx_eq(weighted.total_charge, 4.0));
    }

    #[test]
    fn lifetime_correction_inflates_late_charge() {
        let drift = DriftConditions {
            electron_lifetime: 1.0,
            sampling_interval: 0.5,
        };
        // 0.5 * 2000 / 1000 = 1 -> e
        let corrected = drift.correct_charge(&ChargeSample::new(2.0, 2000.0));
        assert!(approx_eq(corrected, 2.0 * std::f64::consts::E));
        assert!(approx_eq(drift.lifetime_correction(0.0), 1.0));
    }

    #[test]
    fn zero_total_charge_is_degenerate() {
        let pts = cloud();
        let lookup = LookupFn(|_: usize, _: &Point| Some(ChargeSample::new(0.0, 10.0)));
        let err = weighted_centroid(&pts, &lookup, &DriftConditions::default()).unwrap_err();
        assert!(matches!(err, AxisError::DegenerateWeight { .. }));
    }

    #[test]
    fn missing_samples_contribute_nothing() {
        let pts = vec![Point::new(1.0, 0.0, 0.0), Point::new(5.0, 0.0, 0.0)];
        let lookup = LookupFn(|i: usize, _: &Point| {
            (i == 0).then(|| ChargeSample::new(2.0, 0.0))
        });
        let weighted = weighted_centroid(&pts, &lookup, &DriftConditions::disabled()).unwrap();
        assert_eq!(weighted.charges, vec![2.0, 0.0]);
        assert!(approx_eq(weighted.centre.x, 1.0));
    }

    #[test]
    fn invalid_lifetime_is_rejected() {
        let drift = DriftConditions {
            electron_lifetime: 0.0,
            sampling_interval: 0.5,
        };
        let samples = vec![ChargeSample::new(1.0, 0.0); 4];
        let err = weighted_centroid(&cloud(), &samples, &drift).unwrap_err();
        assert!(matches!(
            err,
            AxisError::Configuration {
                parameter: "electron_lifetime",
                ..
            }
        ));
    }

    #[test]
    fn distance_between_points() {
        let a = Point::new(0.0, 0.0, 0.0);
        let b = Point::new(3.0, 4.0, 0.0);
        assert!(approx_eq(distance_between(&a, &b), 5.0));
    }
}
