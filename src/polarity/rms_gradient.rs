use super::options::PolarityOptions;
use crate::angle::unit;
use crate::error::AxisError;
use crate::projection::{order_by_projection, perpendicular_with_projection, projection};
use crate::types::{Direction, Point};
use serde::Serialize;
use std::collections::BTreeMap;

/// Perpendicular distances grouped by longitudinal bucket index.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SegmentProfile {
    buckets: BTreeMap<i64, Vec<f64>>,
}

/// Per-bucket summary used in diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BucketSummary {
    pub bucket: i64,
    pub count: usize,
    /// `None` for buckets with fewer than two members.
    pub rms: Option<f64>,
}

impl SegmentProfile {
    pub fn push(&mut self, bucket: i64, perpendicular: f64) {
        self.buckets.entry(bucket).or_default().push(perpendicular);
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn members(&self, bucket: i64) -> Option<&[f64]> {
        self.buckets.get(&bucket).map(|v| v.as_slice())
    }

    /// `(bucket, rms)` for every bucket whose RMS is defined, in bucket order.
    pub fn bucket_rms(&self) -> Vec<(i64, f64)> {
        self.buckets
            .iter()
            .filter_map(|(&bucket, perps)| sample_rms(perps).map(|rms| (bucket, rms)))
            .collect()
    }

    pub fn summary(&self) -> Vec<BucketSummary> {
        self.buckets
            .iter()
            .map(|(&bucket, perps)| BucketSummary {
                bucket,
                count: perps.len(),
                rms: sample_rms(perps),
            })
            .collect()
    }
}

/// Outcome of the segmented RMS regression.
#[derive(Clone, Debug, PartialEq)]
pub struct RmsGradient {
    /// Slope of RMS against bucket index; positive means the spread grows
    /// along the candidate direction.
    pub slope: f64,
    pub segment_size: f64,
    pub profile: SegmentProfile,
}

/// Sample RMS `sqrt(Σ x² / (n - 1))`; undefined for fewer than two values.
pub fn sample_rms(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let sum_sq: f64 = values.iter().map(|v| v * v).sum();
    Some((sum_sq / (values.len() - 1) as f64).sqrt())
}

/// Ordinary least-squares slope of `y` against `x`.
///
/// Returns `None` for fewer than two samples or a zero denominator (all `x`
/// equal).
pub fn linear_slope(samples: &[(f64, f64)]) -> Option<f64> {
    if samples.len() < 2 {
        return None;
    }
    let n = samples.len() as f64;
    let (mut sx, mut sy, mut sxx, mut sxy) = (0.0f64, 0.0f64, 0.0f64, 0.0f64);
    for &(x, y) in samples {
        sx += x;
        sy += y;
        sxx += x * x;
        sxy += x * y;
    }
    let denom = n * sxx - sx * sx;
    if denom == 0.0 || !denom.is_finite() {
        return None;
    }
    let slope = (n * sxy - sx * sy) / denom;
    slope.is_finite().then_some(slope)
}

/// Splits the cloud into `options.segments` longitudinal segments along the
/// axis and regresses the per-segment transverse RMS against segment index.
pub fn rms_gradient(
    cloud: &[Point],
    origin: &Point,
    direction: &Direction,
    options: &PolarityOptions,
) -> Result<RmsGradient, AxisError> {
    options.validate()?;
    let dir = unit(direction).ok_or(AxisError::ZeroVector {
        context: "RMS gradient axis direction",
    })?;

    let ordered = order_by_projection(cloud, origin, &dir)?;
    let (first, last) = match (ordered.first(), ordered.last()) {
        (Some(first), Some(last)) if ordered.len() >= 2 => (first, last),
        _ => {
            return Err(AxisError::IndeterminateRegression {
                qualifying_buckets: 0,
            })
        }
    };

    let length = projection(last, origin, &dir) - projection(first, origin, &dir);
    let segment_size = length / options.segments as f64;
    if !(segment_size.is_finite() && segment_size > 0.0) {
        return Err(AxisError::IndeterminateRegression {
            qualifying_buckets: 0,
        });
    }

    let mut profile = SegmentProfile::default();
    for p in &ordered {
        let proj = projection(p, origin, &dir);
        let perp = perpendicular_with_projection(p, origin, &dir, proj);
        let bucket = options
            .centering
            .bucket(proj, segment_size, options.segments);
        profile.push(bucket, perp);
    }

    let samples: Vec<(f64, f64)> = profile
        .bucket_rms()
        .into_iter()
        .map(|(bucket, rms)| (bucket as f64, rms))
        .collect();
    let slope = linear_slope(&samples).ok_or(AxisError::IndeterminateRegression {
        qualifying_buckets: samples.len(),
    })?;

    Ok(RmsGradient {
        slope,
        segment_size,
        profile,
    })
}
