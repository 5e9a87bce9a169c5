use crate::error::AxisError;
use serde::{Deserialize, Serialize};

/// Which polarity test governs when both are available.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolarityPolicy {
    /// Vertex test when a start position is known, RMS gradient otherwise.
    VertexFirst,
    /// RMS gradient when determinate, vertex test otherwise.
    RmsFirst,
    VertexOnly,
    RmsOnly,
}

/// How projections are mapped to RMS bucket indices.
///
/// - `Origin`: `round(s / size)`, buckets counted from the axis origin
///   (normally the shower centre), so indices may be negative.
/// - `HalfSpan`: `round(s / size + N / 2)`, indices shifted by half the
///   segment count. With odd `N` this also moves bucket boundaries by half a
///   segment, which can change bucket membership.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketCentering {
    Origin,
    HalfSpan,
}

impl BucketCentering {
    #[inline]
    pub fn bucket(&self, projection: f64, segment_size: f64, segments: usize) -> i64 {
        let scaled = projection / segment_size;
        let index = match self {
            BucketCentering::Origin => scaled,
            BucketCentering::HalfSpan => scaled + segments as f64 * 0.5,
        };
        index.round() as i64
    }
}

/// Parameters of the polarity disambiguation stage.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolarityOptions {
    pub policy: PolarityPolicy,
    /// Number of longitudinal segments for the RMS gradient (>= 1).
    pub segments: usize,
    pub centering: BucketCentering,
    /// The direction is flipped only when the slope is below `-slope_tolerance`.
    pub slope_tolerance: f64,
}

impl Default for PolarityOptions {
    fn default() -> Self {
        Self {
            policy: PolarityPolicy::VertexFirst,
            segments: 5,
            centering: BucketCentering::Origin,
            slope_tolerance: f64::EPSILON,
        }
    }
}

impl PolarityOptions {
    pub fn validate(&self) -> Result<(), AxisError> {
        if self.segments == 0 {
            return Err(AxisError::Configuration {
                parameter: "segments",
                reason: "must be at least 1",
            });
        }
        if !(self.slope_tolerance >= 0.0) || !self.slope_tolerance.is_finite() {
            return Err(AxisError::Configuration {
                parameter: "slope_tolerance",
                reason: "must be finite and non-negative",
            });
        }
        Ok(())
    }
}
