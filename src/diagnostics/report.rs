use super::timing::TimingBreakdown;
use crate::pca::CovarianceResult;
use crate::polarity::{BucketSummary, PolarityDecision};
use crate::types::{Direction, DirectionEstimate, Point, Polarity, PolaritySource, ShowerAxis};
use serde::Serialize;

/// Everything the estimator learned about one shower.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisReport {
    pub centre: Point,
    /// Lifetime-corrected total charge when the charge-weighted mode ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_charge: Option<f64>,
    pub covariance: CovarianceResult,
    pub axis: ShowerAxis,
    pub polarity: PolarityReport,
    pub timing: TimingBreakdown,
}

impl AxisReport {
    pub fn direction(&self) -> Direction {
        self.axis.direction
    }

    pub fn estimate(&self) -> DirectionEstimate {
        DirectionEstimate::from(self.axis)
    }
}

/// Diagnostics of both polarity tests, kept for calibration.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolarityReport {
    pub flipped: bool,
    /// Test that decided the sign; `None` if the polarity is unverified.
    pub source: Option<PolaritySource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertex_alignment: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rms_slope: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment_size: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub buckets: Vec<BucketSummary>,
}

impl From<&PolarityDecision> for PolarityReport {
    fn from(decision: &PolarityDecision) -> Self {
        let source = match decision.axis.polarity {
            Polarity::Verified(source) => Some(source),
            Polarity::Unverified => None,
        };
        let rms = decision.rms_gradient.as_ref();
        Self {
            flipped: decision.flipped,
            source,
            vertex_alignment: decision.vertex_alignment,
            rms_slope: rms.map(|g| g.slope),
            segment_size: rms.map(|g| g.segment_size),
            buckets: rms.map(|g| g.profile.summary()).unwrap_or_default(),
        }
    }
}
