//! Parameter types configuring the estimator stages.
//!
//! Defaults follow the usual shower-reconstruction setup: unweighted PCA,
//! vertex-first polarity with a five-segment RMS fallback, and a 20° window in
//! which the PCA direction is preferred over the track-based one.

use crate::centroid::DriftConditions;
use crate::error::AxisError;
use crate::pca::PcaOptions;
use crate::polarity::PolarityOptions;
use crate::reconcile::ReconcileParams;
use crate::trajectory::TrajectoryDirectionParams;

/// Estimator-wide parameters.
#[derive(Clone, Debug, Default)]
pub struct EstimatorParams {
    /// Principal-axis options (charge weighting).
    pub pca: PcaOptions,
    /// Detector conditions for the lifetime correction of charges.
    pub drift: DriftConditions,
    /// Sign disambiguation of the principal axis.
    pub polarity: PolarityOptions,
    /// Agreement window between the PCA and the secondary direction.
    pub reconcile: ReconcileParams,
    /// Secondary direction from the initial track, if one is supplied.
    pub trajectory: TrajectoryDirectionParams,
}

impl EstimatorParams {
    /// Rejects inconsistent parameters before any computation starts.
    pub fn validate(&self) -> Result<(), AxisError> {
        if self.pca.charge_weighted {
            self.drift.validate()?;
        }
        self.polarity.validate()?;
        if self.reconcile.angle_threshold_deg.is_nan() || self.reconcile.angle_threshold_deg < 0.0
        {
            return Err(AxisError::Configuration {
                parameter: "angle_threshold_deg",
                reason: "must be non-negative",
            });
        }
        self.trajectory.validate()
    }
}

/// Labels used when the estimator reads from / writes to an
/// [`ElementStore`](crate::store::ElementStore).
#[derive(Clone, Debug)]
pub struct StoreLabels {
    pub start_position: String,
    pub centre: String,
    pub pca: String,
    pub direction: String,
}

impl Default for StoreLabels {
    fn default() -> Self {
        Self {
            start_position: "ShowerStartPosition".into(),
            centre: "ShowerCentre".into(),
            pca: "ShowerPCA".into(),
            direction: "ShowerDirection".into(),
        }
    }
}
