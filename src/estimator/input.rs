use crate::diagnostics::AxisReport;
use crate::reconcile::Reconciliation;
use crate::trajectory::InitialTrack;
use crate::types::{ChargeSample, Direction, DirectionEstimate, Point};
use serde::{Deserialize, Serialize};

/// Self-contained description of one candidate shower.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowerInput {
    /// Spacepoints of the shower.
    pub points: Vec<Point>,
    /// Charge/time per spacepoint, in point order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charges: Option<Vec<ChargeSample>>,
    /// Known shower start (e.g. the interaction vertex).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_position: Option<Point>,
    /// Independently estimated direction to reconcile against.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_direction: Option<DirectionEstimate>,
    /// Fitted initial track; used for the secondary direction when
    /// `secondary_direction` is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_track: Option<InitialTrack>,
}

impl ShowerInput {
    pub fn from_points(points: Vec<Point>) -> Self {
        Self {
            points,
            ..Default::default()
        }
    }
}

/// Estimate for one [`ShowerInput`].
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowerEstimate {
    pub axis: AxisReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary: Option<DirectionEstimate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reconciliation: Option<Reconciliation>,
}

impl ShowerEstimate {
    /// Final direction: the reconciled one when a secondary candidate existed,
    /// the PCA direction otherwise.
    pub fn direction(&self) -> Direction {
        self.reconciliation
            .map(|r| r.estimate.direction)
            .unwrap_or_else(|| self.axis.direction())
    }
}
