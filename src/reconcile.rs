//! Selection between two independently estimated shower directions.
//!
//! The first candidate is preferred while both agree within the angular
//! threshold; once they diverge the second candidate is taken.

use crate::angle::angle_between;
use crate::error::AxisError;
use crate::types::DirectionEstimate;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Candidate {
    First,
    Second,
}

/// Result of [`reconcile`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reconciliation {
    pub chosen: Candidate,
    /// Angle between the two candidates in radians.
    pub angle: f64,
    pub estimate: DirectionEstimate,
}

/// Angular threshold for [`reconcile`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReconcileParams {
    pub angle_threshold_deg: f64,
}

impl Default for ReconcileParams {
    fn default() -> Self {
        Self {
            angle_threshold_deg: 20.0,
        }
    }
}

impl ReconcileParams {
    pub fn angle_threshold_rad(&self) -> f64 {
        self.angle_threshold_deg.to_radians()
    }
}

/// Returns `first` when `angle(first, second) < angle_threshold` (radians),
/// `second` otherwise.
pub fn reconcile(
    first: &DirectionEstimate,
    second: &DirectionEstimate,
    angle_threshold: f64,
) -> Result<Reconciliation, AxisError> {
    if angle_threshold.is_nan() || angle_threshold < 0.0 {
        return Err(AxisError::Configuration {
            parameter: "angle_threshold",
            reason: "must be non-negative",
        });
    }
    let angle = angle_between(&first.direction, &second.direction).ok_or(
        AxisError::ZeroVector {
            context: "reconciled direction",
        },
    )?;
    let (chosen, estimate) = if angle < angle_threshold {
        (Candidate::First, *first)
    } else {
        (Candidate::Second, *second)
    };
    Ok(Reconciliation {
        chosen,
        angle,
        estimate,
    })
}
