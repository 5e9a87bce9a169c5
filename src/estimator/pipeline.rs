//! Estimator pipeline composing centroid → PCA → polarity, with optional
//! reconciliation against a secondary direction.
//!
//! Typical usage:
//! ```no_run
//! use shower_axis::{EstimatorParams, ShowerAxisEstimator};
//! use shower_axis::types::Point;
//!
//! # fn example(points: Vec<Point>) {
//! let estimator = ShowerAxisEstimator::new(EstimatorParams::default());
//! match estimator.estimate(&points, None, None) {
//!     Ok(report) => println!("direction: {:?}", report.direction()),
//!     Err(err) => eprintln!("skipping shower: {err}"),
//! }
//! # }
//! ```
use super::input::{ShowerEstimate, ShowerInput};
use super::params::{EstimatorParams, StoreLabels};
use crate::centroid::{centroid, weighted_centroid, ChargeLookup};
use crate::diagnostics::{AxisReport, PolarityReport, TimingBreakdown};
use crate::error::AxisError;
use crate::pca::{charge_weights, extract_axis, MIN_AXIS_POINTS};
use crate::polarity::resolve_polarity;
use crate::reconcile::{reconcile, Reconciliation};
use crate::store::{ElementStore, StoreError};
use crate::trajectory::colinear_trajectory_direction;
use crate::types::{Direction, DirectionEstimate, Point};
use log::{debug, warn};
use rayon::prelude::*;
use std::time::Instant;

/// Failure of a store-backed estimate.
#[derive(Clone, Debug, PartialEq)]
pub enum PipelineError {
    Axis(AxisError),
    Store(StoreError),
}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineError::Axis(err) => write!(f, "axis estimation failed: {err}"),
            PipelineError::Store(err) => write!(f, "element store: {err}"),
        }
    }
}

impl std::error::Error for PipelineError {}

impl From<AxisError> for PipelineError {
    fn from(err: AxisError) -> Self {
        PipelineError::Axis(err)
    }
}

impl From<StoreError> for PipelineError {
    fn from(err: StoreError) -> Self {
        PipelineError::Store(err)
    }
}

/// Stateless shower-axis estimator; one instance can serve many showers and
/// threads.
#[derive(Clone, Debug, Default)]
pub struct ShowerAxisEstimator {
    params: EstimatorParams,
}

impl ShowerAxisEstimator {
    pub fn new(params: EstimatorParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &EstimatorParams {
        &self.params
    }

    /// Estimates the oriented axis of one cloud.
    ///
    /// `charges` is required when charge-weighted PCA is enabled; `start`
    /// enables the vertex polarity test.
    pub fn estimate(
        &self,
        cloud: &[Point],
        charges: Option<&dyn ChargeLookup>,
        start: Option<&Point>,
    ) -> Result<AxisReport, AxisError> {
        self.params.validate()?;
        if cloud.len() < MIN_AXIS_POINTS {
            warn!(
                "ShowerAxisEstimator::estimate {} spacepoints in shower, not calculating direction",
                cloud.len()
            );
            return Err(AxisError::InsufficientPoints {
                found: cloud.len(),
                minimum: MIN_AXIS_POINTS,
            });
        }

        let t0 = Instant::now();
        let mut timing = TimingBreakdown::default();

        let (centre, total_charge, weights) = timing.time("centroid", || -> Result<_, AxisError> {
            if self.params.pca.charge_weighted {
                let lookup = charges.ok_or(AxisError::Configuration {
                    parameter: "charges",
                    reason: "charge-weighted PCA needs a charge lookup",
                })?;
                let weighted = weighted_centroid(cloud, lookup, &self.params.drift)?;
                let weights = charge_weights(&weighted.charges, weighted.total_charge);
                Ok((weighted.centre, Some(weighted.total_charge), Some(weights)))
            } else {
                Ok((centroid(cloud)?, None, None))
            }
        })?;

        let covariance = timing.time("pca", || extract_axis(cloud, &centre, weights.as_deref()))?;

        let decision = timing.time("polarity", || {
            resolve_polarity(&covariance.principal_axis(), cloud, start, &self.params.polarity)
        })?;
        debug!(
            "ShowerAxisEstimator::estimate n={} flipped={} vertex={:?} rms_slope={:?}",
            cloud.len(),
            decision.flipped,
            decision.vertex_alignment,
            decision.rms_gradient.as_ref().map(|g| g.slope)
        );

        timing.total_ms = t0.elapsed().as_secs_f64() * 1000.0;
        Ok(AxisReport {
            centre,
            total_charge,
            polarity: PolarityReport::from(&decision),
            axis: decision.axis,
            covariance,
            timing,
        })
    }

    /// Estimates one self-contained shower and reconciles it with its
    /// secondary direction when one is available.
    pub fn estimate_input(&self, input: &ShowerInput) -> Result<ShowerEstimate, AxisError> {
        let charges = input.charges.as_ref().map(|c| c as &dyn ChargeLookup);
        let axis = self.estimate(&input.points, charges, input.start_position.as_ref())?;

        let secondary = input.secondary_direction.or_else(|| {
            let track = input.initial_track.as_ref()?;
            match colinear_trajectory_direction(
                track,
                input.start_position.as_ref(),
                &self.params.trajectory,
            ) {
                Ok(direction) => Some(DirectionEstimate::new(direction)),
                Err(err) => {
                    debug!("ShowerAxisEstimator::estimate_input no track direction ({err})");
                    None
                }
            }
        });

        let reconciliation = secondary
            .map(|second| {
                reconcile(
                    &axis.estimate(),
                    &second,
                    self.params.reconcile.angle_threshold_rad(),
                )
            })
            .transpose()?;

        Ok(ShowerEstimate {
            axis,
            secondary,
            reconciliation,
        })
    }

    /// Estimates independent showers in parallel; results keep input order.
    pub fn estimate_batch(&self, inputs: &[ShowerInput]) -> Vec<Result<ShowerEstimate, AxisError>> {
        inputs
            .par_iter()
            .map(|input| self.estimate_input(input))
            .collect()
    }

    /// Runs [`estimate`](Self::estimate) reading the start position from
    /// `store` (if present) and writing centre, PCA and direction back.
    pub fn estimate_into_store(
        &self,
        store: &mut ElementStore,
        labels: &StoreLabels,
        cloud: &[Point],
        charges: Option<&dyn ChargeLookup>,
    ) -> Result<AxisReport, PipelineError> {
        let start = if store.has(&labels.start_position) {
            Some(store.get::<Point>(&labels.start_position)?)
        } else {
            None
        };
        let report = self.estimate(cloud, charges, start.as_ref())?;
        store.set(labels.centre.as_str(), report.centre);
        store.set(labels.pca.as_str(), report.covariance.clone());
        store.set(labels.direction.as_str(), report.direction());
        Ok(report)
    }

    /// Reconciles two directions held in `store` and stores the chosen one
    /// (with its uncertainty) under `output`.
    pub fn reconcile_in_store(
        &self,
        store: &mut ElementStore,
        first: &str,
        second: &str,
        output: &str,
    ) -> Result<Reconciliation, PipelineError> {
        let (first_dir, first_err) = store.get_with_uncertainty::<Direction>(first)?;
        let (second_dir, second_err) = store.get_with_uncertainty::<Direction>(second)?;
        let outcome = reconcile(
            &DirectionEstimate {
                direction: first_dir,
                uncertainty: first_err,
            },
            &DirectionEstimate {
                direction: second_dir,
                uncertainty: second_err,
            },
            self.params.reconcile.angle_threshold_rad(),
        )?;
        match outcome.estimate.uncertainty {
            Some(err) => store.set_with_uncertainty(output, outcome.estimate.direction, err),
            None => store.set(output, outcome.estimate.direction),
        }
        Ok(outcome)
    }
}
