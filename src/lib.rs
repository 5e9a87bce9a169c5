//! Direction estimation for electromagnetic showers reconstructed as 3D
//! spacepoint clouds.
//!
//! The estimator finds the shower centre, extracts the principal axis of the
//! cloud and resolves its sign with a vertex test or the longitudinal RMS
//! gradient of the shower. A secondary direction (for example from the
//! initial track) can be reconciled against the result.

// Public modules (stable-ish surface)
pub mod diagnostics;
pub mod error;
pub mod estimator;
pub mod store;
pub mod types;

// Stage building blocks – public for tools and tests, less stable.
pub mod angle;
pub mod centroid;
pub mod pca;
pub mod polarity;
pub mod projection;
pub mod reconcile;
pub mod trajectory;

// Tool support.
pub mod config;
pub mod io;

// --- High-level re-exports -------------------------------------------------

// Main entry points: estimator + results.
pub use crate::error::AxisError;
pub use crate::estimator::{
    EstimatorParams, PipelineError, ShowerAxisEstimator, ShowerEstimate, ShowerInput,
};
pub use crate::types::{DirectionEstimate, Polarity, ShowerAxis};

// High-level diagnostics returned by the estimator.
pub use crate::diagnostics::AxisReport;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use shower_axis::prelude::*;
///
/// # fn main() {
/// let cloud: Vec<Point> = (0..20)
///     .map(|i| Point::new(i as f64, 0.1 * (i % 3) as f64, 0.0))
///     .collect();
/// let start = Point::new(-5.0, 0.0, 0.0);
///
/// let estimator = ShowerAxisEstimator::new(EstimatorParams::default());
/// match estimator.estimate(&cloud, None, Some(&start)) {
///     Ok(report) => println!("direction={:?} polarity={:?}", report.direction(), report.axis.polarity),
///     Err(err) => eprintln!("{err}"),
/// }
/// # }
/// ```
pub mod prelude {
    pub use crate::types::{ChargeSample, Direction, Point};
    pub use crate::{AxisError, EstimatorParams, ShowerAxisEstimator};
}

// --- Stage-level API (for tools & advanced users) --------------------------

pub mod stages {
    // Stage runners.
    pub use crate::centroid::{centroid, weighted_centroid, ChargeLookup, LookupFn};
    pub use crate::pca::{extract_axis, CovarianceResult};
    pub use crate::polarity::{resolve_polarity, rms_gradient, vertex_alignment};
    pub use crate::reconcile::reconcile;
    pub use crate::trajectory::colinear_trajectory_direction;

    // Structured diagnostics types.
    pub use crate::diagnostics::{PolarityReport, StageTiming, TimingBreakdown};
    pub use crate::polarity::{BucketSummary, PolarityDecision, RmsGradient};
}
