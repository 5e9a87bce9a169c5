//! Shower-axis estimator composing the per-stage building blocks.
//!
//! Overview
//! - Computes the shower centre, optionally charge weighted with a
//!   drift-lifetime correction of each spacepoint charge.
//! - Extracts the principal axis of the (weighted) covariance of the cloud
//!   about that centre.
//! - Orients the axis with the vertex test and/or the longitudinal RMS
//!   gradient, as selected by [`PolarityPolicy`](crate::polarity::PolarityPolicy).
//! - Optionally reconciles the result with a secondary direction, either
//!   supplied directly or derived from the initial track trajectory.
//!
//! Modules
//! - [`params`] – configuration types used by the estimator and CLI.
//! - `pipeline` – the main [`ShowerAxisEstimator`] implementation.
//! - `input` – serialisable per-shower inputs and results.
//!
//! Key Ideas
//! - A principal axis is a line; its sign carries no information until one
//!   of the polarity tests has run. Unverified results are flagged, not
//!   guessed.
//! - The estimator holds no per-shower state, so batches run in parallel.

mod input;
pub mod params;
mod pipeline;

pub use input::{ShowerEstimate, ShowerInput};
pub use params::{EstimatorParams, StoreLabels};
pub use pipeline::{PipelineError, ShowerAxisEstimator};
