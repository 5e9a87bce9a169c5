//! Diagnostics data model returned by the estimator.
//!
//! `AxisReport` is the main entry point: it bundles the centre, the
//! eigen-decomposition, the oriented axis, the outcome of both polarity tests
//! and per-stage timings. All types serialise to camelCase JSON for the tools.

pub mod report;
pub mod timing;

pub use report::{AxisReport, PolarityReport};
pub use timing::{StageTiming, TimingBreakdown};
