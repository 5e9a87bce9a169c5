use crate::centroid::DriftConditions;
use crate::estimator::EstimatorParams;
use crate::pca::PcaOptions;
use crate::polarity::{BucketCentering, PolarityOptions, PolarityPolicy};
use crate::reconcile::ReconcileParams;
use crate::trajectory::TrajectoryDirectionParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct AxisToolConfig {
    /// JSON array of showers to process.
    pub input: PathBuf,
    #[serde(default)]
    pub estimator: EstimatorConfig,
    pub output: AxisOutputConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Weight points by their lifetime-corrected charge.
    pub charge_weighted: bool,
    /// Electron lifetime in milliseconds.
    pub electron_lifetime_ms: f64,
    /// Sampling interval in microseconds per tick.
    pub sampling_interval_us: f64,
    pub polarity: PolarityConfig,
    /// Angle (degrees) below which the PCA direction wins over the secondary one.
    pub reconcile_angle_deg: f64,
    pub trajectory: TrajectoryConfig,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        let drift = DriftConditions::default();
        Self {
            charge_weighted: false,
            electron_lifetime_ms: drift.electron_lifetime,
            sampling_interval_us: drift.sampling_interval,
            polarity: PolarityConfig::default(),
            reconcile_angle_deg: ReconcileParams::default().angle_threshold_deg,
            trajectory: TrajectoryConfig::default(),
        }
    }
}

impl EstimatorConfig {
    pub fn to_params(&self) -> EstimatorParams {
        EstimatorParams {
            pca: PcaOptions {
                charge_weighted: self.charge_weighted,
            },
            drift: DriftConditions {
                electron_lifetime: self.electron_lifetime_ms,
                sampling_interval: self.sampling_interval_us,
            },
            polarity: self.polarity.to_options(),
            reconcile: ReconcileParams {
                angle_threshold_deg: self.reconcile_angle_deg,
            },
            trajectory: self.trajectory.to_params(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PolarityConfig {
    pub policy: PolarityPolicy,
    /// Number of longitudinal segments for the RMS gradient.
    pub segments: usize,
    pub centering: BucketCentering,
    /// Flip only when the RMS slope is below `-slope_tolerance`.
    pub slope_tolerance: f64,
}

impl Default for PolarityConfig {
    fn default() -> Self {
        let opts = PolarityOptions::default();
        Self {
            policy: opts.policy,
            segments: opts.segments,
            centering: opts.centering,
            slope_tolerance: opts.slope_tolerance,
        }
    }
}

impl PolarityConfig {
    pub fn to_options(&self) -> PolarityOptions {
        PolarityOptions {
            policy: self.policy,
            segments: self.segments,
            centering: self.centering,
            slope_tolerance: self.slope_tolerance,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TrajectoryConfig {
    pub angle_cut_deg: f64,
    pub use_position_info: bool,
    pub use_start_position: bool,
    pub allow_dynamic_sliding: bool,
}

impl Default for TrajectoryConfig {
    fn default() -> Self {
        let params = TrajectoryDirectionParams::default();
        Self {
            angle_cut_deg: params.angle_cut_deg,
            use_position_info: params.use_position_info,
            use_start_position: params.use_start_position,
            allow_dynamic_sliding: params.allow_dynamic_sliding,
        }
    }
}

impl TrajectoryConfig {
    pub fn to_params(&self) -> TrajectoryDirectionParams {
        TrajectoryDirectionParams {
            angle_cut_deg: self.angle_cut_deg,
            use_position_info: self.use_position_info,
            use_start_position: self.use_start_position,
            allow_dynamic_sliding: self.allow_dynamic_sliding,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AxisOutputConfig {
    pub result_json: PathBuf,
}

pub fn load_config(path: &Path) -> Result<AxisToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}
