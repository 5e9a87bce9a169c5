//! Principal-axis extraction for spacepoint clouds.
//!
//! The cloud is summarised by a (possibly weighted) 3x3 scatter matrix about a
//! supplied centre:
//!
//! - Each point contributes `w · d dᵀ` with `d = p - centre`. Unweighted PCA
//!   uses `w = 1`; charge-weighted PCA uses `w = sqrt(q / Q)` where `q` is the
//!   point's lifetime-corrected charge and `Q` the shower total.
//! - The matrix is normalised by `Σ w` and diagonalised with nalgebra's
//!   `SymmetricEigen`. Eigenpairs are sorted by descending eigenvalue; the
//!   leading eigenvector is the shower axis.
//!
//! Notes
//! - The leading eigenvector defines an axis, not an oriented direction. The
//!   result exposes it as an [`UnsignedAxis`](crate::types::UnsignedAxis); the
//!   sign is settled by [`crate::polarity`].
//! - Eigenvector signs are canonicalised (largest-magnitude component made
//!   positive) so repeated runs and different solvers agree bit-for-bit on the
//!   unsigned axis.
//! - Points with a non-finite or negative weight are skipped.

mod accumulator;
mod result;

pub use result::{CovarianceResult, EigenPair};

use crate::error::AxisError;
use crate::types::{Direction, Point};
use accumulator::CovarianceAccumulator;
use log::debug;
use nalgebra::SymmetricEigen;
use serde::{Deserialize, Serialize};

/// Minimum number of points able to support axis extraction.
pub const MIN_AXIS_POINTS: usize = 3;

/// Options for the principal-axis stage.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct PcaOptions {
    /// Weight each point by `sqrt(q / Q)` and use the charge-weighted centre.
    pub charge_weighted: bool,
}

/// PCA weights `sqrt(q_i / Q)` from corrected charges and their total.
pub fn charge_weights(charges: &[f64], total_charge: f64) -> Vec<f64> {
    charges
        .iter()
        .map(|&q| (q / total_charge).sqrt())
        .collect()
}

/// Builds the scatter matrix of `cloud` about `centre` and decomposes it.
///
/// `weights`, when given, must have one entry per point.
pub fn extract_axis(
    cloud: &[Point],
    centre: &Point,
    weights: Option<&[f64]>,
) -> Result<CovarianceResult, AxisError> {
    if cloud.len() < MIN_AXIS_POINTS {
        return Err(AxisError::InsufficientPoints {
            found: cloud.len(),
            minimum: MIN_AXIS_POINTS,
        });
    }
    if let Some(w) = weights {
        if w.len() != cloud.len() {
            return Err(AxisError::Configuration {
                parameter: "weights",
                reason: "must have one entry per point",
            });
        }
    }

    let mut acc = CovarianceAccumulator::new(*centre);
    for (index, p) in cloud.iter().enumerate() {
        let w = weights.map_or(1.0, |w| w[index]);
        if !w.is_finite() || w < 0.0 {
            debug!("PCA: skipping point {index} with weight {w}");
            continue;
        }
        acc.push(p, w);
    }

    if acc.count < MIN_AXIS_POINTS {
        return Err(AxisError::InsufficientPoints {
            found: acc.count,
            minimum: MIN_AXIS_POINTS,
        });
    }
    if acc.sum_w <= 0.0 {
        return Err(AxisError::DegenerateWeight { total: acc.sum_w });
    }

    let matrix = acc.normalized();
    let eig = SymmetricEigen::new(matrix);

    let mut order = [0usize, 1, 2];
    order.sort_by(|&a, &b| eig.eigenvalues[b].total_cmp(&eig.eigenvalues[a]));
    let eigen = order.map(|i| EigenPair {
        value: eig.eigenvalues[i],
        vector: canonical_sign(eig.eigenvectors.column(i).into_owned()),
    });

    // A cloud without spread has no principal axis.
    let lead = eigen[0].value;
    if !(lead > spread_floor(centre)) {
        debug!("PCA: leading eigenvalue {lead:e} below round-off, no axis");
        return Err(AxisError::ZeroVector {
            context: "principal axis",
        });
    }

    Ok(CovarianceResult {
        matrix,
        eigen,
        point_count: acc.count,
        centroid: *centre,
    })
}

/// Variance attributable to rounding of coordinates of magnitude `|centre|`.
fn spread_floor(centre: &Point) -> f64 {
    let ulp = f64::EPSILON * (1.0 + centre.coords.abs().max());
    16.0 * ulp * ulp
}

/// Flips `v` so that its largest-magnitude component is positive.
fn canonical_sign(v: Direction) -> Direction {
    let mut lead = 0;
    for i in 1..3 {
        if v[i].abs() > v[lead].abs() {
            lead = i;
        }
    }
    if v[lead] < 0.0 {
        -v
    } else {
        v
    }
}
