//! Failure kinds reported by the axis-estimation stages.
//!
//! Every failure is a local return value; nothing here aborts the process or
//! retries. Callers decide whether to skip a shower or fall back to another
//! strategy.

/// Reasons why an axis-estimation stage may fail.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AxisError {
    /// Not enough points (or trajectory points) to run the stage.
    InsufficientPoints { found: usize, minimum: usize },
    /// The accumulated charge or PCA weight sums to zero.
    DegenerateWeight { total: f64 },
    /// The RMS-gradient regression has no well-defined slope.
    IndeterminateRegression { qualifying_buckets: usize },
    /// A vector that must have a length is zero (coincident points).
    ZeroVector { context: &'static str },
    /// A caller-supplied parameter violates its precondition.
    Configuration {
        parameter: &'static str,
        reason: &'static str,
    },
    /// No trajectory point satisfied the colinearity requirement.
    NoColinearTrajectoryPoint,
}

impl std::fmt::Display for AxisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AxisError::InsufficientPoints { found, minimum } => {
                write!(f, "insufficient points ({found} < {minimum})")
            }
            AxisError::DegenerateWeight { total } => {
                write!(f, "degenerate weight (total {total:.3e})")
            }
            AxisError::IndeterminateRegression { qualifying_buckets } => write!(
                f,
                "indeterminate RMS regression ({qualifying_buckets} qualifying buckets)"
            ),
            AxisError::ZeroVector { context } => write!(f, "zero-length vector: {context}"),
            AxisError::Configuration { parameter, reason } => {
                write!(f, "invalid parameter `{parameter}`: {reason}")
            }
            AxisError::NoColinearTrajectoryPoint => {
                write!(f, "no colinear trajectory point found")
            }
        }
    }
}

impl std::error::Error for AxisError {}
