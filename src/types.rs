use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Reconstructed 3D spacepoint position (centimetres).
pub type Point = Point3<f64>;

/// Direction or displacement in detector space.
pub type Direction = Vector3<f64>;

/// Charge and drift time associated with a spacepoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChargeSample {
    /// Raw deposited charge (ADC integral).
    pub charge: f64,
    /// Drift time in sampling ticks.
    pub time: f64,
}

impl ChargeSample {
    pub fn new(charge: f64, time: f64) -> Self {
        Self { charge, time }
    }
}

/// Principal axis whose direction sign has not been resolved yet.
///
/// Eigen-decomposition yields an axis, not an oriented vector; this type keeps
/// the two apart so downstream code cannot silently rely on the solver's sign.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct UnsignedAxis {
    pub origin: Point,
    pub direction: Direction,
}

impl UnsignedAxis {
    pub fn new(origin: Point, direction: Direction) -> Self {
        Self { origin, direction }
    }

    /// Commits to the stored sign, or its opposite when `flip` is set.
    pub fn orient(self, flip: bool, polarity: Polarity) -> ShowerAxis {
        let direction = if flip {
            -self.direction
        } else {
            self.direction
        };
        ShowerAxis {
            origin: self.origin,
            direction,
            polarity,
        }
    }
}

/// Which test decided the direction sign.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PolaritySource {
    Vertex,
    RmsGradient,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Polarity {
    Verified(PolaritySource),
    /// Neither polarity test was available; the sign is the canonical one.
    Unverified,
}

impl Polarity {
    pub fn is_verified(&self) -> bool {
        matches!(self, Polarity::Verified(_))
    }
}

/// Axis after polarity resolution.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ShowerAxis {
    pub origin: Point,
    pub direction: Direction,
    pub polarity: Polarity,
}

/// A direction candidate together with its (optional) uncertainty.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DirectionEstimate {
    pub direction: Direction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uncertainty: Option<Direction>,
}

impl DirectionEstimate {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            uncertainty: None,
        }
    }

    pub fn with_uncertainty(direction: Direction, uncertainty: Direction) -> Self {
        Self {
            direction,
            uncertainty: Some(uncertainty),
        }
    }
}

impl From<ShowerAxis> for DirectionEstimate {
    fn from(axis: ShowerAxis) -> Self {
        Self::new(axis.direction)
    }
}
