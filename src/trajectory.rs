//! Direction candidate derived from the trajectory of a fitted initial track.
//!
//! The start of an electromagnetic shower is usually track-like. Walking the
//! trajectory of the fitted initial track, the first point whose two following
//! valid points are colinear with it marks where the track settles; the
//! direction from the start to that point (or the fitted track direction at
//! that point) is an estimate independent of the spacepoint PCA and is the
//! usual second candidate for [`crate::reconcile`].

use crate::angle::{angle_between, unit};
use crate::error::AxisError;
use crate::types::{Direction, Point};
use serde::{Deserialize, Serialize};

/// One point of a fitted trajectory.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    pub position: Point,
    pub direction: Direction,
    /// `false` for points the fit flagged as missing.
    #[serde(default = "default_valid")]
    pub valid: bool,
}

fn default_valid() -> bool {
    true
}

impl TrajectoryPoint {
    pub fn new(position: Point, direction: Direction) -> Self {
        Self {
            position,
            direction,
            valid: true,
        }
    }

    pub fn missing(position: Point) -> Self {
        Self {
            position,
            direction: Direction::zeros(),
            valid: false,
        }
    }
}

/// Ordered trajectory points of the initial track.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InitialTrack {
    pub points: Vec<TrajectoryPoint>,
}

impl InitialTrack {
    pub fn new(points: Vec<TrajectoryPoint>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Position of the first valid trajectory point.
    pub fn start(&self) -> Option<Point> {
        self.points.iter().find(|p| p.valid).map(|p| p.position)
    }

    fn is_valid(&self, index: usize) -> bool {
        self.points.get(index).is_some_and(|p| p.valid)
    }

    fn next_valid(&self, from: usize) -> Option<usize> {
        (from..self.points.len()).find(|&i| self.points[i].valid)
    }

    fn prev_valid(&self, from: usize) -> Option<usize> {
        (0..=from).rev().find(|&i| self.is_valid(i))
    }
}

/// Knobs of the colinear trajectory-point search.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryDirectionParams {
    /// Maximum angle (degrees) for two vectors to count as colinear.
    pub angle_cut_deg: f64,
    /// Compare positions (relative to the start) instead of fitted directions.
    pub use_position_info: bool,
    /// Measure following points from the start rather than from their
    /// predecessor (position mode), or compare against the direction at the
    /// first valid point (direction mode).
    pub use_start_position: bool,
    /// Slide the reference forward as the walk proceeds.
    pub allow_dynamic_sliding: bool,
}

impl Default for TrajectoryDirectionParams {
    fn default() -> Self {
        Self {
            angle_cut_deg: 5.0,
            use_position_info: true,
            use_start_position: false,
            allow_dynamic_sliding: false,
        }
    }
}

impl TrajectoryDirectionParams {
    pub fn validate(&self) -> Result<(), AxisError> {
        if self.angle_cut_deg.is_nan() || self.angle_cut_deg < 0.0 {
            return Err(AxisError::Configuration {
                parameter: "angle_cut_deg",
                reason: "must be non-negative",
            });
        }
        Ok(())
    }
}

/// Minimum number of trajectory points for the search.
pub const MIN_TRAJECTORY_POINTS: usize = 3;

/// Direction of the initial track at its first colinear trajectory point.
///
/// `start` overrides the track start (e.g. a reconstructed vertex) in
/// position mode.
pub fn colinear_trajectory_direction(
    track: &InitialTrack,
    start: Option<&Point>,
    params: &TrajectoryDirectionParams,
) -> Result<Direction, AxisError> {
    params.validate()?;
    if track.len() < MIN_TRAJECTORY_POINTS {
        return Err(AxisError::InsufficientPoints {
            found: track.len(),
            minimum: MIN_TRAJECTORY_POINTS,
        });
    }
    let cut = params.angle_cut_deg.to_radians();

    if params.use_position_info {
        let start = match start.copied().or_else(|| track.start()) {
            Some(s) => s,
            None => return Err(AxisError::NoColinearTrajectoryPoint),
        };
        let (index, start) = search_by_position(track, start, cut, params)?;
        unit(&(track.points[index].position - start)).ok_or(AxisError::ZeroVector {
            context: "trajectory direction",
        })
    } else {
        let index = search_by_direction(track, cut, params)?;
        unit(&track.points[index].direction).ok_or(AxisError::ZeroVector {
            context: "trajectory direction",
        })
    }
}

fn colinear(reference: &Direction, a: &Direction, b: &Direction, cut: f64) -> Option<bool> {
    let first = angle_between(reference, a)?;
    let second = angle_between(reference, b)?;
    Some(first < cut && second < cut)
}

fn search_by_position(
    track: &InitialTrack,
    mut start: Point,
    cut: f64,
    params: &TrajectoryDirectionParams,
) -> Result<(usize, Point), AxisError> {
    let pts = &track.points;
    for traj in 0..pts.len() - 2 {
        let candidate = traj + 1;
        if !track.is_valid(traj) || !track.is_valid(candidate) {
            continue;
        }
        let Some(next) = track.next_valid(traj + 1) else {
            break;
        };
        let Some(next_next) = track.next_valid(next + 1) else {
            break;
        };

        let offset = pts[traj].position - start;
        let (to_next, to_next_next) = if params.use_start_position {
            (
                pts[next].position - start,
                pts[next_next].position - start,
            )
        } else {
            (
                pts[next].position - pts[traj].position,
                pts[next_next].position - pts[candidate].position,
            )
        };

        // Zero-length vectors have no angle; skip the point without sliding.
        match colinear(&offset, &to_next, &to_next_next, cut) {
            Some(true) => return Ok((candidate, start)),
            Some(false) => {}
            None => continue,
        }
        if params.allow_dynamic_sliding {
            start = pts[traj].position;
        }
    }
    Err(AxisError::NoColinearTrajectoryPoint)
}

fn search_by_direction(
    track: &InitialTrack,
    cut: f64,
    params: &TrajectoryDirectionParams,
) -> Result<usize, AxisError> {
    let pts = &track.points;
    let first_valid = track.next_valid(0);
    for traj in 0..pts.len() - 2 {
        let candidate = traj + 1;
        if !track.is_valid(traj) || !track.is_valid(candidate) {
            continue;
        }
        let reference_index = if params.use_start_position {
            first_valid
        } else if params.allow_dynamic_sliding && traj != 0 {
            track.prev_valid(traj - 1)
        } else {
            Some(traj)
        };
        let Some(reference_index) = reference_index else {
            break;
        };
        let Some(next) = track.next_valid(traj + 1) else {
            break;
        };
        let Some(next_next) = track.next_valid(next + 1) else {
            break;
        };

        let reference = pts[reference_index].direction;
        if colinear(
            &reference,
            &pts[next].direction,
            &pts[next_next].direction,
            cut,
        ) == Some(true)
        {
            return Ok(candidate);
        }
    }
    Err(AxisError::NoColinearTrajectoryPoint)
}
