//! Longitudinal/transverse coordinates of points relative to an axis line and
//! orderings of a cloud built on them.
//!
//! The axis is given as an origin and a direction. The direction is typically
//! unit length; for non-unit directions the projection is scaled accordingly.
//! All orderings are stable: ties keep the input order.

use crate::centroid::distance_between;
use crate::error::AxisError;
use crate::types::{Direction, Point};
use std::cmp::Ordering;

/// Scalar position of `p` along the axis: `(p - origin) · direction`.
#[inline]
pub fn projection(p: &Point, origin: &Point, direction: &Direction) -> f64 {
    (p - origin).dot(direction)
}

/// Distance of `p` from the axis line.
#[inline]
pub fn perpendicular(p: &Point, origin: &Point, direction: &Direction) -> f64 {
    perpendicular_with_projection(p, origin, direction, projection(p, origin, direction))
}

/// Same as [`perpendicular`] when the projection is already known.
#[inline]
pub fn perpendicular_with_projection(
    p: &Point,
    origin: &Point,
    direction: &Direction,
    proj: f64,
) -> f64 {
    ((p - origin) - direction * proj).norm()
}

/// Returns the cloud sorted by ascending projection along the axis.
pub fn order_by_projection(
    cloud: &[Point],
    origin: &Point,
    direction: &Direction,
) -> Result<Vec<Point>, AxisError> {
    ensure_direction(direction)?;
    Ok(sorted_by_key(cloud, |p| projection(p, origin, direction)))
}

/// Returns the cloud sorted by ascending distance from the axis line.
///
/// Useful before the axis orientation is trusted, since the key does not
/// depend on the direction sign.
pub fn order_by_perpendicular(
    cloud: &[Point],
    origin: &Point,
    direction: &Direction,
) -> Result<Vec<Point>, AxisError> {
    ensure_direction(direction)?;
    Ok(sorted_by_key(cloud, |p| perpendicular(p, origin, direction)))
}

/// Returns the cloud sorted by ascending distance from `vertex`.
pub fn order_by_distance(cloud: &[Point], vertex: &Point) -> Vec<Point> {
    sorted_by_key(cloud, |p| distance_between(p, vertex))
}

fn ensure_direction(direction: &Direction) -> Result<(), AxisError> {
    let norm = direction.norm();
    if norm.is_finite() && norm > 0.0 {
        Ok(())
    } else {
        Err(AxisError::ZeroVector {
            context: "axis direction",
        })
    }
}

fn sorted_by_key<F>(cloud: &[Point], key: F) -> Vec<Point>
where
    F: Fn(&Point) -> f64,
{
    let mut keyed: Vec<(f64, Point)> = cloud.iter().map(|p| (key(p), *p)).collect();
    keyed.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
    keyed.into_iter().map(|(_, p)| p).collect()
}
