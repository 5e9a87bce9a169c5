use crate::angle::unit;
use crate::types::{Direction, Point};

/// Dot product between `direction` and the general shower direction
/// `unit(centre - start)`.
///
/// A negative value means the candidate points back towards the start and
/// must be flipped. Returns `None` when the centre coincides with the start,
/// in which case the test cannot be applied.
pub fn vertex_alignment(direction: &Direction, centre: &Point, start: &Point) -> Option<f64> {
    let general = unit(&(centre - start))?;
    Some(direction.dot(&general))
}
