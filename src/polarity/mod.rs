//! Resolution of the two-fold sign ambiguity of a principal axis.
//!
//! Two independent tests are available:
//!
//! - Vertex test: with a known start position `v`, the general direction
//!   `unit(centre - v)` is compared with the candidate; a negative dot product
//!   flips the candidate.
//! - Segmented RMS gradient: the cloud is ordered along the candidate axis and
//!   cut into `N` longitudinal segments. The transverse RMS of each segment is
//!   regressed against segment index. Showers widen away from their origin, so
//!   a negative slope flips the candidate.
//!
//! [`resolve_polarity`] evaluates both tests whenever their inputs exist and
//! lets [`PolarityPolicy`] pick the one that governs. If only one test is
//! available it is used; if neither is, the canonical sign is kept and the
//! axis is marked [`Polarity::Unverified`].

mod options;
mod rms_gradient;
mod vertex;

pub use options::{BucketCentering, PolarityOptions, PolarityPolicy};
pub use rms_gradient::{
    linear_slope, rms_gradient, sample_rms, BucketSummary, RmsGradient, SegmentProfile,
};
pub use vertex::vertex_alignment;

use crate::error::AxisError;
use crate::types::{Point, Polarity, PolaritySource, ShowerAxis, UnsignedAxis};
use log::debug;

/// Outcome of polarity resolution, with both diagnostics when available.
#[derive(Clone, Debug, PartialEq)]
pub struct PolarityDecision {
    pub axis: ShowerAxis,
    pub flipped: bool,
    /// Dot product of the unsigned direction with `unit(centre - start)`.
    pub vertex_alignment: Option<f64>,
    pub rms_gradient: Option<RmsGradient>,
}

/// Orients `axis` using the vertex test and/or the RMS gradient of `cloud`.
///
/// Only invalid options produce an error; unavailable tests degrade to an
/// unverified polarity.
pub fn resolve_polarity(
    axis: &UnsignedAxis,
    cloud: &[Point],
    start: Option<&Point>,
    options: &PolarityOptions,
) -> Result<PolarityDecision, AxisError> {
    options.validate()?;

    let vertex = start.and_then(|s| vertex_alignment(&axis.direction, &axis.origin, s));
    if start.is_some() && vertex.is_none() {
        debug!("polarity: start position coincides with the shower centre, vertex test skipped");
    }

    let rms = match rms_gradient(cloud, &axis.origin, &axis.direction, options) {
        Ok(g) => Some(g),
        Err(err) => {
            debug!("polarity: RMS gradient unavailable ({err})");
            None
        }
    };

    let vertex_vote = vertex.map(|dot| (PolaritySource::Vertex, dot < 0.0));
    let rms_vote = rms
        .as_ref()
        .map(|g| (PolaritySource::RmsGradient, g.slope < -options.slope_tolerance));

    let vote = match options.policy {
        PolarityPolicy::VertexFirst => vertex_vote.or(rms_vote),
        PolarityPolicy::RmsFirst => rms_vote.or(vertex_vote),
        PolarityPolicy::VertexOnly => vertex_vote,
        PolarityPolicy::RmsOnly => rms_vote,
    };

    let (flipped, polarity) = match vote {
        Some((source, flip)) => (flip, Polarity::Verified(source)),
        None => {
            debug!("polarity: no test available, keeping canonical sign");
            (false, Polarity::Unverified)
        }
    };

    Ok(PolarityDecision {
        axis: axis.orient(flipped, polarity),
        flipped,
        vertex_alignment: vertex,
        rms_gradient: rms,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Direction;

    fn growing_cloud() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(2.0, 0.0, 0.0),
            Point::new(3.0, 0.0, 1.0),
            Point::new(4.0, 0.0, 1.0),
        ]
    }

    fn axis_along(dir: Direction) -> UnsignedAxis {
        UnsignedAxis::new(Point::new(2.0, 0.0, 0.4), dir)
    }

    fn rms_options() -> PolarityOptions {
        PolarityOptions {
            segments: 2,
            ..Default::default()
        }
    }

    #[test]
    fn rms_keeps_direction_along_growth() {
        let d = resolve_polarity(&axis_along(Direction::x()), &growing_cloud(), None, &rms_options())
            .unwrap();
        assert!(!d.flipped);
        assert_eq!(d.axis.direction, Direction::x());
        assert_eq!(d.axis.polarity, Polarity::Verified(PolaritySource::RmsGradient));
        assert!(d.vertex_alignment.is_none());
    }

    #[test]
    fn rms_flips_direction_against_growth() {
        let d = resolve_polarity(
            &axis_along(-Direction::x()),
            &growing_cloud(),
            None,
            &rms_options(),
        )
        .unwrap();
        assert!(d.flipped);
        assert_eq!(d.axis.direction, Direction::x());
    }

    #[test]
    fn vertex_governs_by_default() {
        // Start at the far end: vertex test says -x even though RMS says +x.
        let start = Point::new(10.0, 0.0, 0.4);
        let d = resolve_polarity(
            &axis_along(Direction::x()),
            &growing_cloud(),
            Some(&start),
            &rms_options(),
        )
        .unwrap();
        assert!(d.flipped);
        assert_eq!(d.axis.polarity, Polarity::Verified(PolaritySource::Vertex));
        assert!(d.rms_gradient.as_ref().unwrap().slope > 0.0);
    }

    #[test]
    fn rms_first_policy_overrides_vertex() {
        let start = Point::new(10.0, 0.0, 0.4);
        let opts = PolarityOptions {
            policy: PolarityPolicy::RmsFirst,
            ..rms_options()
        };
        let d = resolve_polarity(&axis_along(Direction::x()), &growing_cloud(), Some(&start), &opts)
            .unwrap();
        assert!(!d.flipped);
        assert!(d.vertex_alignment.unwrap() < 0.0);
    }

    #[test]
    fn falls_back_to_vertex_when_regression_is_indeterminate() {
        let opts = PolarityOptions {
            segments: 1,
            ..Default::default()
        };
        let start = Point::new(-3.0, 0.0, 0.0);
        let d = resolve_polarity(&axis_along(-Direction::x()), &growing_cloud(), Some(&start), &opts)
            .unwrap();
        assert!(d.rms_gradient.is_none());
        assert!(d.flipped);
        assert_eq!(d.axis.polarity, Polarity::Verified(PolaritySource::Vertex));
    }

    #[test]
    fn unverified_when_no_test_available() {
        let opts = PolarityOptions {
            segments: 1,
            ..Default::default()
        };
        let axis = axis_along(-Direction::x());
        let d = resolve_polarity(&axis, &growing_cloud(), None, &opts).unwrap();
        assert!(!d.flipped);
        assert_eq!(d.axis.direction, axis.direction);
        assert_eq!(d.axis.polarity, Polarity::Unverified);
    }

    #[test]
    fn vertex_only_ignores_rms() {
        let opts = PolarityOptions {
            policy: PolarityPolicy::VertexOnly,
            ..rms_options()
        };
        let d = resolve_polarity(&axis_along(-Direction::x()), &growing_cloud(), None, &opts)
            .unwrap();
        assert_eq!(d.axis.polarity, Polarity::Unverified);
        assert!(d.rms_gradient.is_some());
    }
}
