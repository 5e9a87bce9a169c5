mod common;

use common::synthetic_cloud::{cone_shower, interleave};
use nalgebra::Vector3;
use shower_axis::centroid::DriftConditions;
use shower_axis::pca::PcaOptions;
use shower_axis::polarity::{PolarityOptions, PolarityPolicy};
use shower_axis::reconcile::Candidate;
use shower_axis::trajectory::{InitialTrack, TrajectoryPoint};
use shower_axis::types::{ChargeSample, Direction, Point, PolaritySource};
use shower_axis::{AxisError, EstimatorParams, Polarity, ShowerAxisEstimator, ShowerInput};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn directions() -> Vec<Direction> {
    vec![
        Direction::new(1.0, 0.0, 0.0),
        Direction::new(0.0, 0.0, -1.0),
        Direction::new(1.0, -2.0, 0.5).normalize(),
        Direction::new(-0.3, -0.4, -0.8).normalize(),
    ]
}

#[test]
fn cone_direction_follows_spread_growth() {
    init_logging();
    let est = ShowerAxisEstimator::new(EstimatorParams::default());
    for d in directions() {
        let cloud = interleave(&cone_shower(Point::new(5.0, -3.0, 12.0), d, 30, 0.7, 6));
        let report = est.estimate(&cloud, None, None).unwrap();
        let cos = report.direction().dot(&d);
        assert!(cos > 0.999, "direction {:?} vs truth {:?}", report.direction(), d);
        assert_eq!(
            report.axis.polarity,
            Polarity::Verified(PolaritySource::RmsGradient)
        );
        // The slope is measured along the unsigned axis, before any flip.
        let slope = report.polarity.rms_slope.unwrap();
        assert_eq!(report.polarity.flipped, slope < -f64::EPSILON);
    }
}

#[test]
fn vertex_governs_by_default() {
    init_logging();
    let est = ShowerAxisEstimator::new(EstimatorParams::default());
    for d in directions() {
        let apex = Point::new(-1.0, 2.0, 0.0);
        let cloud = cone_shower(apex, d, 30, 0.7, 6);
        let vertex = apex - d * 2.0;
        let report = est.estimate(&cloud, None, Some(&vertex)).unwrap();
        assert!(report.direction().dot(&d) > 0.999);
        assert_eq!(report.axis.polarity, Polarity::Verified(PolaritySource::Vertex));
        assert!(report.polarity.vertex_alignment.is_some());
    }
}

#[test]
fn policy_decides_between_conflicting_tests() {
    init_logging();
    let d = Direction::new(0.0, 1.0, 1.0).normalize();
    let cloud = cone_shower(Point::origin(), d, 30, 0.7, 6);
    // A start position beyond the wide end contradicts the spread growth.
    let misleading = Point::origin() + d * 40.0;

    let vertex_first = ShowerAxisEstimator::new(EstimatorParams::default());
    let report = vertex_first.estimate(&cloud, None, Some(&misleading)).unwrap();
    assert!(report.direction().dot(&d) < -0.999);

    let rms_first = ShowerAxisEstimator::new(EstimatorParams {
        polarity: PolarityOptions {
            policy: PolarityPolicy::RmsFirst,
            ..Default::default()
        },
        ..Default::default()
    });
    let report = rms_first.estimate(&cloud, None, Some(&misleading)).unwrap();
    assert!(report.direction().dot(&d) > 0.999);
    assert!(report.polarity.vertex_alignment.is_some());
    assert_eq!(
        report.axis.polarity,
        Polarity::Verified(PolaritySource::RmsGradient)
    );
}

#[test]
fn vertex_only_without_start_is_unverified() {
    init_logging();
    let est = ShowerAxisEstimator::new(EstimatorParams {
        polarity: PolarityOptions {
            policy: PolarityPolicy::VertexOnly,
            ..Default::default()
        },
        ..Default::default()
    });
    let cloud = cone_shower(Point::origin(), Direction::x(), 20, 0.5, 5);
    let report = est.estimate(&cloud, None, None).unwrap();
    assert_eq!(report.axis.polarity, Polarity::Unverified);
    assert!(!report.polarity.flipped);
    assert!(report.direction().x.abs() > 0.999);
}

#[test]
fn uniform_charge_matches_unweighted_estimate() {
    init_logging();
    let d = Direction::new(0.2, 0.9, -0.4).normalize();
    let cloud = cone_shower(Point::new(1.0, 1.0, 1.0), d, 25, 0.6, 6);
    let charges = vec![ChargeSample::new(1.0, 250.0); cloud.len()];

    let plain = ShowerAxisEstimator::new(EstimatorParams::default())
        .estimate(&cloud, None, None)
        .unwrap();
    let weighted = ShowerAxisEstimator::new(EstimatorParams {
        pca: PcaOptions {
            charge_weighted: true,
        },
        drift: DriftConditions::disabled(),
        ..Default::default()
    })
    .estimate(&cloud, Some(&charges), None)
    .unwrap();

    assert!((weighted.centre - plain.centre).norm() < 1e-9);
    assert!((weighted.direction() - plain.direction()).norm() < 1e-9);
    assert_eq!(weighted.total_charge, Some(cloud.len() as f64));
}

#[test]
fn lifetime_correction_shifts_weighted_centre_towards_late_hits() {
    init_logging();
    let cloud = cone_shower(Point::origin(), Direction::x(), 20, 0.5, 4);
    // Drift time grows along the shower, so later points get larger corrections.
    let charges: Vec<ChargeSample> = cloud
        .iter()
        .map(|p| ChargeSample::new(1.0, 100.0 * p.x))
        .collect();
    let est = ShowerAxisEstimator::new(EstimatorParams {
        pca: PcaOptions {
            charge_weighted: true,
        },
        ..Default::default()
    });
    let report = est.estimate(&cloud, Some(&charges), None).unwrap();
    let plain_x = cloud.iter().map(|p| p.x).sum::<f64>() / cloud.len() as f64;
    assert!(report.centre.x > plain_x);
    assert!(report.direction().x > 0.999);
}

#[test]
fn batch_keeps_input_order_and_isolates_failures() {
    init_logging();
    let mut inputs: Vec<ShowerInput> = directions()
        .into_iter()
        .map(|d| ShowerInput::from_points(cone_shower(Point::origin(), d, 20, 0.5, 6)))
        .collect();
    inputs.insert(
        2,
        ShowerInput::from_points(vec![Point::origin(), Point::new(1.0, 0.0, 0.0)]),
    );

    let est = ShowerAxisEstimator::new(EstimatorParams::default());
    let results = est.estimate_batch(&inputs);
    assert_eq!(results.len(), 5);
    assert!(matches!(
        results[2],
        Err(AxisError::InsufficientPoints { found: 2, .. })
    ));
    let truths = directions();
    let ok: Vec<_> = results
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != 2)
        .map(|(_, r)| r.as_ref().unwrap())
        .collect();
    for (estimate, d) in ok.iter().zip(truths.iter()) {
        assert!(estimate.direction().dot(d) > 0.999);
        assert!(estimate.reconciliation.is_none());
    }
}

fn straight_track(start: Point, d: Vector3<f64>, n: usize) -> InitialTrack {
    InitialTrack::new(
        (0..n)
            .map(|i| TrajectoryPoint::new(start + d * (i as f64 * 0.3), d))
            .collect(),
    )
}

#[test]
fn track_direction_is_reconciled_with_pca() {
    init_logging();
    let d = Direction::new(1.0, 1.0, 0.0).normalize();
    let apex = Point::new(0.0, 0.0, 3.0);
    let cloud = cone_shower(apex, d, 30, 0.7, 6);
    let est = ShowerAxisEstimator::new(EstimatorParams::default());

    let mut input = ShowerInput::from_points(cloud.clone());
    input.start_position = Some(apex);
    let tilted = Direction::new(1.0, 1.1, 0.0).normalize();
    input.initial_track = Some(straight_track(apex, tilted, 6));
    let estimate = est.estimate_input(&input).unwrap();
    let r = estimate.reconciliation.unwrap();
    assert_eq!(r.chosen, Candidate::First);
    assert!(estimate.direction().dot(&d) > 0.999);

    let mut input = ShowerInput::from_points(cloud);
    input.start_position = Some(apex);
    let sideways = Direction::new(0.0, 0.0, 1.0);
    input.initial_track = Some(straight_track(apex, sideways, 6));
    let estimate = est.estimate_input(&input).unwrap();
    let r = estimate.reconciliation.unwrap();
    assert_eq!(r.chosen, Candidate::Second);
    assert!(estimate.direction().dot(&sideways) > 0.999);
    assert!((r.angle - std::f64::consts::FRAC_PI_2).abs() < 1e-3);
}

#[test]
fn unusable_track_leaves_pca_direction() {
    init_logging();
    let d = Direction::z();
    let mut input = ShowerInput::from_points(cone_shower(Point::origin(), d, 20, 0.5, 6));
    input.initial_track = Some(straight_track(Point::origin(), d, 2));
    let estimate = ShowerAxisEstimator::new(EstimatorParams::default())
        .estimate_input(&input)
        .unwrap();
    assert!(estimate.secondary.is_none());
    assert!(estimate.reconciliation.is_none());
    assert!(estimate.direction().dot(&d) > 0.999);
}
