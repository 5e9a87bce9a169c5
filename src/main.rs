use shower_axis::types::Point;
use shower_axis::{EstimatorParams, ShowerAxisEstimator};

fn main() {
    // Demo stub: a cone opening along +x from the origin, fed in reverse order
    let mut cloud = Vec::new();
    for step in 0..40 {
        let x = step as f64 * 0.5;
        let radius = 0.1 + 0.08 * x;
        for k in 0..6 {
            let phi = k as f64 * std::f64::consts::FRAC_PI_3 + step as f64 * 0.2;
            cloud.push(Point::new(x, radius * phi.cos(), radius * phi.sin()));
        }
    }
    cloud.reverse();

    let est = ShowerAxisEstimator::new(EstimatorParams::default());
    match est.estimate(&cloud, None, None) {
        Ok(report) => {
            let d = report.direction();
            let verified = report.axis.polarity.is_verified();
            println!(
                "direction=({:.3}, {:.3}, {:.3}) verified={} latency_ms={:.3}",
                d.x, d.y, d.z, verified, report.timing.total_ms
            );
        }
        Err(err) => eprintln!("estimation failed: {err}"),
    }
}
