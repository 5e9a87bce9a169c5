use nalgebra::{Point3, Vector3};

/// Generates a cone-shaped shower starting at `apex` and opening along
/// `direction`.
///
/// Points sit on `steps` rings spaced `spacing` apart; ring `k` has radius
/// `r0 + opening * s_k`. Ring phases rotate so no two rings line up.
pub fn cone_shower(
    apex: Point3<f64>,
    direction: Vector3<f64>,
    steps: usize,
    spacing: f64,
    per_ring: usize,
) -> Vec<Point3<f64>> {
    assert!(steps > 0 && per_ring > 0, "cone needs rings and points");
    let d = direction.normalize();
    let (u, v) = orthonormal_basis(&d);
    let (r0, opening) = (0.1, 0.08);

    let mut cloud = Vec::with_capacity(steps * per_ring);
    for k in 0..steps {
        let s = k as f64 * spacing;
        let radius = r0 + opening * s;
        for j in 0..per_ring {
            let phi = std::f64::consts::TAU * j as f64 / per_ring as f64 + 0.37 * k as f64;
            cloud.push(apex + d * s + (u * phi.cos() + v * phi.sin()) * radius);
        }
    }
    cloud
}

/// Deterministic permutation so tests do not depend on generation order.
pub fn interleave(cloud: &[Point3<f64>]) -> Vec<Point3<f64>> {
    let n = cloud.len();
    let stride = (n / 3 + 1..n).find(|s| gcd(*s, n) == 1).unwrap_or(1);
    (0..n).map(|i| cloud[(i * stride) % n]).collect()
}

fn gcd(a: usize, b: usize) -> usize {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

fn orthonormal_basis(d: &Vector3<f64>) -> (Vector3<f64>, Vector3<f64>) {
    let helper = if d.x.abs() < 0.9 {
        Vector3::x()
    } else {
        Vector3::y()
    };
    let u = d.cross(&helper).normalize();
    let v = d.cross(&u);
    (u, v)
}
