use crate::types::Point;
use nalgebra::Matrix3;

/// Running sums of the six independent entries of a weighted scatter matrix
/// `Σ w · d dᵀ`, where `d` is a point's offset from the centre.
pub(crate) struct CovarianceAccumulator {
    centre: Point,
    pub count: usize,
    pub sum_w: f64,
    pub xx: f64,
    pub yy: f64,
    pub zz: f64,
    pub xy: f64,
    pub xz: f64,
    pub yz: f64,
}

impl CovarianceAccumulator {
    pub(crate) fn new(centre: Point) -> Self {
        Self {
            centre,
            count: 0,
            sum_w: 0.0,
            xx: 0.0,
            yy: 0.0,
            zz: 0.0,
            xy: 0.0,
            xz: 0.0,
            yz: 0.0,
        }
    }

    pub(crate) fn push(&mut self, p: &Point, w: f64) {
        let d = p - self.centre;
        self.xx += w * d.x * d.x;
        self.yy += w * d.y * d.y;
        self.zz += w * d.z * d.z;
        self.xy += w * d.x * d.y;
        self.xz += w * d.x * d.z;
        self.yz += w * d.y * d.z;
        self.sum_w += w;
        self.count += 1;
    }

    /// Symmetric matrix normalised by the accumulated weight.
    pub(crate) fn normalized(&self) -> Matrix3<f64> {
        #[rustfmt::skip]
        let m = Matrix3::new(
            self.xx, self.xy, self.xz,
            self.xy, self.yy, self.yz,
            self.xz, self.yz, self.zz,
        );
        m / self.sum_w
    }
}
