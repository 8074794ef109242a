use nalgebra::*;
use serde::{Serialize, Deserialize};
use std::f64::consts::PI;
use super::Multivariate;
use crate::calc;
use crate::error::{LinalgError, SamplingError};

/// Contour of a bivariate normal at a fixed number of standard deviations from
/// its mean. Width and height are the full lengths of the major and minor axes;
/// angle is the counter-clockwise rotation of the major axis, in radians.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ellipse {

    pub center : (f64, f64),

    pub width : f64,

    pub height : f64,

    pub angle : f64

}

impl Ellipse {

    /// Builds the factor-sigma ellipse of the informed distribution, which must be bivariate.
    /// The factor must be a positive, finite number of standard deviations.
    pub fn new<D>(distr : &D, factor : f64) -> Result<Self, SamplingError>
        where D : Multivariate
    {
        if !(factor.is_finite() && factor > 0.0) {
            return Err(SamplingError::InvalidArgument(
                format!("Ellipse factor should be positive (found {})", factor)
            ));
        }
        if distr.dim() != 2 {
            return Err(LinalgError::DimensionMismatch { expected : 2, found : distr.dim() }.into());
        }
        let (u, vals) = calc::spectral_dec(distr.cov());
        let angle = u[(1, 0)].atan2(u[(0, 0)]);
        let width = 2. * factor * vals[0].max(0.0).sqrt();
        let height = 2. * factor * vals[1].max(0.0).sqrt();
        let center = (distr.mean()[0], distr.mean()[1]);
        Ok(Self { center, width, height, angle })
    }

    /// Returns n points over the ellipse outline (over rows), starting at the
    /// positive end of the major axis.
    pub fn boundary(&self, n : usize) -> DMatrix<f64> {
        let (sin_a, cos_a) = self.angle.sin_cos();
        let (a, b) = (self.width / 2., self.height / 2.);
        DMatrix::from_fn(n, 2, |i, j| {
            let t = 2. * PI * (i as f64) / (n as f64);
            let (x, y) = (a * t.cos(), b * t.sin());
            match j {
                0 => self.center.0 + cos_a * x - sin_a * y,
                _ => self.center.1 + sin_a * x + cos_a * y
            }
        })
    }

}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::prob::MultiNormal;

    const EPS : f64 = 1E-8;

    #[test]
    fn diagonal_axes() {
        let mn = MultiNormal::new(
            DVector::from_column_slice(&[1., 2.]),
            DMatrix::from_row_slice(2, 2, &[4., 0., 0., 1.])
        ).unwrap();
        let el = Ellipse::new(&mn, 2.).unwrap();
        assert!((el.width - 8.).abs() < EPS);
        assert!((el.height - 4.).abs() < EPS);
        assert!(el.angle.sin().abs() < EPS);
        assert_eq!(el.center, (1., 2.));
    }

    #[test]
    fn boundary_is_at_factor_distance() {
        let mn = MultiNormal::new(
            DVector::zeros(2),
            DMatrix::from_row_slice(2, 2, &[1., 2., 2., 9.])
        ).unwrap();
        for factor in [1., 2.].iter() {
            let el = Ellipse::new(&mn, *factor).unwrap();
            let metric = calc::Mahalanobis::new(mn.mean(), mn.cov()).unwrap();
            for row in el.boundary(32).row_iter() {
                let x = row.transpose();
                let d = metric.distance(&x).unwrap();
                assert!((d - factor.powi(2)).abs() < 1E-6);
            }
        }
    }

    #[test]
    fn requires_bivariate() {
        let mn = MultiNormal::new_standard(3);
        assert_eq!(
            Ellipse::new(&mn, 1.).unwrap_err(),
            SamplingError::Linalg(LinalgError::DimensionMismatch { expected : 2, found : 3 })
        );
    }

    #[test]
    fn invalid_factor() {
        let mn = MultiNormal::new_standard(2);
        for factor in [-1., 0., f64::NAN, f64::INFINITY].iter() {
            assert!(matches!(Ellipse::new(&mn, *factor), Err(SamplingError::InvalidArgument(_))));
        }
    }

}
