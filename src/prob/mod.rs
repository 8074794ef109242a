use nalgebra::*;
use rand::Rng;
use std::fmt::{Debug, Display};

mod multinormal;

pub use multinormal::*;

/// Quantiles of the chi-squared distribution, which map confidence levels
/// to Mahalanobis distance thresholds.
mod chisq;

pub use chisq::*;

/// k-sigma contours of bivariate normals.
mod ellipse;

pub use ellipse::*;

/// Trait shared by continuous multivariate distributions which are summarized
/// by a location vector and a dispersion matrix, and which can be sampled from.
/// Samples of dimension p are represented as p-dimensional column vectors
/// when drawn one at a time, and over the rows of a n x p matrix when drawn
/// in batches.
///
/// Sampling never touches global random state: the caller owns the random
/// generator and lends it to each draw, so seeding the generator fully determines
/// the sequence of samples.
pub trait Multivariate
    where Self : Debug + Display
{

    /// Returns the expected value of the distribution.
    fn mean(&self) -> &DVector<f64>;

    /// Returns the covariance matrix of the distribution.
    fn cov(&self) -> &DMatrix<f64>;

    fn dim(&self) -> usize {
        self.mean().nrows()
    }

    /// Draws a single realization.
    fn draw<R>(&self, rng : &mut R) -> DVector<f64>
        where R : Rng + ?Sized;

    /// Draws n independent realizations, arranged over the rows of the output.
    fn sample<R>(&self, rng : &mut R, n : usize) -> DMatrix<f64>
        where R : Rng + ?Sized
    {
        let mut dst = DMatrix::zeros(n, self.dim());
        for mut row in dst.row_iter_mut() {
            let s = self.draw(rng);
            row.copy_from(&s.transpose());
        }
        dst
    }

}
