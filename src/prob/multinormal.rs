use nalgebra::*;
use super::*;
use serde::{Serialize, Deserialize};
use std::fmt::{self, Display};
use std::convert::TryFrom;
use rand::Rng;
use crate::calc::{self, SYMM_TOL};
use crate::error::LinalgError;

/// Serialized form of a multinormal: only the parameters are stored, and the
/// sampling factor is re-derived (and the parameters re-validated) on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiNormalParams {

    pub mu : Vec<f64>,

    /// Covariance rows
    pub sigma : Vec<Vec<f64>>

}

/// Multivariate normal parametrized by μ (px1) and Σ (pxp). Σ must be symmetric and
/// positive semi-definite; singular covariances are accepted (their realizations
/// lie on a lower-dimensional subspace), although no Mahalanobis metric can be built
/// from them.
///
/// Besides the parameters, this structure holds a matrix square root A of Σ
/// (A A^T = Σ) taken from its spectral decomposition, so that μ + A z for a standard
/// normal z is a realization of the distribution.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "MultiNormalParams", into = "MultiNormalParams")]
pub struct MultiNormal {

    mu : DVector<f64>,

    sigma : DMatrix<f64>,

    sigma_sqrt : DMatrix<f64>

}

impl MultiNormal {

    /// Builds a new multivariate distribution from a mu vector and a symmetric,
    /// positive semi-definite covariance matrix sigma.
    pub fn new(mu : DVector<f64>, sigma : DMatrix<f64>) -> Result<Self, LinalgError> {
        if sigma.nrows() != sigma.ncols() {
            return Err(LinalgError::NotSquare { rows : sigma.nrows(), cols : sigma.ncols() });
        }
        if mu.nrows() != sigma.nrows() {
            return Err(LinalgError::DimensionMismatch { expected : sigma.nrows(), found : mu.nrows() });
        }
        if !mu.iter().chain(sigma.iter()).all(|v| v.is_finite() ) {
            return Err(LinalgError::NonFinite);
        }
        if !calc::is_symmetric(&sigma) {
            return Err(LinalgError::NotSymmetric);
        }
        let (u, vals) = calc::spectral_dec(&sigma);
        let largest = vals.iter().fold(0.0f64, |m, v| m.max(v.abs()) );
        if vals.iter().any(|v| !v.is_finite() || *v < -SYMM_TOL * largest ) {
            return Err(LinalgError::NotPositiveSemiDefinite);
        }
        let scales = vals.map(|v| v.max(0.0).sqrt() );
        let sigma_sqrt = u * DMatrix::from_diagonal(&scales);
        Ok(Self { mu, sigma, sigma_sqrt })
    }

    /// Creates a centered multinormal with identity covariance of size p.
    pub fn new_standard(p : usize) -> Self {
        let mu = DVector::zeros(p);
        let sigma = DMatrix::identity(p, p);
        let sigma_sqrt = sigma.clone();
        Self { mu, sigma, sigma_sqrt }
    }

    /// Matrix square root of the covariance, used to scale standard normal draws.
    pub fn cov_sqrt(&self) -> &DMatrix<f64> {
        &self.sigma_sqrt
    }

}

impl Multivariate for MultiNormal {

    fn mean(&self) -> &DVector<f64> {
        &self.mu
    }

    fn cov(&self) -> &DMatrix<f64> {
        &self.sigma
    }

    fn draw<R>(&self, rng : &mut R) -> DVector<f64>
        where R : Rng + ?Sized
    {
        let z = DVector::from_fn(self.mu.nrows(), |_, _| rng.sample::<f64, _>(rand_distr::StandardNormal) );
        &self.sigma_sqrt * z + &self.mu
    }

}

impl rand_distr::Distribution<DVector<f64>> for MultiNormal {

    fn sample<R>(&self, rng : &mut R) -> DVector<f64>
        where R : Rng + ?Sized
    {
        self.draw(rng)
    }

}

impl TryFrom<MultiNormalParams> for MultiNormal {

    type Error = LinalgError;

    fn try_from(p : MultiNormalParams) -> Result<Self, LinalgError> {
        let n = p.mu.len();
        if p.sigma.len() != n {
            return Err(LinalgError::DimensionMismatch { expected : n, found : p.sigma.len() });
        }
        if let Some(row) = p.sigma.iter().find(|row| row.len() != n ) {
            return Err(LinalgError::NotSquare { rows : n, cols : row.len() });
        }
        let flat : Vec<f64> = p.sigma.iter().flatten().cloned().collect();
        MultiNormal::new(DVector::from_vec(p.mu), DMatrix::from_row_slice(n, n, &flat[..]))
    }

}

impl From<MultiNormal> for MultiNormalParams {

    fn from(mn : MultiNormal) -> Self {
        let mu = mn.mu.iter().cloned().collect();
        let sigma = mn.sigma.row_iter().map(|row| row.iter().cloned().collect() ).collect();
        MultiNormalParams { mu, sigma }
    }

}

impl Display for MultiNormal {

    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MNorm({})", self.mu.nrows())
    }

}
