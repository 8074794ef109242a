use nalgebra::*;
use crate::error::LinalgError;

/// Relative tolerance for the symmetry and semi-definiteness checks.
pub(crate) const SYMM_TOL : f64 = 1E-8;

fn check_square(m : &DMatrix<f64>) -> Result<usize, LinalgError> {
    if m.nrows() != m.ncols() {
        return Err(LinalgError::NotSquare { rows : m.nrows(), cols : m.ncols() });
    }
    Ok(m.nrows())
}

fn check_finite<'a, I>(vals : I) -> Result<(), LinalgError>
where
    I : IntoIterator<Item=&'a f64>
{
    if vals.into_iter().all(|v| v.is_finite() ) {
        Ok(())
    } else {
        Err(LinalgError::NonFinite)
    }
}

fn check_dim(expected : usize, found : usize) -> Result<(), LinalgError> {
    if expected != found {
        Err(LinalgError::DimensionMismatch { expected, found })
    } else {
        Ok(())
    }
}

/// Inverts a covariance matrix via its LU decomposition. The matrix is considered
/// singular when any pivot is within round-off (machine epsilon times the dimension)
/// of zero relative to the largest pivot. Badly scaled but full-rank matrices are still inverted.
pub fn invert_covariance(cov : &DMatrix<f64>) -> Result<DMatrix<f64>, LinalgError> {
    let n = check_square(cov)?;
    if n == 0 {
        return Err(LinalgError::Singular);
    }
    check_finite(cov.iter())?;
    let lu = LU::new(cov.clone());
    let pivots = lu.u().diagonal().map(|p| p.abs() );
    let max_pivot = pivots.max();
    let tol = max_pivot * f64::EPSILON * n as f64;
    if !max_pivot.is_finite() || max_pivot == 0.0 || pivots.min() <= tol {
        return Err(LinalgError::Singular);
    }
    lu.try_inverse().ok_or(LinalgError::Singular)
}

/// Verifies if the informed matrix is square and symmetric (within a tolerance relative
/// to the largest entry magnitude).
pub fn is_symmetric(m : &DMatrix<f64>) -> bool {
    if m.nrows() != m.ncols() {
        return false;
    }
    let scale = m.iter().fold(0.0f64, |s, v| s.max(v.abs()) );
    for i in 0..m.nrows() {
        for j in (i+1)..m.ncols() {
            let (a, b) = (m[(i, j)], m[(j, i)]);
            if !((a - b).abs() <= SYMM_TOL * scale) {
                return false;
            }
        }
    }
    true
}

/// Computes the spectral decomposition of the symmetric matrix m.
/// Returns the eigenvectors (over columns) and the eigenvalues, sorted by
/// decreasing eigenvalue, such that M = U D U^T.
pub fn spectral_dec(m : &DMatrix<f64>) -> (DMatrix<f64>, DVector<f64>) {
    let eigen = SymmetricEigen::new(m.clone());
    let mut order : Vec<usize> = (0..eigen.eigenvalues.nrows()).collect();
    order.sort_by(|a, b| {
        eigen.eigenvalues[*b].partial_cmp(&eigen.eigenvalues[*a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let vals = DVector::from_iterator(order.len(), order.iter().map(|i| eigen.eigenvalues[*i] ));
    let mut vecs = DMatrix::zeros(m.nrows(), order.len());
    for (dst, src) in order.iter().enumerate() {
        vecs.column_mut(dst).copy_from(&eigen.eigenvectors.column(*src));
    }
    (vecs, vals)
}

/// Returns the squared Mahalanobis distance (x - mu)^T sigma^-1 (x - mu).
pub fn mahalanobis_distance(
    x : &DVector<f64>,
    mu : &DVector<f64>,
    sigma : &DMatrix<f64>
) -> Result<f64, LinalgError> {
    Mahalanobis::new(mu, sigma)?.distance(x)
}

/// Mahalanobis metric around a fixed location, holding the inverted covariance
/// so that many points can be evaluated against a single inversion.
#[derive(Debug, Clone)]
pub struct Mahalanobis {

    mu : DVector<f64>,

    sigma_inv : DMatrix<f64>

}

impl Mahalanobis {

    pub fn new(mu : &DVector<f64>, sigma : &DMatrix<f64>) -> Result<Self, LinalgError> {
        let n = check_square(sigma)?;
        check_dim(n, mu.nrows())?;
        check_finite(mu.iter())?;
        let sigma_inv = invert_covariance(sigma)?;
        Ok(Self { mu : mu.clone(), sigma_inv })
    }

    pub fn dim(&self) -> usize {
        self.mu.nrows()
    }

    /// Squared distance of x to the location. Round-off can make the quadratic
    /// form slightly negative at the location itself, so it is clamped at zero.
    /// Points with non-finite entries have no distance.
    pub fn distance(&self, x : &DVector<f64>) -> Result<f64, LinalgError> {
        check_dim(self.mu.nrows(), x.nrows())?;
        check_finite(x.iter())?;
        let xc = x - &self.mu;
        let d = (&self.sigma_inv * &xc).dot(&xc);
        if !d.is_finite() {
            return Err(LinalgError::NonFinite);
        }
        Ok(if d < 0.0 { 0.0 } else { d })
    }

}
