/// Multivariate normal distribution, chi-squared quantiles and error ellipses.
pub mod prob;

/// Linear algebra over covariance matrices: inversion, spectral decomposition
/// and the Mahalanobis distance.
pub mod calc;

/// Samplers restricted to the confidence regions of multivariate distributions.
pub mod sim;

/// Error types for linear algebra failures and invalid sampling requests.
pub mod error;

pub use error::{LinalgError, SamplingError};
