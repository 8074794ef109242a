use thiserror::Error;

/// Failures of the linear algebra routines applied to mean vectors and
/// covariance matrices.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LinalgError {

    #[error("Dimension mismatch: expected {expected} but found {found}")]
    DimensionMismatch { expected : usize, found : usize },

    #[error("Informed matrix is not square ({rows}x{cols})")]
    NotSquare { rows : usize, cols : usize },

    #[error("Informed matrix is not invertible")]
    Singular,

    #[error("Informed matrix is not symmetric")]
    NotSymmetric,

    #[error("Informed matrix is not positive semi-definite")]
    NotPositiveSemiDefinite,

    #[error("Informed values are not finite")]
    NonFinite

}

/// Failures of a sampling request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SamplingError {

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Linalg(#[from] LinalgError),

    /// The draw budget set at the sampler configuration was used up
    /// before the batch was complete.
    #[error("Sampling budget exhausted after {attempts} draws ({accepted} accepted)")]
    Exhausted { accepted : usize, attempts : u64 }

}
