use statrs::distribution::{ChiSquared, ContinuousCDF};
use crate::error::SamplingError;

/// Returns the value below which a chi-squared variable with the informed degrees
/// of freedom falls with probability p (the inverse of its cumulative distribution).
/// The squared Mahalanobis distance of a p-variate normal realization follows a chi-squared
/// distribution with p degrees of freedom, so this is the distance threshold of the
/// confidence region at level p.
pub fn chi_squared_quantile(dof : f64, p : f64) -> Result<f64, SamplingError> {
    if !dof.is_finite() || dof <= 0.0 {
        return Err(SamplingError::InvalidArgument(
            format!("Chi-squared degrees of freedom should be positive (found {})", dof)
        ));
    }
    if !(p > 0.0 && p < 1.0) {
        return Err(SamplingError::InvalidArgument(
            format!("Probability {} outside (0, 1)", p)
        ));
    }
    let distr = ChiSquared::new(dof)
        .map_err(|e| SamplingError::InvalidArgument(format!("{}", e)) )?;
    Ok(distr.inverse_cdf(p))
}
