use nalgebra::*;
use rand::Rng;
use log::{debug, trace};
use crate::prob::{Multivariate, chi_squared_quantile};
use crate::calc::Mahalanobis;
use crate::error::SamplingError;
use super::SamplerConfig;

/// Batch of realizations accepted by the region sampler, with the threshold
/// they were accepted against and the number of draws it took to collect them.
#[derive(Debug, Clone)]
pub struct RegionSample {

    pub samples : Vec<DVector<f64>>,

    /// Upper bound on the squared Mahalanobis distance of all accepted samples.
    pub threshold : f64,

    /// Total draws, accepted and rejected.
    pub attempts : u64,

    dim : usize

}

impl RegionSample {

    /// Fraction of draws which fell within the region.
    pub fn acceptance_rate(&self) -> Option<f64> {
        if self.attempts == 0 {
            None
        } else {
            Some(self.samples.len() as f64 / self.attempts as f64)
        }
    }

    /// Arranges the samples over the rows of a n x p matrix, in acceptance order.
    pub fn to_matrix(&self) -> DMatrix<f64> {
        let mut m = DMatrix::zeros(self.samples.len(), self.dim);
        for (mut row, s) in m.row_iter_mut().zip(self.samples.iter()) {
            row.copy_from(&s.transpose());
        }
        m
    }

}

/// Rejection sampler over the confidence region of a multivariate distribution:
/// the set of points which have squared Mahalanobis distance to the distribution mean
/// no greater than the chi-squared quantile at the requested confidence level.
/// Candidates are drawn from the full distribution and discarded until they fall within
/// the region, so accepted samples follow the distribution conditioned on the region.
#[derive(Debug, Clone, Default)]
pub struct RegionSampler {
    config : SamplerConfig
}

impl RegionSampler {

    pub fn new(config : SamplerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// Squared Mahalanobis distance bounding the region at confidence level alpha
    /// for a distribution of dimension p.
    pub fn threshold(&self, p : usize, alpha : f64) -> Result<f64, SamplingError> {
        if !(alpha > 0.0 && alpha < 1.0) {
            return Err(SamplingError::InvalidArgument(
                format!("Confidence level {} outside (0, 1)", alpha)
            ));
        }
        let dof = self.config.dof.for_dim(p);
        if dof == 0 {
            return Err(SamplingError::InvalidArgument(
                format!("No degrees of freedom left for a distribution of dimension {}", p)
            ));
        }
        chi_squared_quantile(dof as f64, alpha)
    }

    /// Draws n samples within the confidence region at level alpha, in the
    /// order they were accepted.
    pub fn sample<D, R>(
        &self,
        distr : &D,
        rng : &mut R,
        n : usize,
        alpha : f64
    ) -> Result<Vec<DVector<f64>>, SamplingError>
    where
        D : Multivariate,
        R : Rng + ?Sized
    {
        Ok(self.sample_with_stats(distr, rng, n, alpha)?.samples)
    }

    /// Same as sample, but also reports the threshold and how many draws were made.
    pub fn sample_with_stats<D, R>(
        &self,
        distr : &D,
        rng : &mut R,
        n : usize,
        alpha : f64
    ) -> Result<RegionSample, SamplingError>
    where
        D : Multivariate,
        R : Rng + ?Sized
    {
        let dim = distr.dim();
        let threshold = self.threshold(dim, alpha)?;
        let mut region = RegionSample { samples : Vec::with_capacity(n), threshold, attempts : 0, dim };
        if n == 0 {
            return Ok(region);
        }
        let metric = Mahalanobis::new(distr.mean(), distr.cov())?;
        while region.samples.len() < n {
            if let Some(max) = self.config.max_attempts {
                if region.attempts >= max {
                    return Err(SamplingError::Exhausted {
                        accepted : region.samples.len(),
                        attempts : region.attempts
                    });
                }
            }
            let candidate = distr.draw(rng);
            region.attempts += 1;
            let dist = metric.distance(&candidate)?;
            if dist <= threshold {
                region.samples.push(candidate);
            } else {
                trace!("Rejected candidate at distance {} (threshold {})", dist, threshold);
            }
        }
        debug!(
            "{}: accepted {} of {} draws at alpha = {} (threshold {})",
            distr,
            region.samples.len(),
            region.attempts,
            alpha,
            threshold
        );
        Ok(region)
    }

}

/// Draws n samples from distr restricted to its confidence region at level alpha,
/// retrying rejected draws without limit.
pub fn sample_confidence_region<D, R>(
    distr : &D,
    rng : &mut R,
    n : usize,
    alpha : f64
) -> Result<Vec<DVector<f64>>, SamplingError>
where
    D : Multivariate,
    R : Rng + ?Sized
{
    RegionSampler::default().sample(distr, rng, n, alpha)
}
