use serde::{Serialize, Deserialize};
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Rule mapping the distribution dimensionality p to the degrees of freedom of the
/// chi-squared distribution from which the acceptance threshold is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DegreesOfFreedom {

    /// p - 1 degrees of freedom. For bivariate distributions, the 1-sigma and 2-sigma regions
    /// are then bounded at the distances 1 and 4, as for the univariate 1-sigma and
    /// 2-sigma intervals.
    DimensionMinusOne,

    /// p degrees of freedom, which is the distribution of the squared Mahalanobis
    /// distance of p-variate normal realizations; the accepted region then holds
    /// exactly the requested probability mass.
    Dimension

}

impl DegreesOfFreedom {

    pub fn for_dim(&self, p : usize) -> usize {
        match self {
            DegreesOfFreedom::DimensionMinusOne => p.saturating_sub(1),
            DegreesOfFreedom::Dimension => p
        }
    }

}

impl Default for DegreesOfFreedom {

    fn default() -> Self {
        DegreesOfFreedom::DimensionMinusOne
    }

}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {

    /// Maximum number of draws (accepted or rejected) per sampling call. If None,
    /// the sampler keeps drawing until the batch is complete.
    pub max_attempts : Option<u64>,

    pub dof : DegreesOfFreedom

}

impl Default for SamplerConfig {

    fn default() -> Self {
        Self { max_attempts : None, dof : DegreesOfFreedom::default() }
    }

}

impl SamplerConfig {

    pub fn load_from_path<P>(path : P) -> Result<Self, Box<dyn Error>>
    where
        P : AsRef<Path>
    {
        let f = File::open(path)?;
        Self::load(f)
    }

    pub fn load<R>(mut reader : R) -> Result<Self, Box<dyn Error>>
    where
        R : Read
    {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        let config : SamplerConfig = serde_json::from_str(&content[..])?;
        Ok(config)
    }

}
