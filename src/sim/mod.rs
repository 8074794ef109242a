/// Sampler configuration, loadable from JSON files.
pub mod config;

pub use config::*;

/// Rejection sampler restricted to the confidence regions of multivariate distributions.
pub mod region;

pub use region::*;
