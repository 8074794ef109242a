use nalgebra::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use confregion::prob::*;
use confregion::sim::*;
use confregion::calc::mahalanobis_distance;
use confregion::{LinalgError, SamplingError};

const EPS : f64 = 1E-2;

fn example() -> MultiNormal {
    MultiNormal::new(
        DVector::from_column_slice(&[0.0, 0.0]),
        DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 2.0, 9.0])
    ).unwrap()
}

#[test]
fn one_sigma_region() {
    let mn = example();
    let mut rng = StdRng::seed_from_u64(100);
    let samples = sample_confidence_region(&mn, &mut rng, 1000, 0.6827).unwrap();
    assert_eq!(samples.len(), 1000);
    let threshold = chi_squared_quantile(1.0, 0.6827).unwrap();
    assert!((threshold - 1.0).abs() < EPS);
    for s in samples.iter() {
        assert_eq!(s.nrows(), 2);
        let d = mahalanobis_distance(s, mn.mean(), mn.cov()).unwrap();
        assert!(d <= threshold);
    }
}

#[test]
fn two_sigma_region() {
    let mn = example();
    let mut rng = StdRng::seed_from_u64(100);
    let threshold = chi_squared_quantile(1.0, 0.9545).unwrap();
    for s in sample_confidence_region(&mn, &mut rng, 1000, 0.9545).unwrap().iter() {
        assert!(mahalanobis_distance(s, mn.mean(), mn.cov()).unwrap() <= threshold);
    }
}

#[test]
fn reseeded_generator_repeats_batch() {
    let mn = example();
    let a = sample_confidence_region(&mn, &mut StdRng::seed_from_u64(42), 200, 0.9545).unwrap();
    let b = sample_confidence_region(&mn, &mut StdRng::seed_from_u64(42), 200, 0.9545).unwrap();
    assert_eq!(a, b);
    let c = sample_confidence_region(&mn, &mut StdRng::seed_from_u64(43), 200, 0.9545).unwrap();
    assert_ne!(a, c);
}

#[test]
fn wider_regions_reject_less() {
    let mn = example();
    let sampler = RegionSampler::default();
    let mut rng = StdRng::seed_from_u64(7);
    let mut last_threshold = 0.0;
    let mut last_rate = 0.0;
    for alpha in [0.3, 0.6827, 0.9545, 0.999].iter() {
        let out = sampler.sample_with_stats(&mn, &mut rng, 2000, *alpha).unwrap();
        let rate = out.acceptance_rate().unwrap();
        assert!(out.threshold > last_threshold);
        assert!(rate > last_rate);
        last_threshold = out.threshold;
        last_rate = rate;
    }
    assert!(last_rate > 0.9);
}

#[test]
fn empty_request() {
    let mn = example();
    let mut rng = StdRng::seed_from_u64(1);
    assert!(sample_confidence_region(&mn, &mut rng, 0, 0.6827).unwrap().is_empty());
}

#[test]
fn singular_covariance() {
    let mn = MultiNormal::new(
        DVector::from_column_slice(&[0.0, 0.0]),
        DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 2.0, 4.0])
    ).unwrap();
    let mut rng = StdRng::seed_from_u64(1);
    assert_eq!(
        sample_confidence_region(&mn, &mut rng, 10, 0.6827).unwrap_err(),
        SamplingError::Linalg(LinalgError::Singular)
    );
}

#[test]
fn unconstrained_reaches_outside_region() {
    let mn = example();
    let mut rng = StdRng::seed_from_u64(100);
    let threshold = chi_squared_quantile(1.0, 0.6827).unwrap();
    let samples = mn.sample(&mut rng, 1000);
    let outside = samples.row_iter()
        .filter(|row| {
            let x = row.transpose();
            mahalanobis_distance(&x, mn.mean(), mn.cov()).unwrap() > threshold
        })
        .count();

    // The distance of bivariate draws follows a chi-squared(2), which exceeds 1 with probability ~0.61.
    assert!(outside > 500 && outside < 720);
}
