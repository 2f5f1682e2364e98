// src/io/demand.rs

use crate::error::{DdmrpError, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

/// Every sample has the same final demand.
pub fn generate_constant_demand(samples: usize, value: f64) -> Vec<f64> {
    vec![value.max(0.0); samples]
}

/// Final-demand samples from a Normal distribution, reproducible by seed.
///
/// # Arguments
/// * `samples` - Number of demand values to draw.
/// * `mean` - Expected final demand per period (e.g., 500.0).
/// * `std_dev` - Volatility of that demand (e.g., 80.0).
/// * `seed` - Seed of the random generator.
///
/// Negative draws are clamped to 0 (demand cannot be negative).
pub fn generate_normal_demand(
    samples: usize,
    mean: f64,
    std_dev: f64,
    seed: u64,
) -> Result<Vec<f64>> {
    let normal = Normal::new(mean, std_dev)
        .map_err(|_| DdmrpError::InvalidDemandDistribution { mean, std_dev })?;
    let mut rng = StdRng::seed_from_u64(seed);

    Ok((0..samples)
        .map(|_| normal.sample(&mut rng).max(0.0))
        .collect())
}

/// `base` for the first `step_at` samples, then `stepped` for the rest.
/// A sudden demand jump, handy to see where buffers start paying off.
pub fn generate_step_demand(samples: usize, base: f64, stepped: f64, step_at: usize) -> Vec<f64> {
    (0..samples)
        .map(|i| if i < step_at { base } else { stepped })
        .map(|d| d.max(0.0))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_demand_is_seeded_and_non_negative() {
        let a = generate_normal_demand(50, 100.0, 80.0, 7).unwrap();
        let b = generate_normal_demand(50, 100.0, 80.0, 7).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 50);
        assert!(a.iter().all(|d| *d >= 0.0));
    }

    #[test]
    fn test_invalid_distribution() {
        assert!(matches!(
            generate_normal_demand(5, 100.0, -1.0, 1),
            Err(DdmrpError::InvalidDemandDistribution { .. })
        ));
    }

    #[test]
    fn test_step_and_constant() {
        assert_eq!(generate_step_demand(4, 4.0, 8.0, 2), vec![4.0, 4.0, 8.0, 8.0]);
        assert_eq!(generate_constant_demand(2, -3.0), vec![0.0, 0.0]);
    }
}
