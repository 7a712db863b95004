//! SMOTE Oversampler

use crate::BalanceError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::{info, warn};

/// Oversampling configuration. Both knobs are explicit so the balancing
/// step is reproducible in isolation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmoteConfig {
    /// Neighbors considered per minority sample (clamped to what exists)
    pub k_neighbors: usize,
    /// Seed for sample, neighbor, and interpolation draws
    pub seed: u64,
}

impl Default for SmoteConfig {
    fn default() -> Self {
        Self {
            k_neighbors: 5,
            seed: 42,
        }
    }
}

/// Oversample the minority class up to exact parity with the majority.
///
/// Each synthetic sample interpolates between a randomly chosen minority
/// sample and one of its k-nearest minority neighbors (Euclidean distance
/// in feature space). Original rows are returned unchanged, in their input
/// order, with the synthetic rows appended.
pub fn oversample(
    features: &[Vec<f64>],
    targets: &[u8],
    config: &SmoteConfig,
) -> Result<(Vec<Vec<f64>>, Vec<u8>), BalanceError> {
    assert_eq!(
        features.len(),
        targets.len(),
        "features and targets must be parallel"
    );
    if let Some(&bad) = targets.iter().find(|&&t| t > 1) {
        return Err(BalanceError::NonBinaryTarget(bad));
    }

    let positives = targets.iter().filter(|&&t| t == 1).count();
    let negatives = targets.len() - positives;
    if positives == negatives {
        return Ok((features.to_vec(), targets.to_vec()));
    }

    let minority_label: u8 = u8::from(positives < negatives);
    let need = positives.abs_diff(negatives);
    let minority: Vec<&Vec<f64>> = features
        .iter()
        .zip(targets)
        .filter(|(_, &t)| t == minority_label)
        .map(|(row, _)| row)
        .collect();

    if minority.len() < 2 {
        return Err(BalanceError::TooFewMinoritySamples(minority.len()));
    }

    let k = config.k_neighbors.min(minority.len() - 1);
    if k < config.k_neighbors {
        warn!(
            "clamping k_neighbors from {} to {} ({} minority samples)",
            config.k_neighbors,
            k,
            minority.len()
        );
    }

    let neighbors = nearest_neighbors(&minority, k);
    let mut rng = StdRng::seed_from_u64(config.seed);

    let mut out_features = features.to_vec();
    let mut out_targets = targets.to_vec();
    for _ in 0..need {
        let base_idx = rng.gen_range(0..minority.len());
        let neighbor_idx = neighbors[base_idx][rng.gen_range(0..k)];
        let gap: f64 = rng.gen();

        let base = minority[base_idx];
        let neighbor = minority[neighbor_idx];
        let synthetic = base
            .iter()
            .zip(neighbor)
            .map(|(b, n)| b + gap * (n - b))
            .collect();
        out_features.push(synthetic);
        out_targets.push(minority_label);
    }

    info!(
        "oversampled class {}: {} -> {} rows ({} synthetic)",
        minority_label,
        minority.len(),
        minority.len() + need,
        need
    );
    Ok((out_features, out_targets))
}

/// For each minority sample, the indices of its k nearest minority
/// neighbors (itself excluded). Distance ties break on index so the result
/// is stable.
fn nearest_neighbors(minority: &[&Vec<f64>], k: usize) -> Vec<Vec<usize>> {
    minority
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let mut dists: Vec<(f64, usize)> = minority
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .map(|(j, other)| (squared_distance(row, other), j))
                .collect();
            dists.sort_by(|a, b| {
                a.0.partial_cmp(&b.0)
                    .unwrap_or(Ordering::Equal)
                    .then(a.1.cmp(&b.1))
            });
            dists.into_iter().take(k).map(|(_, j)| j).collect()
        })
        .collect()
}

fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}
