//! Seeded Train/Test Split

use crate::{DatasetError, FeatureTable};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Split configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitConfig {
    /// Share of rows held out for testing
    pub test_fraction: f64,
    /// Shuffle seed; identical seeds reproduce the partition exactly
    pub seed: u64,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            test_fraction: 0.25,
            seed: 7,
        }
    }
}

/// Train and test subsets of the feature table
#[derive(Debug, Clone)]
pub struct SplitSets {
    pub x_train: Vec<Vec<f64>>,
    pub y_train: Vec<u8>,
    pub x_test: Vec<Vec<f64>>,
    pub y_test: Vec<u8>,
}

/// Partition the table by seeded shuffle. No stratification: the test
/// subset keeps whatever class mix the shuffle sampled, which is what
/// evaluation must see.
pub fn split_table(table: &FeatureTable, config: &SplitConfig) -> Result<SplitSets, DatasetError> {
    if !(config.test_fraction > 0.0 && config.test_fraction < 1.0) {
        return Err(DatasetError::InvalidTestFraction(config.test_fraction));
    }

    let n = table.len();
    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(config.seed);
    indices.shuffle(&mut rng);

    let n_test = (n as f64 * config.test_fraction).round() as usize;
    let (test_idx, train_idx) = indices.split_at(n_test);

    let gather = |idx: &[usize]| -> (Vec<Vec<f64>>, Vec<u8>) {
        idx.iter()
            .map(|&i| (table.rows()[i].clone(), table.targets()[i]))
            .unzip()
    };
    let (x_test, y_test) = gather(test_idx);
    let (x_train, y_train) = gather(train_idx);

    info!(
        "split: {} train rows, {} test rows (seed {})",
        x_train.len(),
        x_test.len(),
        config.seed
    );

    Ok(SplitSets {
        x_train,
        y_train,
        x_test,
        y_test,
    })
}
