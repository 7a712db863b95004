//! Gradient-Boosting Regressor with Grid Search

use crate::TrainError;
use gbdt::config::Config;
use gbdt::decision_tree::{Data, DataVec};
use gbdt::gradient_boost::GBDT;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// One hyper-parameter combination
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoostParams {
    /// Boosting iterations (tree count)
    pub iterations: usize,
    /// Shrinkage applied to each tree's contribution
    pub learning_rate: f32,
    /// Maximum tree depth
    pub depth: u32,
    /// Minimum samples per leaf; the complexity-control axis (the backing
    /// crate has no L2 leaf regularization)
    pub min_leaf_size: usize,
}

/// Candidate values per hyper-parameter axis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HyperGrid {
    pub iterations: Vec<usize>,
    pub learning_rates: Vec<f32>,
    pub depths: Vec<u32>,
    pub min_leaf_sizes: Vec<usize>,
}

impl Default for HyperGrid {
    fn default() -> Self {
        Self {
            iterations: vec![100, 200, 500],
            learning_rates: vec![0.03, 0.1],
            depths: vec![2, 4, 6, 8],
            min_leaf_sizes: vec![1, 10, 50],
        }
    }
}

/// Grid search configuration. Candidates are scored by RMSE on a seeded
/// holdout split of the balanced train set; the winner is refit on all of
/// it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridSearchConfig {
    pub grid: HyperGrid,
    /// Share of the train set held out for candidate scoring
    pub holdout_fraction: f64,
    /// Seed for the holdout shuffle
    pub seed: u64,
}

impl Default for GridSearchConfig {
    fn default() -> Self {
        Self {
            grid: HyperGrid::default(),
            holdout_fraction: 0.2,
            seed: 17,
        }
    }
}

/// A fitted bounce-score regressor
pub struct BounceRegressor {
    model: GBDT,
    params: BoostParams,
    feature_size: usize,
}

impl std::fmt::Debug for BounceRegressor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BounceRegressor")
            .field("params", &self.params)
            .field("feature_size", &self.feature_size)
            .finish_non_exhaustive()
    }
}

impl BounceRegressor {
    /// Continuous bounce scores for the given rows. The caller thresholds
    /// these to obtain binary predictions.
    pub fn predict(&self, features: &[Vec<f64>]) -> Vec<f64> {
        if features.is_empty() {
            return Vec::new();
        }
        let data: DataVec = features
            .iter()
            .map(|row| Data::new_test_data(to_f32(row), None))
            .collect();
        self.model.predict(&data).into_iter().map(f64::from).collect()
    }

    /// Persist the model artifact. The on-disk format is owned by the
    /// backing crate and opaque to the pipeline.
    pub fn save(&self, path: &Path) -> Result<(), TrainError> {
        self.model
            .save_model(&path.to_string_lossy())
            .map_err(|e| TrainError::SaveFailed {
                path: path.display().to_string(),
                detail: e.to_string(),
            })
    }

    /// The winning hyper-parameters
    pub fn params(&self) -> &BoostParams {
        &self.params
    }

    /// Width of the feature rows the model was fitted on
    pub fn feature_size(&self) -> usize {
        self.feature_size
    }
}

/// Fit a regressor on the balanced train set, selecting hyper-parameters
/// by exhaustive grid search.
pub fn fit_with_grid_search(
    features: &[Vec<f64>],
    targets: &[u8],
    config: &GridSearchConfig,
) -> Result<BounceRegressor, TrainError> {
    assert_eq!(
        features.len(),
        targets.len(),
        "features and targets must be parallel"
    );
    let feature_size = validate_shape(features)?;
    if features.len() < 2 {
        return Err(TrainError::TooFewTrainingRows(features.len()));
    }
    validate_grid(&config.grid)?;
    if !(config.holdout_fraction > 0.0 && config.holdout_fraction < 1.0) {
        return Err(TrainError::InvalidHoldoutFraction(config.holdout_fraction));
    }

    // Seeded holdout split for candidate scoring.
    let mut indices: Vec<usize> = (0..features.len()).collect();
    let mut rng = StdRng::seed_from_u64(config.seed);
    indices.shuffle(&mut rng);
    let n_holdout = ((features.len() as f64 * config.holdout_fraction).round() as usize)
        .clamp(1, features.len() - 1);
    let (holdout_idx, fit_idx) = indices.split_at(n_holdout);

    let gather = |idx: &[usize]| -> (Vec<&Vec<f64>>, Vec<u8>) {
        idx.iter().map(|&i| (&features[i], targets[i])).unzip()
    };
    let (fit_x, fit_y) = gather(fit_idx);
    let (holdout_x, holdout_y) = gather(holdout_idx);

    let mut best: Option<(f64, BoostParams)> = None;
    for &iterations in &config.grid.iterations {
        for &learning_rate in &config.grid.learning_rates {
            for &depth in &config.grid.depths {
                for &min_leaf_size in &config.grid.min_leaf_sizes {
                    let params = BoostParams {
                        iterations,
                        learning_rate,
                        depth,
                        min_leaf_size,
                    };
                    let model = fit_model(&fit_x, &fit_y, params, feature_size);
                    let rmse = holdout_rmse(&model, &holdout_x, &holdout_y);
                    debug!("candidate {:?}: holdout rmse {:.6}", params, rmse);
                    if best.as_ref().map_or(true, |(b, _)| rmse < *b) {
                        best = Some((rmse, params));
                    }
                }
            }
        }
    }
    let (best_rmse, best_params) =
        best.ok_or(TrainError::EmptyGrid("hyper-parameter grid"))?;
    info!(
        "grid search winner {:?} (holdout rmse {:.6}); refitting on full train set",
        best_params, best_rmse
    );

    let all: Vec<&Vec<f64>> = features.iter().collect();
    let model = fit_model(&all, targets, best_params, feature_size);
    Ok(BounceRegressor {
        model,
        params: best_params,
        feature_size,
    })
}

fn fit_model(features: &[&Vec<f64>], targets: &[u8], params: BoostParams, width: usize) -> GBDT {
    let mut cfg = Config::new();
    cfg.set_feature_size(width);
    cfg.set_iterations(params.iterations);
    cfg.set_shrinkage(params.learning_rate);
    cfg.set_max_depth(params.depth);
    cfg.set_min_leaf_size(params.min_leaf_size);
    cfg.set_loss("SquaredError");
    // Full sampling keeps training deterministic.
    cfg.set_data_sample_ratio(1.0);
    cfg.set_feature_sample_ratio(1.0);
    cfg.set_debug(false);

    let mut data: DataVec = features
        .iter()
        .zip(targets)
        .map(|(row, &label)| Data::new_training_data(to_f32(row), 1.0, f32::from(label), None))
        .collect();

    let mut model = GBDT::new(&cfg);
    model.fit(&mut data);
    model
}

fn holdout_rmse(model: &GBDT, features: &[&Vec<f64>], targets: &[u8]) -> f64 {
    let data: DataVec = features
        .iter()
        .map(|row| Data::new_test_data(to_f32(row), None))
        .collect();
    let predictions = model.predict(&data);
    let mse = predictions
        .iter()
        .zip(targets)
        .map(|(&p, &t)| {
            let err = f64::from(p) - f64::from(t);
            err * err
        })
        .sum::<f64>()
        / targets.len() as f64;
    mse.sqrt()
}

fn to_f32(row: &[f64]) -> Vec<f32> {
    row.iter().map(|&v| v as f32).collect()
}

fn validate_shape(features: &[Vec<f64>]) -> Result<usize, TrainError> {
    let first = features.first().ok_or(TrainError::EmptyTrainingSet)?;
    let expected = first.len();
    for (row, values) in features.iter().enumerate() {
        if values.len() != expected {
            return Err(TrainError::ShapeMismatch {
                row,
                expected,
                actual: values.len(),
            });
        }
    }
    Ok(expected)
}

fn validate_grid(grid: &HyperGrid) -> Result<(), TrainError> {
    if grid.iterations.is_empty() {
        return Err(TrainError::EmptyGrid("iterations axis"));
    }
    if grid.learning_rates.is_empty() {
        return Err(TrainError::EmptyGrid("learning-rate axis"));
    }
    if grid.depths.is_empty() {
        return Err(TrainError::EmptyGrid("depth axis"));
    }
    if grid.min_leaf_sizes.is_empty() {
        return Err(TrainError::EmptyGrid("min-leaf-size axis"));
    }
    Ok(())
}
