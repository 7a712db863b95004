//! Training Adapter and Evaluation
//!
//! Wraps the gradient-boosting implementation behind a fit/predict/save
//! seam, selects hyper-parameters by grid search, and computes the
//! confusion-matrix metrics reported after evaluation.

mod booster;
mod metrics;

pub use booster::{fit_with_grid_search, BoostParams, BounceRegressor, GridSearchConfig, HyperGrid};
pub use metrics::ConfusionMatrix;

use thiserror::Error;

/// Errors during training or model persistence
#[derive(Debug, Error)]
pub enum TrainError {
    /// Nothing to fit on
    #[error("training set is empty")]
    EmptyTrainingSet,

    /// The holdout split needs at least one row on each side
    #[error("need at least two training rows for a holdout, got {0}")]
    TooFewTrainingRows(usize),

    /// A feature row disagrees with the first row's width
    #[error("feature row {row} has width {actual}, expected {expected}")]
    ShapeMismatch {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// A grid axis has no candidate values
    #[error("{0} must not be empty")]
    EmptyGrid(&'static str),

    /// The holdout share leaves nothing to fit or score on
    #[error("holdout fraction must be in (0, 1), got {0}")]
    InvalidHoldoutFraction(f64),

    /// The model artifact could not be written
    #[error("failed to save model to {path}: {detail}")]
    SaveFailed { path: String, detail: String },
}
