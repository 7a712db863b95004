//! Windowed Feature Extraction
//!
//! Derives per-lag positional, ratio, and kinematic features from clip
//! traces, and filters out frames whose symmetric window is incomplete.

mod extractor;
mod filter;
mod schema;
mod window;

pub use extractor::{CandidateRow, ExtractorConfig, WindowExtractor};
pub use filter::retain_complete;
pub use schema::{column_names, feature_count, FEATURES_PER_LAG};
pub use window::{LagFeatures, WindowFeatureRow};

use thiserror::Error;

/// Errors from feature extraction configuration
#[derive(Debug, Error)]
pub enum FeatureError {
    /// The symmetric window needs at least one lag on each side
    #[error("window radius must be at least 2, got {0}")]
    RadiusTooSmall(usize),
}
