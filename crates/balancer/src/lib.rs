//! Class Balancing
//!
//! Oversamples the minority class of a train set to exact parity with the
//! majority by synthesizing interpolated samples (SMOTE). Test data must
//! never pass through here: evaluation needs the true class distribution.

mod smote;

pub use smote::{oversample, SmoteConfig};

use thiserror::Error;

/// Errors during class balancing
#[derive(Debug, Error)]
pub enum BalanceError {
    /// Synthesis interpolates between minority samples, so it needs at
    /// least two of them
    #[error("cannot oversample: only {0} minority sample(s) in the train set")]
    TooFewMinoritySamples(usize),

    /// Targets must be a binary 0/1 column
    #[error("non-binary target value {0}")]
    NonBinaryTarget(u8),
}
