//! Dataset Assembly and Split
//!
//! Walks the recorded-session directory layout, turns every clip into
//! windowed feature rows, and partitions the resulting table into train and
//! test subsets with a fixed seed.

mod assembler;
mod split;
mod table;

pub use assembler::{assemble_dataset, LABEL_FILE};
pub use split::{split_table, SplitConfig, SplitSets};
pub use table::FeatureTable;

use thiserror::Error;
use trace_data::TraceError;

/// Errors while assembling or splitting the dataset
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Directory under the dataset root could not be scanned
    #[error("failed to scan {path}: {source}")]
    Scan {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A clip's label file failed to read or validate
    #[error(transparent)]
    Trace(#[from] TraceError),

    /// The configured holdout share leaves nothing to train or test on
    #[error("test fraction must be in (0, 1), got {0}")]
    InvalidTestFraction(f64),
}
