//! Dataset Assembler

use crate::{DatasetError, FeatureTable};
use feature_engine::{column_names, retain_complete, WindowExtractor};
use std::fs;
use std::path::{Path, PathBuf};
use trace_data::read_label_file;
use tracing::{debug, info};

/// Label file expected inside every clip directory
pub const LABEL_FILE: &str = "Label.csv";

/// Walk every session directory under the dataset root, every clip
/// directory under each session, and concatenate the retained feature rows
/// of all clips into one table.
///
/// Traversal is sorted by name so repeated runs assemble identical tables.
/// A missing or malformed label file aborts the whole run; a clip too short
/// for the window merely contributes zero rows.
pub fn assemble_dataset(
    root: &Path,
    extractor: &WindowExtractor,
) -> Result<FeatureTable, DatasetError> {
    let mut table = FeatureTable::new(column_names(extractor.radius()));

    let sessions = sorted_dirs(root)?;
    info!(
        "assembling dataset from {} sessions under {}",
        sessions.len(),
        root.display()
    );

    for (session_name, session_path) in sessions {
        let clips = sorted_dirs(&session_path)?;
        info!("session {}: {} clips", session_name, clips.len());

        for (clip_name, clip_path) in clips {
            let label_path = clip_path.join(LABEL_FILE);
            let trace = read_label_file(&label_path, &session_name, &clip_name)?;
            let rows = retain_complete(extractor.extract(&trace));
            debug!(
                "clip {}/{}: {} frames -> {} rows",
                session_name,
                clip_name,
                trace.len(),
                rows.len()
            );
            for row in rows {
                table.push_row(row.feature_vector(), row.target);
            }
        }
    }

    info!(
        "feature table assembled: {} rows, {} positive",
        table.len(),
        table.positive_count()
    );
    Ok(table)
}

/// Subdirectories of `path` as (name, path), sorted by name. Plain files
/// (stray readmes and the like) are skipped.
fn sorted_dirs(path: &Path) -> Result<Vec<(String, PathBuf)>, DatasetError> {
    let scan = |source| DatasetError::Scan {
        path: path.display().to_string(),
        source,
    };

    let mut dirs = Vec::new();
    for entry in fs::read_dir(path).map_err(scan)? {
        let entry = entry.map_err(scan)?;
        let entry_path = entry.path();
        if entry_path.is_dir() {
            let name = entry.file_name().to_string_lossy().into_owned();
            dirs.push((name, entry_path));
        } else {
            debug!("skipping non-directory entry {}", entry_path.display());
        }
    }
    dirs.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(dirs)
}
