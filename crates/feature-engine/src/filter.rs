//! Frame Filter

use crate::{CandidateRow, WindowFeatureRow};
use tracing::debug;

/// Keep only frames whose own position and every per-lag feature are
/// present. Incomplete windows at clip boundaries are dropped, not imputed;
/// a clip shorter than the full window simply contributes nothing.
pub fn retain_complete(candidates: Vec<CandidateRow>) -> Vec<WindowFeatureRow> {
    let total = candidates.len();
    let rows: Vec<WindowFeatureRow> = candidates
        .into_iter()
        .filter(|row| row.has_position && row.lags.iter().all(Option::is_some))
        .map(|row| WindowFeatureRow {
            frame_index: row.frame_index,
            lags: row.lags.into_iter().flatten().collect(),
            target: row.target,
        })
        .collect();
    debug!("retained {}/{} frames", rows.len(), total);
    rows
}
