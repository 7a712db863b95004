//! Window Feature Extractor

use crate::{FeatureError, LagFeatures};
use serde::{Deserialize, Serialize};
use trace_data::{ClipTrace, FrameRecord};

/// Extraction configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Window radius; features are derived for every lag in 1..radius
    pub radius: usize,
    /// Stabilizer added to every denominator. Keeps zero time deltas and
    /// zero forward differences finite at the cost of a bounded bias in the
    /// outputs.
    pub epsilon: f64,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            radius: 3,
            epsilon: 1e-8,
        }
    }
}

/// Per-frame extraction result before filtering. Lags near clip boundaries
/// or over missing positions are `None`; the frame filter drops any row
/// that is not fully populated.
#[derive(Debug, Clone)]
pub struct CandidateRow {
    /// Frame index within the clip
    pub frame_index: usize,
    /// Whether the frame's own position is present
    pub has_position: bool,
    /// Candidate features per lag (index i holds lag i + 1)
    pub lags: Vec<Option<LagFeatures>>,
    /// 1 iff the frame is labeled as a bounce
    pub target: u8,
}

/// Derives per-lag window features over a clip trace.
///
/// Purely functional: the input trace is never modified and extraction has
/// no failure modes beyond the radius configuration check at construction.
#[derive(Debug)]
pub struct WindowExtractor {
    config: ExtractorConfig,
}

impl WindowExtractor {
    /// Create an extractor, rejecting radii that leave no lags to derive
    pub fn new(config: ExtractorConfig) -> Result<Self, FeatureError> {
        if config.radius < 2 {
            return Err(FeatureError::RadiusTooSmall(config.radius));
        }
        Ok(Self { config })
    }

    /// The configured window radius
    pub fn radius(&self) -> usize {
        self.config.radius
    }

    /// Compute candidate rows for every frame of the clip
    pub fn extract(&self, trace: &ClipTrace) -> Vec<CandidateRow> {
        trace
            .frames
            .iter()
            .enumerate()
            .map(|(pos, frame)| CandidateRow {
                frame_index: frame.frame_index,
                has_position: frame.pos.is_some(),
                lags: (1..self.config.radius)
                    .map(|lag| self.lag_features(&trace.frames, pos, lag))
                    .collect(),
                target: u8::from(frame.is_bounce()),
            })
            .collect()
    }

    /// Features for one lag of the frame at `pos`, or `None` when either
    /// neighbor falls outside the clip or any involved position is missing.
    fn lag_features(&self, frames: &[FrameRecord], pos: usize, lag: usize) -> Option<LagFeatures> {
        let eps = self.config.epsilon;
        let current = &frames[pos];
        let cur = current.pos?;
        let back = &frames[pos.checked_sub(lag)?];
        let fwd = frames.get(pos + lag)?;
        let back_pos = back.pos?;
        let fwd_pos = fwd.pos?;

        // x differences are absolute, y differences keep their sign.
        let x_diff_back = (back_pos.x - cur.x).abs();
        let y_diff_back = back_pos.y - cur.y;
        let x_diff_fwd = (fwd_pos.x - cur.x).abs();
        let y_diff_fwd = fwd_pos.y - cur.y;

        let x_ratio = (x_diff_back / (x_diff_fwd + eps)).abs();
        let y_ratio = y_diff_back / (y_diff_fwd + eps);

        let dt_back = current.timestamp - back.timestamp;
        let dt_fwd = fwd.timestamp - current.timestamp;

        let vx_back = x_diff_back / (dt_back + eps);
        let vy_back = y_diff_back / (dt_back + eps);
        let vx_fwd = x_diff_fwd / (dt_fwd + eps);
        let vy_fwd = y_diff_fwd / (dt_fwd + eps);

        let ax = (vx_back - vx_fwd) / (dt_back + eps);
        let ay = (vy_back - vy_fwd) / (dt_back + eps);

        Some(LagFeatures {
            lag,
            x_back: back_pos.x,
            y_back: back_pos.y,
            x_fwd: fwd_pos.x,
            y_fwd: fwd_pos.y,
            x_diff_back,
            y_diff_back,
            x_diff_fwd,
            y_diff_fwd,
            x_ratio,
            y_ratio,
            dt_back,
            dt_fwd,
            vx_back,
            vy_back,
            vx_fwd,
            vy_fwd,
            ax,
            ay,
        })
    }
}
