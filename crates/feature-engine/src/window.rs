//! Windowed Feature Rows

use crate::schema;
use serde::{Deserialize, Serialize};

/// Features derived for one lag offset of one frame.
///
/// X-axis differences and the x ratio are absolute while the y-axis keeps its
/// sign: a bounce is a vertical-direction reversal, so the vertical sign
/// carries the signal. The asymmetry is intentional; confirm with a domain
/// expert before changing it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LagFeatures {
    /// Lag offset in frames
    pub lag: usize,
    /// x-coordinate at frame_index - lag
    pub x_back: f64,
    /// y-coordinate at frame_index - lag
    pub y_back: f64,
    /// x-coordinate at frame_index + lag
    pub x_fwd: f64,
    /// y-coordinate at frame_index + lag
    pub y_fwd: f64,
    /// |x(-lag) - x|
    pub x_diff_back: f64,
    /// y(-lag) - y, signed
    pub y_diff_back: f64,
    /// |x(+lag) - x|
    pub x_diff_fwd: f64,
    /// y(+lag) - y, signed
    pub y_diff_fwd: f64,
    /// |x_diff_back| / (|x_diff_fwd| + eps); spikes when the trajectory
    /// reverses horizontal direction, stays near 1 in steady motion
    pub x_ratio: f64,
    /// y_diff_back / (y_diff_fwd + eps), signed analogue
    pub y_ratio: f64,
    /// t - t(-lag)
    pub dt_back: f64,
    /// t(+lag) - t
    pub dt_fwd: f64,
    /// Backward x velocity: x_diff_back / (dt_back + eps)
    pub vx_back: f64,
    /// Backward y velocity
    pub vy_back: f64,
    /// Forward x velocity: x_diff_fwd / (dt_fwd + eps)
    pub vx_fwd: f64,
    /// Forward y velocity
    pub vy_fwd: f64,
    /// x acceleration: (vx_back - vx_fwd) / (dt_back + eps); the backward
    /// time delta is the common denominator
    pub ax: f64,
    /// y acceleration
    pub ay: f64,
}

/// One retained frame's windowed features plus its binary target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowFeatureRow {
    /// Frame index within the owning clip
    pub frame_index: usize,
    /// Per-lag features, ordered by lag (index i holds lag i + 1)
    pub lags: Vec<LagFeatures>,
    /// 1 iff the frame is labeled as a bounce
    pub target: u8,
}

impl WindowFeatureRow {
    /// Flatten into the model feature vector.
    ///
    /// Column order matches [`schema::column_names`]: each feature kind is a
    /// contiguous block over ascending lags. Neighbor coordinates and time
    /// deltas are carried on the row but are not model columns.
    pub fn feature_vector(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(schema::FEATURES_PER_LAG * self.lags.len());
        out.extend(self.lags.iter().map(|l| l.x_diff_back));
        out.extend(self.lags.iter().map(|l| l.x_diff_fwd));
        out.extend(self.lags.iter().map(|l| l.x_ratio));
        out.extend(self.lags.iter().map(|l| l.y_diff_back));
        out.extend(self.lags.iter().map(|l| l.y_diff_fwd));
        out.extend(self.lags.iter().map(|l| l.y_ratio));
        out.extend(self.lags.iter().map(|l| l.vx_back));
        out.extend(self.lags.iter().map(|l| l.vy_back));
        out.extend(self.lags.iter().map(|l| l.vx_fwd));
        out.extend(self.lags.iter().map(|l| l.vy_fwd));
        out.extend(self.lags.iter().map(|l| l.ax));
        out.extend(self.lags.iter().map(|l| l.ay));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lag(i: usize, base: f64) -> LagFeatures {
        LagFeatures {
            lag: i,
            x_back: base,
            y_back: base + 1.0,
            x_fwd: base + 2.0,
            y_fwd: base + 3.0,
            x_diff_back: base + 4.0,
            y_diff_back: base + 5.0,
            x_diff_fwd: base + 6.0,
            y_diff_fwd: base + 7.0,
            x_ratio: base + 8.0,
            y_ratio: base + 9.0,
            dt_back: base + 10.0,
            dt_fwd: base + 11.0,
            vx_back: base + 12.0,
            vy_back: base + 13.0,
            vx_fwd: base + 14.0,
            vy_fwd: base + 15.0,
            ax: base + 16.0,
            ay: base + 17.0,
        }
    }

    #[test]
    fn test_feature_vector_length() {
        let row = WindowFeatureRow {
            frame_index: 4,
            lags: vec![lag(1, 0.0), lag(2, 100.0)],
            target: 0,
        };
        // radius 3 -> 2 lags -> 12 features per lag
        assert_eq!(row.feature_vector().len(), 24);
    }

    #[test]
    fn test_feature_vector_block_order() {
        let row = WindowFeatureRow {
            frame_index: 0,
            lags: vec![lag(1, 0.0), lag(2, 100.0)],
            target: 1,
        };
        let v = row.feature_vector();
        // First block: x_diff_back for lags 1, 2
        assert!((v[0] - 4.0).abs() < f64::EPSILON);
        assert!((v[1] - 104.0).abs() < f64::EPSILON);
        // Second block: x_diff_fwd
        assert!((v[2] - 6.0).abs() < f64::EPSILON);
        assert!((v[3] - 106.0).abs() < f64::EPSILON);
        // Last block: ay
        assert!((v[22] - 17.0).abs() < f64::EPSILON);
        assert!((v[23] - 117.0).abs() < f64::EPSILON);
    }
}
