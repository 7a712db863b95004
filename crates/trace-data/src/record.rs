//! Frame-Level Trace Records

use serde::{Deserialize, Serialize};

/// Status code marking a bounce frame in the label data
pub const BOUNCE_STATUS: i64 = 2;

/// Ball position in pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal pixel coordinate
    pub x: f64,
    /// Vertical pixel coordinate
    pub y: f64,
}

/// One frame of a clip's trace
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameRecord {
    /// Frame index within the clip (strictly increasing)
    pub frame_index: usize,
    /// Ball position, absent when the ball is not visible
    pub pos: Option<Position>,
    /// Capture timestamp in seconds (non-decreasing)
    pub timestamp: f64,
    /// Event status code (2 = bounce)
    pub status: i64,
}

impl FrameRecord {
    /// Whether this frame is labeled as a bounce
    pub fn is_bounce(&self) -> bool {
        self.status == BOUNCE_STATUS
    }
}

/// Ordered frames of one recorded clip
#[derive(Debug, Clone)]
pub struct ClipTrace {
    /// Session (game) directory name
    pub session: String,
    /// Clip directory name
    pub clip: String,
    /// Frames in increasing frame order
    pub frames: Vec<FrameRecord>,
}

impl ClipTrace {
    /// Create a trace from already-ordered frames
    pub fn new(session: impl Into<String>, clip: impl Into<String>, frames: Vec<FrameRecord>) -> Self {
        Self {
            session: session.into(),
            clip: clip.into(),
            frames,
        }
    }

    /// Number of frames in the clip
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether the clip has no frames
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Number of frames labeled as bounces
    pub fn bounce_count(&self) -> usize {
        self.frames.iter().filter(|f| f.is_bounce()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounce_status() {
        let frame = FrameRecord {
            frame_index: 0,
            pos: Some(Position { x: 10.0, y: 20.0 }),
            timestamp: 0.0,
            status: 2,
        };
        assert!(frame.is_bounce());

        let frame = FrameRecord { status: 0, ..frame };
        assert!(!frame.is_bounce());
    }

    #[test]
    fn test_bounce_count() {
        let frames = (0..5)
            .map(|i| FrameRecord {
                frame_index: i,
                pos: None,
                timestamp: i as f64,
                status: if i == 3 { 2 } else { 0 },
            })
            .collect();
        let trace = ClipTrace::new("game1", "clip1", frames);
        assert_eq!(trace.len(), 5);
        assert_eq!(trace.bounce_count(), 1);
    }
}
