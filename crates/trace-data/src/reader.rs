//! Label.csv Reader

use crate::{ClipTrace, FrameRecord, Position, TraceError};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Raw row shape of a Label.csv file. Extra columns (file name, visibility)
/// are ignored; empty coordinate cells deserialize to `None`.
#[derive(Debug, Deserialize)]
struct LabelRow {
    #[serde(rename = "x-coordinate")]
    x: Option<f64>,
    #[serde(rename = "y-coordinate")]
    y: Option<f64>,
    #[serde(rename = "time stamp")]
    timestamp: f64,
    status: Option<i64>,
}

/// Read one clip's Label.csv into an ordered trace.
///
/// Frame indices are assigned from row ordinals; the label format carries no
/// index column. Timestamps must be non-decreasing across rows.
pub fn read_label_file(path: &Path, session: &str, clip: &str) -> Result<ClipTrace, TraceError> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| csv_error(path, e))?;

    let mut frames = Vec::new();
    for (row, result) in reader.deserialize::<LabelRow>().enumerate() {
        let raw = result.map_err(|e| csv_error(path, e))?;

        // A position exists only when both coordinates parsed.
        let pos = match (raw.x, raw.y) {
            (Some(x), Some(y)) => Some(Position { x, y }),
            _ => None,
        };

        if let Some(prev) = frames.last().map(|f: &FrameRecord| f.timestamp) {
            if raw.timestamp < prev {
                return Err(TraceError::NonMonotonicTimestamp {
                    path: path.display().to_string(),
                    row,
                    prev,
                    curr: raw.timestamp,
                });
            }
        }

        frames.push(FrameRecord {
            frame_index: row,
            pos,
            timestamp: raw.timestamp,
            status: raw.status.unwrap_or(0),
        });
    }

    debug!(
        "read {}/{}: {} frames, {} bounces",
        session,
        clip,
        frames.len(),
        frames.iter().filter(|f| f.is_bounce()).count()
    );

    Ok(ClipTrace::new(session, clip, frames))
}

fn csv_error(path: &Path, err: csv::Error) -> TraceError {
    let path = path.display().to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(source) => TraceError::Io { path, source },
        csv::ErrorKind::Deserialize { err, .. } => TraceError::Malformed {
            path,
            detail: err.to_string(),
        },
        other => TraceError::Malformed {
            path,
            detail: format!("{other:?}"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_label(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_read_basic_clip() {
        let file = write_label(
            "file name,visibility,x-coordinate,y-coordinate,status,time stamp\n\
             0000.jpg,1,640.0,360.5,0,0.0\n\
             0001.jpg,1,642.0,355.0,2,0.033\n",
        );
        let trace = read_label_file(file.path(), "game1", "clip1").unwrap();
        assert_eq!(trace.len(), 2);
        assert_eq!(trace.frames[0].frame_index, 0);
        assert_eq!(trace.frames[1].frame_index, 1);
        assert!(trace.frames[1].is_bounce());
        let pos = trace.frames[0].pos.unwrap();
        assert!((pos.x - 640.0).abs() < f64::EPSILON);
        assert!((pos.y - 360.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_position_cells() {
        let file = write_label(
            "x-coordinate,y-coordinate,status,time stamp\n\
             ,,0,0.0\n\
             100.0,,0,0.033\n\
             100.0,200.0,0,0.066\n",
        );
        let trace = read_label_file(file.path(), "g", "c").unwrap();
        assert!(trace.frames[0].pos.is_none());
        assert!(trace.frames[1].pos.is_none(), "half-present position must not count");
        assert!(trace.frames[2].pos.is_some());
    }

    #[test]
    fn test_missing_required_column() {
        let file = write_label(
            "x-coordinate,y-coordinate,status\n\
             1.0,2.0,0\n",
        );
        let err = read_label_file(file.path(), "g", "c").unwrap_err();
        assert!(matches!(err, TraceError::Malformed { .. }), "got {err:?}");
    }

    #[test]
    fn test_non_monotonic_timestamp() {
        let file = write_label(
            "x-coordinate,y-coordinate,status,time stamp\n\
             1.0,2.0,0,1.0\n\
             1.0,2.0,0,0.5\n",
        );
        let err = read_label_file(file.path(), "g", "c").unwrap_err();
        assert!(matches!(err, TraceError::NonMonotonicTimestamp { row: 1, .. }), "got {err:?}");
    }

    #[test]
    fn test_missing_file() {
        let err = read_label_file(Path::new("/nonexistent/Label.csv"), "g", "c").unwrap_err();
        assert!(matches!(err, TraceError::Io { .. }));
    }

    #[test]
    fn test_unparseable_cell_is_malformed() {
        let file = write_label(
            "x-coordinate,y-coordinate,status,time stamp\n\
             abc,2.0,0,0.0\n",
        );
        let err = read_label_file(file.path(), "g", "c").unwrap_err();
        assert!(matches!(err, TraceError::Malformed { .. }), "got {err:?}");
    }
}
