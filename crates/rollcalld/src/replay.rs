//! Replay source — recorded detections from a JSONL file.
//!
//! Each line describes one frame: optional dimensions plus the
//! detector's face list (bounding box, embedding, optional track id).
//! Lets the pipeline run end to end without the external model or a
//! camera; the detector half answers by frame sequence number.

use rollcall_core::detector::{DetectError, FaceDetector};
use rollcall_core::source::{Frame, FrameSource, SourceError};
use rollcall_core::types::Face;
use serde::Deserialize;
use std::collections::{HashMap, VecDeque};
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReplayError {
    #[error("failed to read replay file: {0}")]
    Io(#[from] std::io::Error),
    #[error("replay line {line}: {source}")]
    Parse {
        line: usize,
        source: serde_json::Error,
    },
}

#[derive(Deserialize)]
struct FrameRecord {
    #[serde(default)]
    width: u32,
    #[serde(default)]
    height: u32,
    #[serde(default)]
    faces: Vec<Face>,
}

/// Frame half of a loaded replay.
#[derive(Debug)]
pub struct ReplaySource {
    frames: VecDeque<Frame>,
}

/// Detector half of a loaded replay, keyed by frame sequence.
#[derive(Debug)]
pub struct ReplayDetector {
    faces: HashMap<u32, Vec<Face>>,
}

/// Load a JSONL replay into its source/detector pair. Blank lines are
/// skipped; sequence numbers start at 1.
pub fn load(path: &Path) -> Result<(ReplaySource, ReplayDetector), ReplayError> {
    let file = std::fs::File::open(path)?;
    let reader = BufReader::new(file);

    let mut frames = VecDeque::new();
    let mut faces = HashMap::new();
    let mut sequence = 0u32;

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record: FrameRecord =
            serde_json::from_str(&line).map_err(|source| ReplayError::Parse {
                line: line_no + 1,
                source,
            })?;

        sequence += 1;
        frames.push_back(Frame {
            data: Vec::new(),
            width: record.width,
            height: record.height,
            sequence,
        });
        faces.insert(sequence, record.faces);
    }

    tracing::info!(path = %path.display(), frames = frames.len(), "replay loaded");
    Ok((ReplaySource { frames }, ReplayDetector { faces }))
}

impl FrameSource for ReplaySource {
    fn next_frame(&mut self) -> Result<Option<Frame>, SourceError> {
        Ok(self.frames.pop_front())
    }
}

impl FaceDetector for ReplayDetector {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<Face>, DetectError> {
        Ok(self.faces.remove(&frame.sequence).unwrap_or_default())
    }
}
