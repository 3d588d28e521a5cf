//! Face detector boundary.
//!
//! The detection/embedding model is an external collaborator; the
//! pipeline only depends on this trait. The returned order is the
//! detector's own, and the pipeline's single-face policy takes the
//! first entry of it.

use crate::source::Frame;
use crate::types::Face;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DetectError {
    #[error("inference failed: {0}")]
    Inference(String),
}

/// Per-frame face detection with embeddings and optional track ids.
pub trait FaceDetector {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<Face>, DetectError>;
}
