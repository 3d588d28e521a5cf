//! Frame source boundary.
//!
//! The camera (or any replacement) lives behind [`FrameSource`]. The
//! core never decodes frame contents; the bytes only flow through to
//! the presentation sink.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("frame source unavailable: {0}")]
    Open(String),
    #[error("frame read failed: {0}")]
    Read(String),
}

/// One frame as delivered by the source. `data` is an encoded image
/// (JPEG by convention) and may be empty for sources that carry
/// detections only.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub sequence: u32,
}

/// Sequential frame supplier.
///
/// `Ok(None)` means the stream ended; an error is terminal for the
/// processing loop but not for the process.
pub trait FrameSource {
    fn next_frame(&mut self) -> Result<Option<Frame>, SourceError>;
}
