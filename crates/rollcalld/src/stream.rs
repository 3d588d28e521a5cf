//! Display stream — boundary-delimited frame parts for a viewer.
//!
//! Purely presentational; the pipeline publishes a snapshot per
//! processed frame and never depends on the sink for correctness.

use rollcall_core::ledger::CurrentStatus;
use rollcall_core::source::Frame;
use std::io::{self, Write};

/// Receives one snapshot per processed frame.
pub trait DisplaySink {
    fn publish(&mut self, frame: &Frame, status: &CurrentStatus) -> io::Result<()>;
}

/// Sink for headless deployments.
pub struct NullDisplay;

impl DisplaySink for NullDisplay {
    fn publish(&mut self, _frame: &Frame, _status: &CurrentStatus) -> io::Result<()> {
        Ok(())
    }
}

/// Writes `multipart/x-mixed-replace`-style parts to any writer
/// (file, pipe, socket). The current classification rides along as a
/// part header so the viewer can annotate without decoding the image.
pub struct MultipartStream<W: Write> {
    writer: W,
}

impl<W: Write> MultipartStream<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> DisplaySink for MultipartStream<W> {
    fn publish(&mut self, frame: &Frame, status: &CurrentStatus) -> io::Result<()> {
        // Detection-only sources carry no image bytes; nothing to show.
        if frame.data.is_empty() {
            return Ok(());
        }

        let status_json = serde_json::to_string(status).unwrap_or_default();
        write!(
            self.writer,
            "--frame\r\nContent-Type: image/jpeg\r\nX-Rollcall-Status: {status_json}\r\n\r\n"
        )?;
        self.writer.write_all(&frame.data)?;
        self.writer.write_all(b"\r\n\r\n")?;
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(data: &[u8]) -> Frame {
        Frame {
            data: data.to_vec(),
            width: 640,
            height: 480,
            sequence: 1,
        }
    }

    #[test]
    fn test_multipart_framing() {
        let mut out = Vec::new();
        MultipartStream::new(&mut out)
            .publish(&frame(b"jpegbytes"), &CurrentStatus::unknown())
            .unwrap();

        let text = String::from_utf8_lossy(&out);
        assert!(text.starts_with("--frame\r\nContent-Type: image/jpeg\r\n"));
        assert!(text.contains("X-Rollcall-Status: "));
        assert!(text.contains("Not Identified"));
        assert!(text.contains("jpegbytes"));
        assert!(text.ends_with("\r\n\r\n"));
    }

    #[test]
    fn test_empty_frame_writes_nothing() {
        let mut out = Vec::new();
        MultipartStream::new(&mut out)
            .publish(&frame(b""), &CurrentStatus::unknown())
            .unwrap();
        assert!(out.is_empty());
    }
}
