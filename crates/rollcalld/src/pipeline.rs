//! Frame pipeline — the single synchronous processing loop.
//!
//! One frame is fully classified and its ledger effects applied before
//! the next is read: detect → match → motion → ledger → log + display.
//! The loop owns all mutable state (track memory, ledger, current
//! status) and publishes read-only snapshots into [`SharedView`] for
//! the D-Bus query path.

use crate::attendance_log::AttendanceSink;
use crate::stream::DisplaySink;
use rollcall_core::detector::FaceDetector;
use rollcall_core::gallery::Gallery;
use rollcall_core::ledger::{AttendanceLedger, AttendanceRecord, CurrentStatus, LedgerEffect, LogEvent};
use rollcall_core::matcher::{CosineMatcher, Matcher};
use rollcall_core::motion::MotionTracker;
use rollcall_core::source::FrameSource;
use rollcall_core::types::Face;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Tuning knobs for one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineParams {
    pub similarity_threshold: f32,
    pub displacement_px: i32,
    pub max_tracks: usize,
    /// Process every Nth source frame.
    pub frame_interval: u32,
    /// Cooperative pacing; 0 disables the per-frame sleep.
    pub target_fps: u32,
}

/// Snapshot shared with the status query surface. The pipeline loop is
/// the only writer; readers take the lock for an atomic view.
#[derive(Debug, Default)]
pub struct SharedView {
    pub current: CurrentStatus,
    pub attendance: Vec<AttendanceRecord>,
}

/// Spawn the pipeline on a dedicated OS thread.
///
/// The thread ends when the source does (terminal failure included);
/// that is graceful for the process, which keeps serving queries.
pub fn spawn_pipeline(
    source: Box<dyn FrameSource + Send>,
    detector: Box<dyn FaceDetector + Send>,
    gallery: Gallery,
    params: PipelineParams,
    sink: Box<dyn AttendanceSink + Send>,
    display: Box<dyn DisplaySink + Send>,
    view: Arc<Mutex<SharedView>>,
) -> std::thread::JoinHandle<()> {
    std::thread::Builder::new()
        .name("rollcall-pipeline".into())
        .spawn(move || {
            tracing::info!(
                identities = gallery.len(),
                threshold = params.similarity_threshold,
                "pipeline started"
            );
            run_loop(source, detector, gallery, params, sink, display, view);
            tracing::info!("pipeline stopped");
        })
        .expect("failed to spawn pipeline thread")
}

fn run_loop(
    mut source: Box<dyn FrameSource + Send>,
    mut detector: Box<dyn FaceDetector + Send>,
    gallery: Gallery,
    params: PipelineParams,
    mut sink: Box<dyn AttendanceSink + Send>,
    mut display: Box<dyn DisplaySink + Send>,
    view: Arc<Mutex<SharedView>>,
) {
    let matcher = CosineMatcher;
    let mut tracker = MotionTracker::new(params.displacement_px, params.max_tracks);
    let mut ledger = AttendanceLedger::new();
    let mut frame_count = 0u64;
    let delay = if params.target_fps > 0 {
        Some(Duration::from_secs_f64(1.0 / params.target_fps as f64))
    } else {
        None
    };

    loop {
        let frame = match source.next_frame() {
            Ok(Some(frame)) => frame,
            Ok(None) => {
                tracing::info!("frame source ended");
                break;
            }
            Err(err) => {
                tracing::warn!(error = %err, "frame source failed; stopping pipeline");
                break;
            }
        };

        // Cooperative rate limiting: throughput only, never correctness.
        frame_count += 1;
        if params.frame_interval > 1 && frame_count % params.frame_interval as u64 != 0 {
            continue;
        }
        if let Some(delay) = delay {
            std::thread::sleep(delay);
        }

        let faces = match detector.detect(&frame) {
            Ok(faces) => faces,
            Err(err) => {
                tracing::warn!(error = %err, sequence = frame.sequence, "detection failed; frame skipped");
                continue;
            }
        };

        let (effect, event) = classify_frame(
            &faces,
            &matcher,
            &gallery,
            params.similarity_threshold,
            &mut tracker,
            &mut ledger,
        );
        tracing::debug!(sequence = frame.sequence, faces = faces.len(), ?effect, "frame processed");

        if let Some(event) = &event {
            tracing::info!(
                name = %event.name,
                roll_number = %event.roll_number,
                action = event.action.as_str(),
                "attendance event"
            );
            if let Err(err) = sink.append(event) {
                tracing::warn!(error = %err, "attendance log write failed; continuing");
            }
        }

        if let Ok(mut shared) = view.lock() {
            shared.current = ledger.current_status().clone();
            shared.attendance = ledger.records();
        }

        if let Err(err) = display.publish(&frame, ledger.current_status()) {
            tracing::warn!(error = %err, "display sink write failed");
        }
    }
}

/// Classify one frame's detections and apply the ledger rules.
///
/// Single-face policy: exactly the first detection in the detector's
/// returned order is considered; any simultaneous detections are
/// ignored for this frame. Motion is observed before the threshold
/// gate so the track baseline advances even for unknown faces.
fn classify_frame(
    faces: &[Face],
    matcher: &CosineMatcher,
    gallery: &Gallery,
    threshold: f32,
    tracker: &mut MotionTracker,
    ledger: &mut AttendanceLedger,
) -> (LedgerEffect, Option<LogEvent>) {
    let Some(face) = faces.first() else {
        return ledger.apply(None, None);
    };

    let direction = tracker.observe(face.resolved_track_id(), face.bounding_box.x as i32);
    let result = matcher.compare(&face.embedding, gallery, threshold);

    ledger.apply(direction, result.identity.as_ref())
}
