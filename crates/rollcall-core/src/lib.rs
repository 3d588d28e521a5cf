//! rollcall-core — Face-recognition attendance engine.
//!
//! Matches probe embeddings against a gallery of named identities,
//! classifies horizontal motion per detector track, and applies the
//! deduplicated Entry/Exit ledger rules. The detection model and the
//! frame source are external collaborators behind the [`detector`] and
//! [`source`] traits.

pub mod detector;
pub mod gallery;
pub mod ledger;
pub mod matcher;
pub mod motion;
pub mod source;
pub mod types;

pub use detector::FaceDetector;
pub use gallery::{Gallery, GalleryEntry, Identity};
pub use ledger::{AttendanceLedger, AttendanceRecord, CurrentStatus, LogEvent};
pub use matcher::{CosineMatcher, MatchResult, Matcher};
pub use motion::{Direction, MotionTracker};
pub use source::{Frame, FrameSource};
pub use types::{BoundingBox, Embedding, Face};
