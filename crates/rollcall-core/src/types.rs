use serde::{Deserialize, Serialize};

/// Default track identifier used when the detector does not support
/// tracking. Resolved once at the detector boundary via
/// [`Face::resolved_track_id`], never at individual call sites.
pub const UNTRACKED_ID: u64 = 0;

/// Bounding box for a detected face, in pixel coordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge. This is the coordinate motion classification keys on.
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub confidence: f32,
}

/// Face embedding vector (typically 512-dimensional).
///
/// The dimension is fixed by the external model; the core never
/// inspects it beyond pairwise similarity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Embedding {
    pub values: Vec<f32>,
}

impl Embedding {
    pub fn new(values: Vec<f32>) -> Self {
        Self { values }
    }

    /// Compute cosine similarity with another embedding.
    ///
    /// Returns a value in [-1, 1]; higher = more similar. A zero-norm
    /// operand yields 0.0 rather than NaN.
    pub fn similarity(&self, other: &Embedding) -> f32 {
        let mut dot = 0.0f32;
        let mut norm_a = 0.0f32;
        let mut norm_b = 0.0f32;

        for (a, b) in self.values.iter().zip(other.values.iter()) {
            dot += a * b;
            norm_a += a * a;
            norm_b += b * b;
        }

        let denom = norm_a.sqrt() * norm_b.sqrt();
        if denom > 0.0 {
            dot / denom
        } else {
            0.0
        }
    }
}

/// A single detection returned by the external face detector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Face {
    pub bounding_box: BoundingBox,
    pub embedding: Embedding,
    /// Detector-assigned continuity identifier; `None` when the
    /// detector does not support tracking.
    #[serde(default)]
    pub track_id: Option<u64>,
}

impl Face {
    /// Track id with the untracked sentinel applied.
    pub fn resolved_track_id(&self) -> u64 {
        self.track_id.unwrap_or(UNTRACKED_ID)
    }
}
