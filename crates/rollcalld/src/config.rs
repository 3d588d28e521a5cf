use crate::pipeline::PipelineParams;
use std::path::PathBuf;

/// Daemon configuration, loaded from environment variables.
pub struct Config {
    /// Path to the gallery JSON file (identity key → embedding).
    pub gallery_path: PathBuf,
    /// Path to the append-only attendance CSV log.
    pub log_path: PathBuf,
    /// Optional JSONL file of recorded detections to drive the pipeline.
    pub replay_path: Option<PathBuf>,
    /// Optional path to write the boundary-delimited display stream to.
    pub stream_path: Option<PathBuf>,
    /// Cosine similarity threshold for a qualifying match.
    pub similarity_threshold: f32,
    /// Horizontal displacement (pixels, exclusive) that classifies motion.
    pub displacement_px: i32,
    /// Bound on remembered tracks before stale eviction.
    pub max_tracks: usize,
    /// Process every Nth frame from the source.
    pub frame_interval: u32,
    /// Cooperative pacing target; 0 disables the per-frame sleep.
    pub target_fps: u32,
}

impl Config {
    /// Load configuration from `ROLLCALL_*` environment variables with defaults.
    pub fn from_env() -> Self {
        let data_dir = std::env::var("XDG_DATA_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
                PathBuf::from(home).join(".local/share")
            })
            .join("rollcall");

        let gallery_path = std::env::var("ROLLCALL_GALLERY_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_dir.join("gallery.json"));

        let log_path = std::env::var("ROLLCALL_LOG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_dir.join("attendance_log.csv"));

        Self {
            gallery_path,
            log_path,
            replay_path: std::env::var("ROLLCALL_REPLAY_PATH").ok().map(PathBuf::from),
            stream_path: std::env::var("ROLLCALL_STREAM_PATH").ok().map(PathBuf::from),
            similarity_threshold: env_f32("ROLLCALL_SIMILARITY_THRESHOLD", 0.40),
            displacement_px: env_i32("ROLLCALL_DISPLACEMENT_PX", 20),
            max_tracks: env_usize("ROLLCALL_MAX_TRACKS", 1024),
            frame_interval: env_u32("ROLLCALL_FRAME_INTERVAL", 3),
            target_fps: env_u32("ROLLCALL_TARGET_FPS", 10),
        }
    }

    pub fn pipeline_params(&self) -> PipelineParams {
        PipelineParams {
            similarity_threshold: self.similarity_threshold,
            displacement_px: self.displacement_px,
            max_tracks: self.max_tracks,
            frame_interval: self.frame_interval,
            target_fps: self.target_fps,
        }
    }
}

fn env_f32(key: &str, default: f32) -> f32 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_i32(key: &str, default: i32) -> i32 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_u32(key: &str, default: u32) -> u32 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_usize(key: &str, default: usize) -> usize {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
