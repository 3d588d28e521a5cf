//! Horizontal motion classification per detector track.
//!
//! Single-sample memory: each track remembers only its previous
//! left-edge x. A displacement beyond the threshold in either
//! direction classifies the movement; anything else (including the
//! first sighting of a track) classifies as nothing. Deliberately no
//! smoothing, dwell time, or debounce — sensitive to detector jitter
//! by design.

use std::collections::HashMap;

/// Default displacement threshold in pixels. Exclusive: a move of
/// exactly this many pixels classifies as no direction.
pub const DEFAULT_DISPLACEMENT_PX: i32 = 20;

/// Default bound on remembered tracks.
pub const DEFAULT_MAX_TRACKS: usize = 1024;

/// Direction of travel inferred from horizontal displacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Entering,
    Exiting,
}

struct TrackSlot {
    last_x: i32,
    last_seen: u64,
}

/// Per-track position memory and displacement classifier.
pub struct MotionTracker {
    tracks: HashMap<u64, TrackSlot>,
    displacement_px: i32,
    max_tracks: usize,
    /// Monotonic observation counter, used as the staleness clock.
    clock: u64,
}

impl Default for MotionTracker {
    fn default() -> Self {
        Self::new(DEFAULT_DISPLACEMENT_PX, DEFAULT_MAX_TRACKS)
    }
}

impl MotionTracker {
    pub fn new(displacement_px: i32, max_tracks: usize) -> Self {
        Self {
            tracks: HashMap::new(),
            displacement_px,
            max_tracks: max_tracks.max(1),
            clock: 0,
        }
    }

    /// Record an observation of `track_id` at left-edge `x` and
    /// classify the movement since the previous observation.
    ///
    /// The first observation of a track establishes its baseline and
    /// returns `None`. `last_x` is updated unconditionally, so an
    /// unclassified drift still moves the baseline.
    pub fn observe(&mut self, track_id: u64, x: i32) -> Option<Direction> {
        self.clock += 1;
        let clock = self.clock;

        let direction = match self.tracks.get_mut(&track_id) {
            Some(slot) => {
                let dx = x - slot.last_x;
                slot.last_x = x;
                slot.last_seen = clock;
                if dx > self.displacement_px {
                    Some(Direction::Entering)
                } else if dx < -self.displacement_px {
                    Some(Direction::Exiting)
                } else {
                    None
                }
            }
            None => {
                self.tracks.insert(
                    track_id,
                    TrackSlot {
                        last_x: x,
                        last_seen: clock,
                    },
                );
                None
            }
        };

        if self.tracks.len() > self.max_tracks {
            self.evict_stalest();
        }

        direction
    }

    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    /// Drop the least recently seen track. Keeps long-running
    /// deployments from growing the map without bound.
    fn evict_stalest(&mut self) {
        let stalest = self
            .tracks
            .iter()
            .min_by_key(|(_, slot)| slot.last_seen)
            .map(|(id, _)| *id);
        if let Some(id) = stalest {
            self.tracks.remove(&id);
            tracing::debug!(track_id = id, "evicted stale track");
        }
    }
}
