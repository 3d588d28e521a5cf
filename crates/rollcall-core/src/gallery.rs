//! Gallery store — named identity embeddings, loaded once at startup.
//!
//! The on-disk format is a JSON object mapping identity keys
//! (`"<Name with spaces>_<RollNumber>"`, spaces encoded as underscores)
//! to fixed-length float vectors.

use crate::types::Embedding;
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("gallery file not found: {0}")]
    NotFound(String),
    #[error("failed to read gallery: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse gallery: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("embedding dimension mismatch for '{key}': expected {expected}, got {actual}")]
    DimensionMismatch {
        key: String,
        expected: usize,
        actual: usize,
    },
}

/// A person's display identity, parsed from a gallery key.
///
/// The roll number is the substring after the last underscore; the
/// name is the remainder with underscores replaced by spaces. A key
/// with no underscore parses as a bare roll number with an empty name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub name: String,
    pub roll_number: String,
}

impl Identity {
    pub fn parse(key: &str) -> Self {
        match key.rsplit_once('_') {
            Some((name, roll)) => Self {
                name: name.replace('_', " "),
                roll_number: roll.to_string(),
            },
            None => Self {
                name: String::new(),
                roll_number: key.to_string(),
            },
        }
    }
}

/// One enrolled identity: unique key plus its reference embedding.
#[derive(Debug, Clone)]
pub struct GalleryEntry {
    pub key: String,
    pub embedding: Embedding,
}

/// Immutable set of enrolled identities.
///
/// Entries are sorted by key at load time so iteration order (and
/// therefore the matcher's tie-break) is deterministic regardless of
/// JSON map ordering.
#[derive(Debug, Clone, Default)]
pub struct Gallery {
    entries: Vec<GalleryEntry>,
}

impl Gallery {
    /// Load the gallery from a JSON file. Missing or unreadable files
    /// are errors; callers treat them as fatal at startup.
    pub fn load(path: &Path) -> Result<Self, GalleryError> {
        if !path.exists() {
            return Err(GalleryError::NotFound(path.display().to_string()));
        }

        let raw = std::fs::read_to_string(path)?;
        let map: HashMap<String, Vec<f32>> = serde_json::from_str(&raw)?;
        let gallery = Self::from_map(map)?;

        tracing::info!(
            path = %path.display(),
            identities = gallery.len(),
            "gallery loaded"
        );
        Ok(gallery)
    }

    /// Build a gallery from an in-memory key → vector map, validating
    /// that all embeddings share one dimension.
    pub fn from_map(map: HashMap<String, Vec<f32>>) -> Result<Self, GalleryError> {
        let mut entries: Vec<GalleryEntry> = map
            .into_iter()
            .map(|(key, values)| GalleryEntry {
                key,
                embedding: Embedding::new(values),
            })
            .collect();
        entries.sort_by(|a, b| a.key.cmp(&b.key));

        if let Some(first) = entries.first() {
            let expected = first.embedding.values.len();
            for entry in &entries[1..] {
                let actual = entry.embedding.values.len();
                if actual != expected {
                    return Err(GalleryError::DimensionMismatch {
                        key: entry.key.clone(),
                        expected,
                        actual,
                    });
                }
            }
        }

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[GalleryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
