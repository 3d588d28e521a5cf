//! Identity matching — best cosine match over the gallery.

use crate::gallery::{Gallery, Identity};
use crate::types::Embedding;

/// Result of matching a probe embedding against the gallery.
#[derive(Debug, Clone)]
pub struct MatchResult {
    /// True when the best similarity reached the threshold.
    pub matched: bool,
    /// Cosine similarity of the best match [-1, 1]; 0.0 for an empty gallery.
    pub similarity: f32,
    /// Key of the matched gallery entry (if matched).
    pub key: Option<String>,
    /// Parsed identity of the matched entry (if matched).
    pub identity: Option<Identity>,
}

impl MatchResult {
    fn unknown(similarity: f32) -> Self {
        Self {
            matched: false,
            similarity,
            key: None,
            identity: None,
        }
    }
}

/// Strategy for resolving a probe embedding against the gallery.
pub trait Matcher {
    fn compare(&self, probe: &Embedding, gallery: &Gallery, threshold: f32) -> MatchResult;
}

/// Cosine similarity matcher.
///
/// Iterates every gallery entry and keeps the maximum. Ties keep the
/// first entry in gallery iteration order (strict `>` comparison);
/// the gallery sorts its entries at load so that order is stable.
pub struct CosineMatcher;

impl Matcher for CosineMatcher {
    fn compare(&self, probe: &Embedding, gallery: &Gallery, threshold: f32) -> MatchResult {
        let mut best_sim = f32::NEG_INFINITY;
        let mut best_idx: Option<usize> = None;

        for (i, entry) in gallery.entries().iter().enumerate() {
            let sim = probe.similarity(&entry.embedding);
            if sim > best_sim {
                best_sim = sim;
                best_idx = Some(i);
            }
        }

        match best_idx {
            Some(idx) if best_sim >= threshold => {
                let entry = &gallery.entries()[idx];
                MatchResult {
                    matched: true,
                    similarity: best_sim,
                    key: Some(entry.key.clone()),
                    identity: Some(Identity::parse(&entry.key)),
                }
            }
            Some(_) => MatchResult::unknown(best_sim),
            // Empty gallery: always Unknown.
            None => MatchResult::unknown(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn gallery(entries: &[(&str, Vec<f32>)]) -> Gallery {
        let map: HashMap<String, Vec<f32>> = entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        Gallery::from_map(map).unwrap()
    }

    #[test]
    fn test_self_similarity_is_exact() {
        let g = gallery(&[
            ("Alice_001", vec![0.3, -0.2, 0.9]),
            ("Bob_002", vec![-0.5, 0.1, 0.4]),
        ]);
        for entry in g.entries() {
            let result = CosineMatcher.compare(&entry.embedding, &g, 0.4);
            assert!(result.matched);
            assert_eq!(result.key.as_deref(), Some(entry.key.as_str()));
            assert!((result.similarity - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_below_threshold_is_unknown() {
        let g = gallery(&[("Alice_001", vec![0.0, 1.0])]);
        let probe = Embedding::new(vec![1.0, 0.0]);
        let result = CosineMatcher.compare(&probe, &g, 0.4);
        assert!(!result.matched);
        assert!(result.key.is_none());
        assert!(result.identity.is_none());
        assert!(result.similarity.abs() < 1e-6);
    }

    #[test]
    fn test_empty_gallery_is_unknown() {
        let g = Gallery::default();
        let probe = Embedding::new(vec![1.0, 0.0]);
        let result = CosineMatcher.compare(&probe, &g, 0.4);
        assert!(!result.matched);
        assert_eq!(result.similarity, 0.0);
    }

    #[test]
    fn test_best_of_several() {
        let g = gallery(&[
            ("Alice_001", vec![1.0, 0.0, 0.0]),
            ("Bob_002", vec![0.0, 1.0, 0.0]),
            ("Carol_003", vec![0.0, 0.0, 1.0]),
        ]);
        let probe = Embedding::new(vec![0.1, 0.9, 0.1]);
        let result = CosineMatcher.compare(&probe, &g, 0.4);
        assert!(result.matched);
        assert_eq!(result.key.as_deref(), Some("Bob_002"));
        let id = result.identity.unwrap();
        assert_eq!(id.name, "Bob");
        assert_eq!(id.roll_number, "002");
    }

    #[test]
    fn test_tie_break_first_in_iteration_order() {
        // Identical embeddings: the first entry in sorted-key order wins.
        let g = gallery(&[
            ("Bob_002", vec![1.0, 0.0]),
            ("Alice_001", vec![1.0, 0.0]),
        ]);
        let probe = Embedding::new(vec![1.0, 0.0]);
        let result = CosineMatcher.compare(&probe, &g, 0.4);
        assert_eq!(result.key.as_deref(), Some("Alice_001"));
    }

    #[test]
    fn test_threshold_boundary_inclusive() {
        // score == threshold qualifies.
        let g = gallery(&[("Alice_001", vec![1.0, 0.0])]);
        let probe = Embedding::new(vec![1.0, 0.0]);
        let result = CosineMatcher.compare(&probe, &g, 1.0);
        assert!(result.matched);
    }
}
