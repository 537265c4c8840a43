//! Candidate deduplication - highest-confidence extraction wins per
//! normalized name.

use std::collections::HashSet;

use tracing::trace;

use crate::models::CandidateItem;

/// Collapse candidates sharing a normalized (lowercased, trimmed) name.
///
/// The sort is stable, so candidates with equal confidence keep their
/// input-line relative order and the earlier line wins the key.
pub fn dedupe(mut candidates: Vec<CandidateItem>) -> Vec<CandidateItem> {
    candidates.sort_by(|a, b| b.confidence.cmp(&a.confidence));

    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|c| {
            let key = c.name.trim().to_lowercase();
            let fresh = seen.insert(key);
            if !fresh {
                trace!("dropped duplicate candidate: {}", c.name);
            }
            fresh
        })
        .collect()
}
