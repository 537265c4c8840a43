//! Catalog matching - scoring candidates against inventory items and
//! suggesting an action.

use std::collections::HashSet;

use tracing::debug;

use crate::models::{CandidateItem, InventoryItem, MatchResult, MatcherConfig, SuggestedAction};

/// Word-overlap scores stay strictly below this, so a score of 1.0 is
/// reserved for exact normalized-name equality even when two names are
/// permutations of the same words.
const TOKEN_SCORE_CEILING: f32 = 0.95;

const SUBSTRING_SCORE: f32 = 0.8;

/// Scores each candidate independently against every inventory item.
/// No global assignment: one inventory item may be the best match for
/// several candidates.
pub struct Matcher {
    config: MatcherConfig,
}

impl Matcher {
    pub fn new(config: &MatcherConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Produce one result per candidate, index-aligned with the input.
    pub fn match_candidates(
        &self,
        candidates: &[CandidateItem],
        inventory: &[InventoryItem],
    ) -> Vec<MatchResult> {
        candidates
            .iter()
            .enumerate()
            .map(|(index, candidate)| self.best_match(index, candidate, inventory))
            .collect()
    }

    fn best_match(
        &self,
        candidate_index: usize,
        candidate: &CandidateItem,
        inventory: &[InventoryItem],
    ) -> MatchResult {
        let candidate_name = normalize(&candidate.name);

        let mut best_score = 0.0f32;
        let mut best_id = None;
        for item in inventory {
            let score = score_names(&candidate_name, &normalize(&item.name));
            if score > best_score {
                best_score = score;
                best_id = Some(item.id);
            }
        }

        debug!(
            "match: {:?} -> {:?} (score {:.2})",
            candidate.name, best_id, best_score
        );

        if best_score >= self.config.update_threshold {
            MatchResult {
                candidate_index,
                inventory_item_id: best_id,
                score: best_score,
                suggested_action: SuggestedAction::Update,
            }
        } else if best_score >= self.config.review_floor && best_score > 0.0 {
            MatchResult {
                candidate_index,
                inventory_item_id: best_id,
                score: best_score,
                suggested_action: SuggestedAction::Review,
            }
        } else {
            MatchResult {
                candidate_index,
                inventory_item_id: None,
                score: 0.0,
                suggested_action: SuggestedAction::AddNew,
            }
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new(&MatcherConfig::default())
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Score a normalized (candidate, inventory) name pair. First applicable
/// rule wins: exact 1.0, substring 0.8, else word-set overlap.
fn score_names(a: &str, b: &str) -> f32 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a == b {
        return 1.0;
    }
    if a.contains(b) || b.contains(a) {
        return SUBSTRING_SCORE;
    }

    let words_a: HashSet<&str> = a.split_whitespace().collect();
    let words_b: HashSet<&str> = b.split_whitespace().collect();
    if words_a.is_empty() || words_b.is_empty() {
        return 0.0;
    }

    let common = words_a.intersection(&words_b).count() as f32;
    let score = common / words_a.len().max(words_b.len()) as f32;
    score.min(TOKEN_SCORE_CEILING)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Confidence;
    use pretty_assertions::assert_eq;

    fn candidate(name: &str) -> CandidateItem {
        CandidateItem {
            name: name.to_string(),
            quantity: 1.0,
            unit: "each".to_string(),
            vendor: String::new(),
            price: None,
            confidence: Confidence::Medium,
            source_line: name.to_string(),
        }
    }

    fn item(id: i64, name: &str) -> InventoryItem {
        InventoryItem {
            id,
            name: name.to_string(),
            quantity: 10.0,
            unit: "each".to_string(),
        }
    }

    #[test]
    fn exact_name_scores_one_and_suggests_update() {
        let matcher = Matcher::default();
        let results = matcher.match_candidates(
            &[candidate("  Tomatoes ")],
            &[item(1, "tomatoes"), item(2, "Rice")],
        );

        assert_eq!(results[0].score, 1.0);
        assert_eq!(results[0].inventory_item_id, Some(1));
        assert_eq!(results[0].suggested_action, SuggestedAction::Update);
    }

    #[test]
    fn substring_scores_point_eight_and_suggests_update() {
        let matcher = Matcher::default();
        let results =
            matcher.match_candidates(&[candidate("Roma Tomatoes")], &[item(1, "Tomatoes")]);

        assert_eq!(results[0].score, 0.8);
        assert_eq!(results[0].suggested_action, SuggestedAction::Update);
    }

    #[test]
    fn partial_word_overlap_suggests_review() {
        let matcher = Matcher::default();
        let results = matcher.match_candidates(
            &[candidate("Brown Rice Bag")],
            &[item(1, "Brown Lentils Bag")],
        );

        // 2 of 3 words shared, below the update threshold
        assert_eq!(results[0].suggested_action, SuggestedAction::Review);
        assert_eq!(results[0].inventory_item_id, Some(1));
        assert!(results[0].score > 0.0 && results[0].score < 0.7);
    }

    #[test]
    fn typos_do_not_match() {
        let matcher = Matcher::default();
        let results = matcher.match_candidates(&[candidate("Tomatos")], &[item(1, "Tomatoes")]);

        // no shared tokens, no substring: the engine does not fix typos
        assert_eq!(results[0].score, 0.0);
        assert_eq!(results[0].suggested_action, SuggestedAction::AddNew);
        assert_eq!(results[0].inventory_item_id, None);
    }

    #[test]
    fn empty_catalog_yields_add_new_for_everyone() {
        let matcher = Matcher::default();
        let results =
            matcher.match_candidates(&[candidate("Tomatoes"), candidate("Rice")], &[]);

        for r in &results {
            assert_eq!(r.inventory_item_id, None);
            assert_eq!(r.score, 0.0);
            assert_eq!(r.suggested_action, SuggestedAction::AddNew);
        }
    }

    #[test]
    fn scores_stay_in_bounds() {
        let pairs = [
            ("tomatoes", "tomatoes"),
            ("roma tomatoes", "tomatoes"),
            ("brown rice", "white rice"),
            ("a b c", "c b a"),
            ("", "rice"),
        ];
        for (a, b) in pairs {
            let s = score_names(a, b);
            assert!((0.0..=1.0).contains(&s), "{a} vs {b} -> {s}");
        }
    }

    #[test]
    fn permuted_words_do_not_reach_exact_score() {
        assert!(score_names("fresh tomatoes", "tomatoes fresh") < 1.0);
    }

    #[test]
    fn review_floor_is_configurable() {
        let strict = Matcher::new(&MatcherConfig {
            update_threshold: 0.7,
            review_floor: 0.5,
        });
        // 1 of 3 words shared -> ~0.33, below the strict floor
        let results = strict.match_candidates(
            &[candidate("Red Onion Sack")],
            &[item(1, "Yellow Onion Crate")],
        );
        assert_eq!(results[0].suggested_action, SuggestedAction::AddNew);

        let lenient = Matcher::new(&MatcherConfig {
            update_threshold: 0.7,
            review_floor: 0.3,
        });
        let results = lenient.match_candidates(
            &[candidate("Red Onion Sack")],
            &[item(1, "Yellow Onion Crate")],
        );
        assert_eq!(results[0].suggested_action, SuggestedAction::Review);
    }
}
