//! Data models for extracted candidates and catalog matches.

use serde::{Deserialize, Serialize};

/// Ordinal confidence assigned by an extraction rule.
///
/// This is not a calibrated probability - it ranks how trustworthy a
/// rule's output is, for dedup tie-breaking and UI hinting. The numeric
/// scale is fixed: very_low=0.2, low=0.4, medium=0.6, high=0.8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    VeryLow,
    Low,
    Medium,
    High,
}

impl Confidence {
    /// Numeric value on the fixed [0, 1] scale.
    pub fn score(self) -> f32 {
        match self {
            Confidence::VeryLow => 0.2,
            Confidence::Low => 0.4,
            Confidence::Medium => 0.6,
            Confidence::High => 0.8,
        }
    }
}

/// A structured guess at one inventory line extracted from invoice text,
/// not yet confirmed by a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateItem {
    /// Item name, trimmed and whitespace-normalized. Never empty.
    pub name: String,

    /// Extracted quantity (>= 0).
    pub quantity: f64,

    /// Unit of measure ("each" when the line carried none).
    pub unit: String,

    /// Vendor context from the document header (may be empty).
    pub vendor: String,

    /// Currency-shaped substring found on the line, verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,

    /// Extraction confidence.
    pub confidence: Confidence,

    /// The raw line this candidate was extracted from.
    pub source_line: String,
}

/// Invoice-level metadata attached to every candidate from the same
/// document. Both fields default to empty strings when not found.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VendorInfo {
    pub name: String,
    pub invoice_number: String,
}

/// A catalog item owned by the persistence layer. Read-only input to the
/// matcher; the engine never mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: i64,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
}

/// What the caller should do with a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestedAction {
    /// Treat as an existing catalog item; merge/update quantity.
    Update,
    /// Ambiguous match, needs human confirmation.
    Review,
    /// No plausible match; create a new catalog item.
    AddNew,
}

/// Best catalog match for one candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    /// Index of the candidate in the deduplicated candidate list.
    pub candidate_index: usize,

    /// Best-matching inventory item, if any scored above the floor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory_item_id: Option<i64>,

    /// Match score in [0, 1]. Exactly 1.0 only on exact normalized-name
    /// equality.
    pub score: f32,

    /// Suggested action derived from the score thresholds.
    pub suggested_action: SuggestedAction,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn confidence_ordering_follows_scale() {
        assert!(Confidence::VeryLow < Confidence::Low);
        assert!(Confidence::Low < Confidence::Medium);
        assert!(Confidence::Medium < Confidence::High);
        assert!(Confidence::High.score() > Confidence::Medium.score());
    }

    #[test]
    fn confidence_serializes_as_snake_case() {
        let json = serde_json::to_string(&Confidence::VeryLow).unwrap();
        assert_eq!(json, "\"very_low\"");
    }

    #[test]
    fn suggested_action_serializes_as_snake_case() {
        let json = serde_json::to_string(&SuggestedAction::AddNew).unwrap();
        assert_eq!(json, "\"add_new\"");
    }
}
