//! Line classification - deciding which raw text lines are plausible
//! item lines.
//!
//! The filter is recall-biased: kept noise is acceptable because the
//! field extractor and matcher filter further, but a dropped real item
//! is not recoverable downstream.

use tracing::trace;

use super::rules::patterns::{
    has_item_keyword, has_non_item_keyword, CURRENCY, DEFINITE_NON_ITEM_TOKENS, PHONE_SHAPE,
    QTY_UNIT_SHAPE, STREET_SHAPE,
};
use crate::models::ClassifierConfig;

/// Filters raw OCR lines down to plausible item lines.
pub struct LineClassifier {
    min_line_len: usize,
}

impl LineClassifier {
    pub fn new(config: &ClassifierConfig) -> Self {
        Self {
            min_line_len: config.min_line_len,
        }
    }

    /// Keep the plausible item lines, preserving input order.
    pub fn classify<'a>(&self, lines: &[&'a str]) -> Vec<&'a str> {
        lines
            .iter()
            .copied()
            .filter(|line| self.is_item_line(line))
            .collect()
    }

    /// Apply the short-circuiting rule sequence to a single line.
    pub fn is_item_line(&self, line: &str) -> bool {
        let trimmed = line.trim();
        // character count, not bytes: OCR noise is often multibyte
        if trimmed.chars().count() < self.min_line_len {
            return false;
        }

        if PHONE_SHAPE.is_match(trimmed) || STREET_SHAPE.is_match(trimmed) {
            trace!("dropped (contact/address shape): {trimmed}");
            return false;
        }

        let lower = trimmed.to_lowercase();
        if DEFINITE_NON_ITEM_TOKENS.iter().any(|t| lower.contains(t)) {
            trace!("dropped (definite non-item token): {trimmed}");
            return false;
        }

        let has_item = has_item_keyword(trimmed);
        if has_non_item_keyword(trimmed) && !has_item {
            trace!("dropped (billing/header vocabulary): {trimmed}");
            return false;
        }

        // Permissive keeps: keyword, quantity+unit shape, or a price.
        has_item || QTY_UNIT_SHAPE.is_match(trimmed) || CURRENCY.is_match(trimmed)
    }
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self::new(&ClassifierConfig::default())
    }
}
