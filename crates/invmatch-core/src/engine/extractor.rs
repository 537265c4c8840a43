//! Field extraction - turning one item line into zero-or-one structured
//! candidate via the rule cascade, with a keyword-guarded fallback.

use tracing::trace;

use super::rules::patterns::{has_item_keyword, CURRENCY, ORDINAL_PREFIX};
use super::rules::{default_rules, LineRule, LineView, RuleMatch, GENERIC_UNIT};
use crate::models::{CandidateItem, Confidence};

/// Applies the ordered rule cascade to classified item lines.
pub struct FieldExtractor {
    rules: Vec<Box<dyn LineRule>>,
}

impl FieldExtractor {
    pub fn new() -> Self {
        Self {
            rules: default_rules(),
        }
    }

    /// Extract a candidate from one line, with the document's vendor name
    /// as context. Returns `None` when nothing plausible can be read.
    pub fn extract(&self, line: &str, vendor: &str) -> Option<CandidateItem> {
        let raw = line.trim();
        if raw.is_empty() {
            return None;
        }

        // A currency substring anywhere on the line is attached to the
        // candidate even when the matching rule does not capture it, and
        // is removed from the text the quantity rules see.
        let price = CURRENCY.find(raw).map(|m| m.as_str().trim().to_string());
        let stripped = CURRENCY.replace_all(raw, "");
        let working = stripped
            .trim()
            .trim_end_matches(['-', '–', ':', '|'])
            .trim();

        let view = LineView {
            working,
            price: price.as_deref(),
        };

        for rule in &self.rules {
            if let Some(m) = rule.try_match(&view) {
                trace!("rule {} matched: {raw}", rule.name());
                return self.finish(m, raw, vendor, price);
            }
        }

        // Fallback: only for lines that at least carry an item keyword.
        if has_item_keyword(raw) {
            let m = fallback_match(working);
            return self.finish(m, raw, vendor, price);
        }

        None
    }

    /// Post-processing shared by every produced candidate: name cleanup,
    /// ordinal stripping, and the empty/numeric-name discard.
    fn finish(
        &self,
        m: RuleMatch,
        raw: &str,
        vendor: &str,
        line_price: Option<String>,
    ) -> Option<CandidateItem> {
        let collapsed = m.name.split_whitespace().collect::<Vec<_>>().join(" ");
        let name = ORDINAL_PREFIX.replace(&collapsed, "").trim().to_string();

        if name.chars().count() < 2 || is_purely_numeric(&name) {
            trace!("discarded candidate with degenerate name: {raw}");
            return None;
        }

        Some(CandidateItem {
            name,
            quantity: m.quantity.max(0.0),
            unit: m.unit,
            vendor: vendor.to_string(),
            price: m.price.or(line_price),
            confidence: m.confidence,
            source_line: raw.to_string(),
        })
    }
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn is_purely_numeric(name: &str) -> bool {
    name.chars()
        .all(|c| c.is_ascii_digit() || c == '.' || c.is_whitespace())
}

/// Last-resort extraction: the first purely numeric token is the
/// quantity; the tokens before it (or after it, if none precede) are the
/// name. With no numeric token at all, the whole line is the name.
fn fallback_match(working: &str) -> RuleMatch {
    let tokens: Vec<&str> = working.split_whitespace().collect();

    let numeric_pos = tokens
        .iter()
        .position(|t| !t.is_empty() && t.chars().all(|c| c.is_ascii_digit() || c == '.'));

    match numeric_pos {
        Some(pos) => {
            let quantity = tokens[pos].parse().unwrap_or(1.0);
            let name_tokens = if pos > 0 {
                &tokens[..pos]
            } else {
                &tokens[pos + 1..]
            };
            RuleMatch {
                name: name_tokens.join(" "),
                quantity,
                unit: GENERIC_UNIT.to_string(),
                confidence: Confidence::Low,
                price: None,
            }
        }
        None => RuleMatch {
            name: working.to_string(),
            quantity: 1.0,
            unit: GENERIC_UNIT.to_string(),
            confidence: Confidence::VeryLow,
            price: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn free_form_line_with_unit_and_price() {
        let extractor = FieldExtractor::new();
        let c = extractor.extract("Tomatoes 5 kg $12.99", "Fresh Farms").unwrap();

        assert_eq!(c.name, "Tomatoes");
        assert_eq!(c.quantity, 5.0);
        assert_eq!(c.unit, "kg");
        assert_eq!(c.price.as_deref(), Some("$12.99"));
        assert_eq!(c.confidence, Confidence::High);
        assert_eq!(c.vendor, "Fresh Farms");
        assert_eq!(c.source_line, "Tomatoes 5 kg $12.99");
    }

    #[test]
    fn ordinal_prefix_is_stripped_from_quantity_lines() {
        let extractor = FieldExtractor::new();
        let c = extractor.extract("1. Chicken 2 kg $18.99", "").unwrap();

        assert_eq!(c.name, "Chicken");
        assert_eq!(c.quantity, 2.0);
        assert_eq!(c.unit, "kg");
        assert_eq!(c.price.as_deref(), Some("$18.99"));
    }

    #[test]
    fn bare_ordinal_line_defaults_quantity() {
        let extractor = FieldExtractor::new();
        let c = extractor.extract("3. Tomatoes", "").unwrap();

        assert_eq!(c.name, "Tomatoes");
        assert_eq!(c.quantity, 1.0);
        assert_eq!(c.unit, "each");
        assert_eq!(c.confidence, Confidence::Medium);
    }

    #[test]
    fn multiplication_line() {
        let extractor = FieldExtractor::new();
        let c = extractor.extract("Burger x 3", "").unwrap();

        assert_eq!(c.name, "Burger");
        assert_eq!(c.quantity, 3.0);
        assert_eq!(c.unit, "each");
        assert_eq!(c.confidence, Confidence::High);
    }

    #[test]
    fn price_tag_line_defaults_quantity() {
        let extractor = FieldExtractor::new();
        let c = extractor.extract("Olive Oil - $8.50", "").unwrap();

        assert_eq!(c.name, "Olive Oil");
        assert_eq!(c.quantity, 1.0);
        assert_eq!(c.price.as_deref(), Some("$8.50"));
        assert_eq!(c.confidence, Confidence::High);
    }

    #[test]
    fn fallback_uses_first_numeric_token() {
        let extractor = FieldExtractor::new();
        // leading number, so the quantity rule cannot apply
        let c = extractor.extract("4 chicken thighs cut", "").unwrap();

        assert_eq!(c.name, "chicken thighs cut");
        assert_eq!(c.quantity, 4.0);
        assert_eq!(c.confidence, Confidence::Low);
    }

    #[test]
    fn fallback_without_number_uses_whole_line() {
        let extractor = FieldExtractor::new();
        let c = extractor.extract("fresh chicken breast", "").unwrap();

        assert_eq!(c.name, "fresh chicken breast");
        assert_eq!(c.quantity, 1.0);
        assert_eq!(c.confidence, Confidence::VeryLow);
    }

    #[test]
    fn fallback_recognizes_es_plural_keywords() {
        let extractor = FieldExtractor::new();
        let c = extractor.extract("Organic Tomatoes", "").unwrap();

        assert_eq!(c.name, "Organic Tomatoes");
        assert_eq!(c.quantity, 1.0);
        assert_eq!(c.confidence, Confidence::VeryLow);
    }

    #[test]
    fn keyword_free_unmatched_lines_are_skipped() {
        let extractor = FieldExtractor::new();
        assert!(extractor.extract("lorem ipsum dolor", "").is_none());
    }

    #[test]
    fn degenerate_names_are_discarded() {
        let extractor = FieldExtractor::new();
        // name collapses to a single numeric token
        assert!(extractor.extract("12 34", "").is_none());
        assert!(extractor.extract("", "").is_none());
    }
}
