//! Rule objects for turning an item line into structured fields.
//!
//! Rules are tried in priority order (most specific and most confident
//! first); the first match wins. Each rule sees the line with any trailing
//! currency amount already removed, so a price never masks a quantity.

pub mod patterns;

use crate::models::Confidence;
use patterns::{is_unit_word, MULT_NAME_QTY, MULT_QTY_NAME, ORDINAL_LINE, QTY_UNIT_LINE};

/// Generic count unit used when a line carries no unit of measure.
pub const GENERIC_UNIT: &str = "each";

/// A line as seen by the rules.
pub struct LineView<'a> {
    /// The line with the currency substring removed and re-trimmed.
    pub working: &'a str,
    /// Currency-shaped substring found anywhere on the raw line.
    pub price: Option<&'a str>,
}

/// Structured fields produced by a matching rule.
#[derive(Debug, Clone)]
pub struct RuleMatch {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub confidence: Confidence,
    /// Price captured by the rule itself (as opposed to one found
    /// elsewhere on the line).
    pub price: Option<String>,
}

/// A single extraction rule in the cascade.
pub trait LineRule: Send + Sync {
    /// Rule name, for tracing.
    fn name(&self) -> &'static str;

    /// Try to match the line, returning structured fields on success.
    fn try_match(&self, line: &LineView<'_>) -> Option<RuleMatch>;
}

/// `Name x Quantity` / `Quantity x Name` multiplication lines.
pub struct MultiplicationRule;

impl LineRule for MultiplicationRule {
    fn name(&self) -> &'static str {
        "multiplication"
    }

    fn try_match(&self, line: &LineView<'_>) -> Option<RuleMatch> {
        let (name, quantity) = if let Some(caps) = MULT_NAME_QTY.captures(line.working) {
            (caps[1].to_string(), caps[2].parse().ok()?)
        } else if let Some(caps) = MULT_QTY_NAME.captures(line.working) {
            (caps[2].to_string(), caps[1].parse().ok()?)
        } else {
            return None;
        };

        Some(RuleMatch {
            name,
            quantity,
            unit: GENERIC_UNIT.to_string(),
            confidence: Confidence::High,
            price: None,
        })
    }
}

/// `Name - $Price` / `Name $Price` lines. Only applies when the residue
/// after stripping the price carries no digits, so quantity-bearing lines
/// fall through to the quantity rules.
pub struct PriceTagRule;

impl LineRule for PriceTagRule {
    fn name(&self) -> &'static str {
        "price_tag"
    }

    fn try_match(&self, line: &LineView<'_>) -> Option<RuleMatch> {
        let price = line.price?;
        if line.working.is_empty() || line.working.chars().any(|c| c.is_ascii_digit()) {
            return None;
        }

        Some(RuleMatch {
            name: line.working.to_string(),
            quantity: 1.0,
            unit: GENERIC_UNIT.to_string(),
            confidence: Confidence::High,
            price: Some(price.to_string()),
        })
    }
}

/// Free-form `Name Quantity [Unit]` lines. High confidence when the
/// trailing token is a recognized unit, medium otherwise.
pub struct QuantityUnitRule;

impl LineRule for QuantityUnitRule {
    fn name(&self) -> &'static str {
        "quantity_unit"
    }

    fn try_match(&self, line: &LineView<'_>) -> Option<RuleMatch> {
        let caps = QTY_UNIT_LINE.captures(line.working)?;
        let quantity: f64 = caps[2].parse().ok()?;

        let (unit, confidence) = match caps.get(3) {
            Some(token) if is_unit_word(token.as_str()) => {
                (token.as_str().to_lowercase(), Confidence::High)
            }
            _ => (GENERIC_UNIT.to_string(), Confidence::Medium),
        };

        Some(RuleMatch {
            name: caps[1].to_string(),
            quantity,
            unit,
            confidence,
            price: None,
        })
    }
}

/// Leading-ordinal lines with no other structure ("3. Tomatoes").
pub struct OrdinalRule;

impl LineRule for OrdinalRule {
    fn name(&self) -> &'static str {
        "ordinal"
    }

    fn try_match(&self, line: &LineView<'_>) -> Option<RuleMatch> {
        let caps = ORDINAL_LINE.captures(line.working)?;

        Some(RuleMatch {
            name: caps[2].to_string(),
            quantity: 1.0,
            unit: GENERIC_UNIT.to_string(),
            confidence: Confidence::Medium,
            price: None,
        })
    }
}

/// The default rule cascade, in priority order.
pub fn default_rules() -> Vec<Box<dyn LineRule>> {
    vec![
        Box::new(MultiplicationRule),
        Box::new(PriceTagRule),
        Box::new(QuantityUnitRule),
        Box::new(OrdinalRule),
    ]
}
