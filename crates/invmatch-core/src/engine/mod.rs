//! The extraction and matching pipeline.
//!
//! Control flow: header extraction (vendor context) -> line split ->
//! line classifier -> field extractor per surviving line -> dedup ->
//! catalog matcher. Pure and synchronous: no I/O, no shared state, safe
//! to invoke from any number of threads.

pub mod classifier;
pub mod dedupe;
pub mod extractor;
pub mod header;
pub mod matcher;
pub mod rules;

pub use classifier::LineClassifier;
pub use dedupe::dedupe;
pub use extractor::FieldExtractor;
pub use header::HeaderExtractor;
pub use matcher::Matcher;
pub use rules::{LineRule, LineView, RuleMatch};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::models::{CandidateItem, EngineConfig, InventoryItem, MatchResult, VendorInfo};
use crate::ocr::OcrText;

/// Result of one engine invocation. `candidates` and `matches` are
/// index-aligned 1:1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineReport {
    /// Document-level vendor metadata.
    pub vendor: VendorInfo,

    /// Deduplicated candidates, in confidence order.
    pub candidates: Vec<CandidateItem>,

    /// One match result per candidate.
    pub matches: Vec<MatchResult>,
}

impl EngineReport {
    fn empty() -> Self {
        Self {
            vendor: VendorInfo::default(),
            candidates: Vec::new(),
            matches: Vec::new(),
        }
    }
}

/// The invoice extraction and matching engine.
pub struct InvoiceEngine {
    classifier: LineClassifier,
    extractor: FieldExtractor,
    header: HeaderExtractor,
    matcher: Matcher,
}

impl InvoiceEngine {
    /// Create an engine with default settings.
    pub fn new() -> Self {
        Self::with_config(&EngineConfig::default())
    }

    /// Create an engine from configuration.
    pub fn with_config(config: &EngineConfig) -> Self {
        Self {
            classifier: LineClassifier::new(&config.classifier),
            extractor: FieldExtractor::new(),
            header: HeaderExtractor::new(&config.header),
            matcher: Matcher::new(&config.matcher),
        }
    }

    /// Run the full pipeline over one document of OCR text against an
    /// inventory snapshot. Never fails: malformed input degrades to an
    /// empty or low-confidence report.
    pub fn process(&self, text: &str, inventory: &[InventoryItem]) -> EngineReport {
        if text.trim().is_empty() {
            return EngineReport::empty();
        }

        let lines: Vec<&str> = text.lines().collect();
        let vendor = self.header.extract_vendor_info(&lines);

        let kept = self.classifier.classify(&lines);
        debug!("classifier kept {}/{} lines", kept.len(), lines.len());

        // Extraction preserves input-line order so that equal-confidence
        // duplicates dedup deterministically.
        let extracted: Vec<CandidateItem> = kept
            .iter()
            .filter_map(|line| self.extractor.extract(line, &vendor.name))
            .collect();

        let candidates = dedupe(extracted);
        let matches = self.matcher.match_candidates(&candidates, inventory);

        info!(
            "extracted {} candidates from {} lines (vendor: {:?})",
            candidates.len(),
            lines.len(),
            vendor.name
        );

        EngineReport {
            vendor,
            candidates,
            matches,
        }
    }

    /// Run the pipeline over a backend's OCR output. Per-paragraph
    /// confidence annotations are accepted but not used by extraction.
    pub fn process_ocr(&self, ocr: &OcrText, inventory: &[InventoryItem]) -> EngineReport {
        self.process(&ocr.text, inventory)
    }
}

impl Default for InvoiceEngine {
    fn default() -> Self {
        Self::new()
    }
}
