//! Core library for invoice OCR inventory matching.
//!
//! This crate provides:
//! - Line classification of noisy OCR text into plausible item lines
//! - Rule-cascade field extraction (name, quantity, unit, price)
//! - Vendor/invoice-number header extraction
//! - Confidence-ranked deduplication
//! - Catalog matching with suggested actions (update/review/add_new)
//! - Pluggable OCR acquisition backends (cloud, local, fixture)

pub mod engine;
pub mod error;
pub mod models;
pub mod ocr;

pub use engine::{EngineReport, InvoiceEngine};
pub use error::{InvmatchError, OcrError, Result};
pub use models::{
    CandidateItem, Confidence, EngineConfig, InventoryItem, MatchResult, SuggestedAction,
    VendorInfo,
};
pub use ocr::{create_backend, BackendKind, OcrBackend, OcrParagraph, OcrText};
