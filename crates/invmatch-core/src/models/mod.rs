//! Data models for candidates, matches, and configuration.

pub mod candidate;
pub mod config;

pub use candidate::{
    CandidateItem, Confidence, InventoryItem, MatchResult, SuggestedAction, VendorInfo,
};
pub use config::{
    ClassifierConfig, DebugOptions, EngineConfig, HeaderConfig, MatcherConfig, OcrConfig,
};
