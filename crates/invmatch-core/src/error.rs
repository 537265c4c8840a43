//! Error types for the invmatch-core library.

use thiserror::Error;

/// Main error type for the invmatch library.
///
/// The extraction engine itself never fails - it degrades to empty or
/// low-confidence results. All fallibility lives in the collaborators:
/// OCR acquisition, configuration loading, and file I/O.
#[derive(Error, Debug)]
pub enum InvmatchError {
    /// OCR acquisition error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to OCR acquisition.
#[derive(Error, Debug)]
pub enum OcrError {
    /// The configured backend cannot run (missing credentials, missing
    /// executable, unreadable fixture).
    #[error("OCR unavailable: {0}")]
    Unavailable(String),

    /// The backend ran but returned an error.
    #[error("OCR backend failed: {0}")]
    Backend(String),

    /// The input image is empty or unreadable.
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// HTTP transport error talking to a cloud backend.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// I/O error while staging image data or fixtures.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the invmatch library.
pub type Result<T> = std::result::Result<T, InvmatchError>;
