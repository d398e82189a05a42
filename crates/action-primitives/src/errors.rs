//! Error types for page driver operations

use thiserror::Error;

/// Failures reported by a page driver
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// Wait operation timed out
    #[error("Wait timeout: {0}")]
    WaitTimeout(String),

    /// Element anchor could not be resolved
    #[error("Anchor not found: {0}")]
    AnchorNotFound(String),

    /// Element is present but does not accept clicks
    #[error("Element not clickable: {0}")]
    NotClickable(String),

    /// No element is registered under the planner index
    #[error("Unknown element index: {0}")]
    UnknownIndex(u32),

    /// File attachment failed
    #[error("Upload failed: {0}")]
    Upload(String),

    /// Backend communication error
    #[error("Driver I/O error: {0}")]
    DriverIo(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}
