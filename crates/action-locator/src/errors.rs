//! Error types for candidate chains

use thiserror::Error;

/// Locator error enumeration
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LocatorError {
    /// No candidate in the chain matched
    #[error("no candidate of '{chain}' matched ({tried} tried)")]
    Exhausted { chain: String, tried: usize },

    /// The chain has no candidates to try
    #[error("candidate chain '{0}' is empty")]
    EmptyChain(String),
}
