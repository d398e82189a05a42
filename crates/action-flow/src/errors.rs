//! Flow error types

use action_primitives::ActionError;
use perceiver_structural::LookupError;
use thiserror::Error;

/// Apply-flow failures
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApplyError {
    /// No entry label became visible and clickable
    #[error("no application entry button found ({tried} labels tried)")]
    NoEntryPoint { tried: usize },

    /// The wizard was entered but never submitted; `stalled` is set when
    /// the loop ended early because no advance control was found
    #[error("application not completed after {steps} step(s)")]
    IncompleteFlow { steps: usize, stalled: bool },
}

/// Filter click failures
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// No element carries the requested text
    #[error("no filter labelled '{0}'")]
    NotFound(String),

    /// The text exists but nothing clickable encloses it
    #[error("filter '{0}' has no clickable control")]
    NotClickable(String),

    #[error(transparent)]
    Driver(#[from] ActionError),
}

impl From<LookupError> for FilterError {
    fn from(err: LookupError) -> Self {
        match err {
            LookupError::TextNotFound(text) => FilterError::NotFound(text),
            LookupError::NoClickableAncestor(text) | LookupError::NotAddressable(text) => {
                FilterError::NotClickable(text)
            }
        }
    }
}
