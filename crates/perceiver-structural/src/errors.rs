use jobpilot_core_types::ElementIndex;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    #[error("no element with index {0} in the current page snapshot")]
    UnknownIndex(ElementIndex),
    #[error("element {index} has no link within {depth} levels")]
    NoLinkFound { index: ElementIndex, depth: usize },
    #[error("invalid site origin '{0}'")]
    InvalidOrigin(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("no element with text '{0}'")]
    TextNotFound(String),
    #[error("no clickable ancestor for text '{0}'")]
    NoClickableAncestor(String),
    #[error("clickable element for text '{0}' is not addressable by index")]
    NotAddressable(String),
}
