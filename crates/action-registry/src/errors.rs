use action_flow::{ApplyError, FilterError};
use action_primitives::ActionError;
use jobpilot_ledger::LedgerError;
use perceiver_structural::ResolutionError;
use thiserror::Error;

use crate::human::HumanInputError;

/// Everything a dispatch can fail with; rendered into `{"error": ...}`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("unknown action '{0}'")]
    UnknownAction(String),

    #[error("invalid parameters for '{action}': {message}")]
    InvalidParams { action: String, message: String },

    #[error("action budget exhausted after {limit} actions")]
    BudgetExhausted { limit: usize },

    #[error("failed to encode result: {0}")]
    Encoding(String),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Apply(#[from] ApplyError),

    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error(transparent)]
    Page(#[from] ActionError),

    #[error(transparent)]
    HumanInput(#[from] HumanInputError),
}
