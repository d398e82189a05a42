use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::RegistryError;

/// Uniform result handed back to the planner.
///
/// Serialises as `{"extracted": ..., "memorable": ...}` or `{"error": ...}`,
/// never both.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActionOutcome {
    Extracted {
        extracted: Value,
        /// Whether the planner should keep the result in its memory
        memorable: bool,
    },
    Failed {
        error: String,
    },
}

impl ActionOutcome {
    pub fn extracted(value: impl Into<Value>) -> Self {
        ActionOutcome::Extracted {
            extracted: value.into(),
            memorable: false,
        }
    }

    pub fn memorable(value: impl Into<Value>) -> Self {
        ActionOutcome::Extracted {
            extracted: value.into(),
            memorable: true,
        }
    }

    pub fn failed(error: impl ToString) -> Self {
        ActionOutcome::Failed {
            error: error.to_string(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ActionOutcome::Failed { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ActionOutcome::Failed { error } => Some(error),
            ActionOutcome::Extracted { .. } => None,
        }
    }

    pub fn value(&self) -> Option<&Value> {
        match self {
            ActionOutcome::Extracted { extracted, .. } => Some(extracted),
            ActionOutcome::Failed { .. } => None,
        }
    }
}

impl From<RegistryError> for ActionOutcome {
    fn from(err: RegistryError) -> Self {
        ActionOutcome::failed(err)
    }
}
