//! Core data types for page interaction

use serde::{Deserialize, Serialize};
use std::fmt;

/// Selector of the résumé file input on application forms.
pub const FILE_INPUT_SELECTOR: &str = "input[type=\"file\"]";

/// Anchor descriptor for element targeting
///
/// Represents different strategies for locating elements:
/// - CSS selector (a comma-separated selector group matches any member)
/// - ARIA role and accessible name, the name matched as a case-insensitive
///   substring the way browser role locators do
/// - Text content (exact or partial match)
///
/// In YAML the strategy is the node tag: `!css ".jobs-description"` or
/// `!role { role: button, name: Next }`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorDescriptor {
    /// CSS selector
    Css(String),

    /// ARIA role and accessible name
    Role { role: String, name: String },

    /// Text content (exact or partial match)
    Text { content: String, exact: bool },
}

impl AnchorDescriptor {
    pub fn css(selector: impl Into<String>) -> Self {
        AnchorDescriptor::Css(selector.into())
    }

    /// A button addressed by its accessible name.
    pub fn button(name: impl Into<String>) -> Self {
        AnchorDescriptor::Role {
            role: "button".to_string(),
            name: name.into(),
        }
    }

    pub fn text(content: impl Into<String>, exact: bool) -> Self {
        AnchorDescriptor::Text {
            content: content.into(),
            exact,
        }
    }

    /// Whether `name` satisfies this anchor's accessible-name rule.
    pub fn name_matches(wanted: &str, name: &str) -> bool {
        name.to_lowercase().contains(&wanted.to_lowercase())
    }
}

impl fmt::Display for AnchorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnchorDescriptor::Css(s) => write!(f, "css:{}", s),
            AnchorDescriptor::Role { role, name } => write!(f, "role:{}[name='{}']", role, name),
            AnchorDescriptor::Text { content, exact } => {
                if *exact {
                    write!(f, "text:exact:'{}'", content)
                } else {
                    write!(f, "text:partial:'{}'", content)
                }
            }
        }
    }
}
