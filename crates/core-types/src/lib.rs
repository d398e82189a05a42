use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use uuid::Uuid;

/// Shared error type for the jobpilot crates.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("unknown language: {0}")]
    UnknownLanguage(String),
    #[error("unknown outcome: {0}")]
    UnknownOutcome(String),
}

/// Language a job posting is written in.
///
/// Spanish is the first lexicon; English is the fallback language used for
/// ties, empty text and unreadable descriptions.
#[cfg_attr(
    feature = "serde-full",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Language {
    #[cfg_attr(feature = "serde-full", serde(alias = "es", alias = "español", alias = "espanol"))]
    Spanish,
    #[cfg_attr(feature = "serde-full", serde(alias = "en", alias = "inglés", alias = "ingles"))]
    English,
}

impl Language {
    /// Language returned whenever the classifier cannot prefer Spanish.
    pub const DEFAULT: Language = Language::English;

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Spanish => "spanish",
            Language::English => "english",
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "spanish" | "es" | "español" | "espanol" => Ok(Language::Spanish),
            "english" | "en" | "inglés" | "ingles" => Ok(Language::English),
            other => Err(CoreError::UnknownLanguage(other.to_string())),
        }
    }
}

/// Final state of one apply attempt as recorded in the ledger.
#[cfg_attr(
    feature = "serde-full",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Outcome {
    #[cfg_attr(feature = "serde-full", serde(alias = "exitosa", alias = "success"))]
    Succeeded,
    #[cfg_attr(feature = "serde-full", serde(alias = "fallida", alias = "failure"))]
    Failed,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Succeeded => "succeeded",
            Outcome::Failed => "failed",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Outcome {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "succeeded" | "success" | "exitosa" => Ok(Outcome::Succeeded),
            "failed" | "failure" | "fallida" => Ok(Outcome::Failed),
            other => Err(CoreError::UnknownOutcome(other.to_string())),
        }
    }
}

/// Index of an element in the planner-visible selector map.
#[cfg_attr(
    feature = "serde-full",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ElementIndex(pub u32);

impl fmt::Display for ElementIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ElementIndex {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// Correlation id attached to one registry dispatch.
#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ActionId(pub String);

impl ActionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for ActionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
