use jobpilot_core_types::{Language, Outcome};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::errors::LedgerError;

/// Value stored when a listing does not mention compensation.
pub const UNSPECIFIED_COMPENSATION: &str = "unspecified";

/// A row type persisted by a [`crate::Ledger`].
pub trait LedgerRecord {
    /// Column names after the leading date column, in row order.
    const HEADERS: &'static [&'static str];

    /// Reject records that must not reach the store.
    fn validate(&self) -> Result<(), LedgerError>;

    /// Cell values in `HEADERS` order.
    fn cells(&self) -> Vec<String>;

    /// Short human label used in confirmations.
    fn label(&self) -> String;
}

/// One completed application attempt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ApplicationRecord {
    /// Exact title of the position.
    pub job_title: String,
    /// Name of the hiring company.
    pub company: String,
    /// Language the posting was written in: "spanish" or "english".
    pub detected_language: Language,
    /// Name of the résumé file that was sent.
    pub resume_variant: String,
    /// "succeeded" or "failed".
    pub outcome: Outcome,
    /// Direct link to the posting.
    pub link: String,
    /// Free-form observations about the attempt; may be empty.
    pub notes: String,
}

impl LedgerRecord for ApplicationRecord {
    const HEADERS: &'static [&'static str] = &[
        "job_title",
        "company",
        "detected_language",
        "resume_variant",
        "outcome",
        "link",
        "notes",
    ];

    fn validate(&self) -> Result<(), LedgerError> {
        require("job_title", &self.job_title)?;
        require("company", &self.company)?;
        require("resume_variant", &self.resume_variant)?;
        validate_link(&self.link)
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.job_title.trim().to_string(),
            self.company.trim().to_string(),
            self.detected_language.to_string(),
            self.resume_variant.trim().to_string(),
            self.outcome.to_string(),
            self.link.trim().to_string(),
            self.notes.trim().to_string(),
        ]
    }

    fn label(&self) -> String {
        format!("{} - {}", self.job_title.trim(), self.company.trim())
    }
}

/// One job posting found during discovery.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct JobListingRecord {
    /// Exact title of the position.
    pub title: String,
    /// Name of the hiring company.
    pub company: String,
    /// Concise summary of the requirements.
    pub description: String,
    /// Salary and benefits if mentioned; left empty otherwise.
    #[serde(default)]
    pub compensation: Option<String>,
    /// Full direct link to the posting.
    pub link: String,
}

impl JobListingRecord {
    /// Compensation as stored, with the sentinel for missing values.
    pub fn compensation_or_sentinel(&self) -> &str {
        self.compensation
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(UNSPECIFIED_COMPENSATION)
    }
}

impl LedgerRecord for JobListingRecord {
    const HEADERS: &'static [&'static str] =
        &["title", "company", "description", "compensation", "link"];

    fn validate(&self) -> Result<(), LedgerError> {
        require("title", &self.title)?;
        require("company", &self.company)?;
        require("description", &self.description)?;
        validate_link(&self.link)
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.title.trim().to_string(),
            self.company.trim().to_string(),
            self.description.trim().to_string(),
            self.compensation_or_sentinel().to_string(),
            self.link.trim().to_string(),
        ]
    }

    fn label(&self) -> String {
        format!("{} - {}", self.title.trim(), self.company.trim())
    }
}

fn require(field: &'static str, value: &str) -> Result<(), LedgerError> {
    if value.trim().is_empty() {
        return Err(LedgerError::invalid(field, "must not be blank"));
    }
    Ok(())
}

/// Links must be absolute URLs or paths relative to the site root.
fn validate_link(link: &str) -> Result<(), LedgerError> {
    let link = link.trim();
    require("link", link)?;
    if link.starts_with('/') && !link.starts_with("//") {
        return Ok(());
    }
    match Url::parse(link) {
        Ok(url) if !url.cannot_be_a_base() => Ok(()),
        Ok(_) => Err(LedgerError::invalid("link", format!("'{}' is not a page URL", link))),
        Err(err) => Err(LedgerError::invalid("link", format!("'{}': {}", link, err))),
    }
}
