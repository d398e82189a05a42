//! Core types for the page flows

use action_locator::{to_owned_labels, ADVANCE_LABELS, ENTRY_LABELS, SUBMIT_LABELS};
use action_primitives::FILE_INPUT_SELECTOR;
use jobpilot_core_types::Language;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Résumé file per posting language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResumeSet {
    pub spanish: PathBuf,
    pub english: PathBuf,
}

impl Default for ResumeSet {
    fn default() -> Self {
        Self {
            spanish: PathBuf::from("resume_es.pdf"),
            english: PathBuf::from("resume_en.pdf"),
        }
    }
}

impl ResumeSet {
    pub fn for_language(&self, language: Language) -> &Path {
        match language {
            Language::Spanish => &self.spanish,
            Language::English => &self.english,
        }
    }

    /// Identifier recorded in the ledger for the résumé sent in `language`.
    pub fn variant_name(&self, language: Language) -> String {
        let path = self.for_language(language);
        path.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string())
    }

    /// Résumé files that do not exist on disk.
    pub fn missing(&self) -> Vec<&Path> {
        [self.spanish.as_path(), self.english.as_path()]
            .into_iter()
            .filter(|path| !path.is_file())
            .collect()
    }
}

/// Visibility waits and settle pauses of the apply flow (milliseconds).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApplyTiming {
    /// Bounded wait per entry candidate
    pub entry_visibility_ms: u64,
    /// Pause after entering the wizard, uploading and advancing
    pub step_settle_ms: u64,
    /// Pause after submitting
    pub submit_settle_ms: u64,
}

impl Default for ApplyTiming {
    fn default() -> Self {
        Self {
            entry_visibility_ms: 3000,
            step_settle_ms: 2000,
            submit_settle_ms: 3000,
        }
    }
}

impl ApplyTiming {
    pub fn entry_visibility(&self) -> Duration {
        Duration::from_millis(self.entry_visibility_ms)
    }

    pub fn step_settle(&self) -> Duration {
        Duration::from_millis(self.step_settle_ms)
    }

    pub fn submit_settle(&self) -> Duration {
        Duration::from_millis(self.submit_settle_ms)
    }
}

/// Candidate labels of the wizard controls, highest priority first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApplyLabels {
    pub entry: Vec<String>,
    pub advance: Vec<String>,
    pub submit: Vec<String>,
    pub file_input: String,
}

impl Default for ApplyLabels {
    fn default() -> Self {
        Self {
            entry: to_owned_labels(ENTRY_LABELS),
            advance: to_owned_labels(ADVANCE_LABELS),
            submit: to_owned_labels(SUBMIT_LABELS),
            file_input: FILE_INPUT_SELECTOR.to_string(),
        }
    }
}

/// Progress of one apply invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ApplyAttempt {
    /// Zero-based step currently being worked
    pub target_step: usize,
    /// Step iterations started so far
    pub iterations: usize,
    pub file_uploaded: bool,
    /// Whether the current step clicked an advance control
    pub advanced: bool,
    pub submitted: bool,
}

/// Successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplyConfirmation {
    pub language: Language,
    pub resume_variant: String,
    pub resume_path: PathBuf,
    /// Label of the submit control that was clicked
    pub submitted_with: String,
    pub steps: usize,
    pub file_uploaded: bool,
}

impl fmt::Display for ApplyConfirmation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Application submitted with {} ({} step(s))",
            self.resume_variant, self.steps
        )
    }
}

/// Title, company and address of the posting on screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobInfo {
    pub title: String,
    pub company: String,
    pub link: String,
}

impl fmt::Display for JobInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Job: {} | Company: {} | URL: {}",
            self.title, self.company, self.link
        )
    }
}
