//! Apply-flow state machine
//!
//! Drives a job site's application wizard: open it through one of the entry
//! buttons, then work at most [`MAX_APPLY_STEPS`] pages, attaching the
//! résumé once, advancing, and submitting as soon as a submit control shows.

use action_locator::CandidateChain;
use action_primitives::{AnchorDescriptor, PageDriver};
use jobpilot_core_types::Language;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::errors::ApplyError;
use crate::types::{ApplyAttempt, ApplyConfirmation, ApplyLabels, ApplyTiming, ResumeSet};

/// Upper bound on wizard pages worked per attempt.
pub const MAX_APPLY_STEPS: usize = 5;

/// Apply flow configured with résumés, timings and candidate labels.
#[derive(Debug, Clone)]
pub struct ApplyFlow {
    resumes: ResumeSet,
    timing: ApplyTiming,
    entry: CandidateChain,
    advance: CandidateChain,
    submit: CandidateChain,
    file_input: AnchorDescriptor,
}

impl ApplyFlow {
    pub fn new(resumes: ResumeSet, timing: ApplyTiming, labels: &ApplyLabels) -> Self {
        Self {
            resumes,
            timing,
            entry: CandidateChain::buttons("entry", &labels.entry),
            advance: CandidateChain::buttons("advance", &labels.advance),
            submit: CandidateChain::buttons("submit", &labels.submit),
            file_input: AnchorDescriptor::css(labels.file_input.clone()),
        }
    }

    pub fn resumes(&self) -> &ResumeSet {
        &self.resumes
    }

    /// Run one application attempt for a posting written in `language`.
    pub async fn apply(
        &self,
        language: Language,
        page: &dyn PageDriver,
    ) -> Result<ApplyConfirmation, ApplyError> {
        let resume = self.resumes.for_language(language);
        info!(%language, resume = %resume.display(), "starting application");

        self.entry
            .click_first_visible(page, self.timing.entry_visibility())
            .await
            .map_err(|err| {
                warn!(error = %err, "no application entry point");
                ApplyError::NoEntryPoint {
                    tried: self.entry.len(),
                }
            })?;
        page.settle(self.timing.step_settle()).await;

        let mut attempt = ApplyAttempt::default();
        for step in 0..MAX_APPLY_STEPS {
            attempt.target_step = step;
            attempt.iterations += 1;
            attempt.advanced = false;

            if !attempt.file_uploaded {
                self.try_upload(page, resume, step, &mut attempt).await;
            }

            if let Ok(hit) = self.advance.click_first_present(page).await {
                debug!(step, anchor = %hit.anchor, "advanced wizard");
                attempt.advanced = true;
                page.settle(self.timing.step_settle()).await;
            }

            if let Ok(hit) = self.submit.click_first_present(page).await {
                attempt.submitted = true;
                page.settle(self.timing.submit_settle()).await;
                let submitted_with = match &hit.anchor {
                    AnchorDescriptor::Role { name, .. } => name.clone(),
                    other => other.to_string(),
                };
                info!(
                    step,
                    submitted_with = %submitted_with,
                    resume = %resume.display(),
                    "application submitted"
                );
                return Ok(ApplyConfirmation {
                    language,
                    resume_variant: self.resumes.variant_name(language),
                    resume_path: resume.to_path_buf(),
                    submitted_with,
                    steps: attempt.iterations,
                    file_uploaded: attempt.file_uploaded,
                });
            }

            if !attempt.advanced {
                warn!(step, "no advance or submit control, stopping");
                return Err(ApplyError::IncompleteFlow {
                    steps: attempt.iterations,
                    stalled: true,
                });
            }
        }

        warn!(steps = attempt.iterations, "step budget exhausted before submit");
        Err(ApplyError::IncompleteFlow {
            steps: attempt.iterations,
            stalled: false,
        })
    }

    async fn try_upload(
        &self,
        page: &dyn PageDriver,
        resume: &Path,
        step: usize,
        attempt: &mut ApplyAttempt,
    ) {
        match page.is_visible(&self.file_input).await {
            Ok(true) => {}
            Ok(false) => return,
            Err(err) => {
                debug!(step, error = %err, "file input probe failed");
                return;
            }
        }
        match page.set_input_files(&self.file_input, resume).await {
            Ok(()) => {
                info!(step, resume = %resume.display(), "resume attached");
                attempt.file_uploaded = true;
                page.settle(self.timing.step_settle()).await;
            }
            Err(err) => warn!(step, error = %err, "resume upload failed"),
        }
    }
}

impl Default for ApplyFlow {
    fn default() -> Self {
        Self::new(
            ResumeSet::default(),
            ApplyTiming::default(),
            &ApplyLabels::default(),
        )
    }
}
