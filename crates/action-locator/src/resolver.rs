//! Candidate chain with first-hit-wins orchestration

use crate::errors::LocatorError;
use action_primitives::{AnchorDescriptor, PageDriver};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// The candidate that won a chain probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateHit {
    /// Position of the winner in the chain
    pub position: usize,
    pub anchor: AnchorDescriptor,
}

/// Ordered list of anchors tried first-hit-wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateChain {
    name: String,
    candidates: Vec<AnchorDescriptor>,
}

impl CandidateChain {
    pub fn new(name: impl Into<String>, candidates: Vec<AnchorDescriptor>) -> Self {
        Self {
            name: name.into(),
            candidates,
        }
    }

    /// Chain of buttons addressed by accessible name.
    pub fn buttons<I, S>(name: impl Into<String>, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(
            name,
            labels
                .into_iter()
                .map(|label| AnchorDescriptor::button(label.as_ref()))
                .collect(),
        )
    }

    /// Chain of CSS selectors.
    pub fn selectors<I, S>(name: impl Into<String>, selectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(
            name,
            selectors
                .into_iter()
                .map(|selector| AnchorDescriptor::css(selector.as_ref()))
                .collect(),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn candidates(&self) -> &[AnchorDescriptor] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// First candidate visible right now.
    pub async fn first_present(&self, page: &dyn PageDriver) -> Result<CandidateHit, LocatorError> {
        self.ensure_candidates()?;
        for (position, anchor) in self.candidates.iter().enumerate() {
            match page.is_visible(anchor).await {
                Ok(true) => return Ok(self.hit(position, anchor)),
                Ok(false) => debug!(chain = %self.name, %anchor, "candidate not visible"),
                Err(err) => debug!(chain = %self.name, %anchor, error = %err, "candidate probe failed"),
            }
        }
        Err(self.exhausted())
    }

    /// First candidate that becomes visible within `timeout`, waiting on
    /// each candidate in turn.
    pub async fn first_visible(
        &self,
        page: &dyn PageDriver,
        timeout: Duration,
    ) -> Result<CandidateHit, LocatorError> {
        self.ensure_candidates()?;
        for (position, anchor) in self.candidates.iter().enumerate() {
            match page.wait_visible(anchor, timeout).await {
                Ok(()) => return Ok(self.hit(position, anchor)),
                Err(err) => debug!(chain = %self.name, %anchor, error = %err, "candidate skipped"),
            }
        }
        Err(self.exhausted())
    }

    /// Wait for each candidate in turn and click the first one that both
    /// shows up and accepts the click.
    pub async fn click_first_visible(
        &self,
        page: &dyn PageDriver,
        timeout: Duration,
    ) -> Result<CandidateHit, LocatorError> {
        self.ensure_candidates()?;
        for (position, anchor) in self.candidates.iter().enumerate() {
            if let Err(err) = page.wait_visible(anchor, timeout).await {
                debug!(chain = %self.name, %anchor, error = %err, "candidate skipped");
                continue;
            }
            match page.click(anchor).await {
                Ok(()) => {
                    info!(chain = %self.name, %anchor, "clicked candidate");
                    return Ok(self.hit(position, anchor));
                }
                Err(err) => debug!(chain = %self.name, %anchor, error = %err, "click failed, trying next"),
            }
        }
        Err(self.exhausted())
    }

    /// Click the first candidate visible right now; click errors fall
    /// through to the next candidate.
    pub async fn click_first_present(
        &self,
        page: &dyn PageDriver,
    ) -> Result<CandidateHit, LocatorError> {
        self.ensure_candidates()?;
        for (position, anchor) in self.candidates.iter().enumerate() {
            match page.is_visible(anchor).await {
                Ok(true) => {}
                Ok(false) => continue,
                Err(err) => {
                    debug!(chain = %self.name, %anchor, error = %err, "candidate probe failed");
                    continue;
                }
            }
            match page.click(anchor).await {
                Ok(()) => {
                    info!(chain = %self.name, %anchor, "clicked candidate");
                    return Ok(self.hit(position, anchor));
                }
                Err(err) => debug!(chain = %self.name, %anchor, error = %err, "click failed, trying next"),
            }
        }
        Err(self.exhausted())
    }

    /// Trimmed text of the first visible candidate, if it has any.
    pub async fn first_text(&self, page: &dyn PageDriver) -> Option<String> {
        let hit = self.first_present(page).await.ok()?;
        match page.text_content(&hit.anchor).await {
            Ok(text) => text.map(|t| t.trim().to_string()),
            Err(err) => {
                debug!(chain = %self.name, anchor = %hit.anchor, error = %err, "text read failed");
                None
            }
        }
    }

    fn ensure_candidates(&self) -> Result<(), LocatorError> {
        if self.candidates.is_empty() {
            return Err(LocatorError::EmptyChain(self.name.clone()));
        }
        Ok(())
    }

    fn hit(&self, position: usize, anchor: &AnchorDescriptor) -> CandidateHit {
        debug!(chain = %self.name, position, %anchor, "candidate matched");
        CandidateHit {
            position,
            anchor: anchor.clone(),
        }
    }

    fn exhausted(&self) -> LocatorError {
        LocatorError::Exhausted {
            chain: self.name.clone(),
            tried: self.candidates.len(),
        }
    }
}
