//! The page driver trait

use async_trait::async_trait;
use jobpilot_core_types::ElementIndex;
use perceiver_structural::PageSnapshot;
use std::path::Path;
use std::time::Duration;

use crate::{
    errors::ActionError,
    types::AnchorDescriptor,
    waiting::{poll_until_visible, WaitConfig},
};

/// Page driver trait
///
/// Everything the action engine does to a page goes through this seam.
/// Implementations own the browser connection; callers own sequencing.
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// Instant visibility check
    async fn is_visible(&self, anchor: &AnchorDescriptor) -> Result<bool, ActionError>;

    /// Wait until `anchor` is visible, failing with `WaitTimeout` after `timeout`
    async fn wait_visible(
        &self,
        anchor: &AnchorDescriptor,
        timeout: Duration,
    ) -> Result<(), ActionError> {
        poll_until_visible(self, anchor, timeout, WaitConfig::default()).await
    }

    /// Click the element addressed by `anchor`
    async fn click(&self, anchor: &AnchorDescriptor) -> Result<(), ActionError>;

    /// Click the element the planner knows as `index`
    async fn click_index(&self, index: ElementIndex) -> Result<(), ActionError>;

    /// Attach a local file to a file input
    async fn set_input_files(
        &self,
        anchor: &AnchorDescriptor,
        path: &Path,
    ) -> Result<(), ActionError>;

    /// Fixed post-action pause letting the page react
    async fn settle(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }

    /// Text content of the first element matching `anchor`, if any
    async fn text_content(&self, anchor: &AnchorDescriptor) -> Result<Option<String>, ActionError>;

    async fn current_url(&self) -> Result<String, ActionError>;

    /// Snapshot of the planner-addressable elements
    async fn snapshot(&self) -> Result<PageSnapshot, ActionError>;
}
