//! Text-addressed filter clicks

use action_primitives::PageDriver;
use jobpilot_core_types::ElementIndex;
use perceiver_structural::find_clickable_for_text;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::info;

use crate::errors::FilterError;

/// Settings of the filter click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterClick {
    /// Pause after the click so the result list can refresh
    pub settle_ms: u64,
}

impl Default for FilterClick {
    fn default() -> Self {
        Self { settle_ms: 2000 }
    }
}

/// Click the control whose label is exactly `text`.
///
/// Returns the index that was clicked.
pub async fn apply_filter(
    page: &dyn PageDriver,
    text: &str,
    settings: FilterClick,
) -> Result<ElementIndex, FilterError> {
    let snapshot = page.snapshot().await?;
    let index = find_clickable_for_text(&snapshot, text)?;
    page.click_index(index).await?;
    page.settle(Duration::from_millis(settings.settle_ms)).await;
    info!(text, %index, "filter applied");
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use action_primitives::{PageScript, ScreenScript, ScriptedPage};
    use perceiver_structural::{DomNode, PageSnapshot};

    fn search_page() -> ScriptedPage {
        let mut snapshot = PageSnapshot::new();
        let pill = snapshot.push(DomNode::new("button").with_attr("aria-pressed", "false"));
        snapshot.push(DomNode::new("span").with_text("Solicitud sencilla").with_parent(pill));
        snapshot.push(DomNode::new("h2").with_text("Resultados"));
        snapshot.index(12, pill);
        let script = PageScript::new("search")
            .screen(
                "search",
                ScreenScript::new()
                    .with_snapshot(snapshot)
                    .with_index_goto(12, "filtered"),
            )
            .screen("filtered", ScreenScript::new());
        ScriptedPage::new(script).unwrap()
    }

    #[tokio::test]
    async fn clicks_enclosing_control() {
        let page = search_page();
        let index = apply_filter(&page, "Solicitud sencilla", FilterClick::default())
            .await
            .unwrap();
        assert_eq!(index, ElementIndex(12));
        assert_eq!(page.current_screen(), "filtered");
    }

    #[tokio::test]
    async fn unknown_text_is_not_found() {
        let page = search_page();
        let err = apply_filter(&page, "Remoto", FilterClick::default())
            .await
            .unwrap_err();
        assert_eq!(err, FilterError::NotFound("Remoto".into()));
    }

    #[tokio::test]
    async fn plain_heading_is_not_clickable() {
        let page = search_page();
        let err = apply_filter(&page, "Resultados", FilterClick::default())
            .await
            .unwrap_err();
        assert_eq!(err, FilterError::NotClickable("Resultados".into()));
    }
}
