//! Clickability judgement for text-addressed controls

use jobpilot_core_types::ElementIndex;
use tracing::debug;

use crate::errors::LookupError;
use crate::model::{DomNode, NodeId, PageSnapshot};

/// Levels walked from a text node looking for something clickable.
pub const MAX_CLICKABLE_LOOKUP_DEPTH: usize = 5;

const CLICKABLE_TAGS: &[&str] = &["button", "label"];

/// Whether a node accepts clicks for filter-style controls.
pub fn is_clickable(node: &DomNode) -> bool {
    let tag = node.tag.to_ascii_lowercase();
    if CLICKABLE_TAGS.contains(&tag.as_str()) {
        return true;
    }
    if node
        .attr("role")
        .map(|role| role.eq_ignore_ascii_case("button"))
        .unwrap_or(false)
    {
        return true;
    }
    node.attr("class")
        .map(|class| class.to_ascii_lowercase().contains("filter"))
        .unwrap_or(false)
}

/// Find the control labelled exactly `text` and return the index to click.
///
/// The first node whose trimmed text equals `text` is the starting point;
/// the node itself or the nearest clickable ancestor is returned.
pub fn find_clickable_for_text(
    snapshot: &PageSnapshot,
    text: &str,
) -> Result<ElementIndex, LookupError> {
    let wanted = text.trim();
    let start = snapshot
        .nodes
        .iter()
        .position(|node| node.trimmed_text() == Some(wanted))
        .map(NodeId)
        .ok_or_else(|| LookupError::TextNotFound(wanted.to_string()))?;

    let clickable = snapshot
        .ancestors_or_self(start, MAX_CLICKABLE_LOOKUP_DEPTH)
        .into_iter()
        .find(|id| snapshot.node(*id).map(is_clickable).unwrap_or(false))
        .ok_or_else(|| LookupError::NoClickableAncestor(wanted.to_string()))?;

    debug!(text = wanted, node = clickable.0, "clickable control located");
    snapshot
        .index_of(clickable)
        .ok_or_else(|| LookupError::NotAddressable(wanted.to_string()))
}
