use std::collections::BTreeMap;

use jobpilot_core_types::ElementIndex;
use serde::{Deserialize, Serialize};

/// Position of a node inside a [`PageSnapshot`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub usize);

/// One DOM node as captured in a snapshot.
///
/// `parent` is a back-reference into the same snapshot; the snapshot owns
/// every node and nothing outside it holds node references.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DomNode {
    pub tag: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<NodeId>,
}

impl DomNode {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_parent(mut self, parent: NodeId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Attribute value, treating blank values as absent.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .get(key)
            .map(|v| v.as_str())
            .filter(|v| !v.trim().is_empty())
    }

    pub fn trimmed_text(&self) -> Option<&str> {
        self.text.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }
}

/// Snapshot of the currently addressable page elements.
///
/// `selector_map` maps the indices the planner sees to nodes in `nodes`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PageSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub nodes: Vec<DomNode>,
    #[serde(default)]
    pub selector_map: BTreeMap<ElementIndex, NodeId>,
}

impl PageSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node and return its id.
    pub fn push(&mut self, node: DomNode) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    /// Expose `node` to the planner under `index`.
    pub fn index(&mut self, index: impl Into<ElementIndex>, node: NodeId) {
        self.selector_map.insert(index.into(), node);
    }

    pub fn node(&self, id: NodeId) -> Option<&DomNode> {
        self.nodes.get(id.0)
    }

    pub fn element(&self, index: ElementIndex) -> Option<NodeId> {
        self.selector_map
            .get(&index)
            .copied()
            .filter(|id| id.0 < self.nodes.len())
    }

    pub fn index_of(&self, node: NodeId) -> Option<ElementIndex> {
        self.selector_map
            .iter()
            .find(|(_, id)| **id == node)
            .map(|(index, _)| *index)
    }

    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.node(id)
            .and_then(|node| node.parent)
            .filter(|parent| parent.0 < self.nodes.len())
    }

    /// Walk `id` and its ancestors, yielding at most `max_levels` nodes.
    pub fn ancestors_or_self(&self, id: NodeId, max_levels: usize) -> Vec<NodeId> {
        let mut chain = Vec::with_capacity(max_levels);
        let mut current = self.node(id).map(|_| id);
        while let Some(node) = current {
            if chain.len() >= max_levels {
                break;
            }
            chain.push(node);
            current = self.parent_of(node);
        }
        chain
    }
}
