//! Link resolution by bounded ancestor walk

use jobpilot_core_types::ElementIndex;
use tracing::{debug, info};
use url::Url;

use crate::errors::ResolutionError;
use crate::model::PageSnapshot;

/// Number of nodes inspected for a link: the element itself plus up to two
/// ancestors. Result cards nest the anchor around the indexed title, and a
/// deeper walk starts picking up unrelated page-level links.
pub const MAX_LINK_LOOKUP_DEPTH: usize = 3;

pub const DEFAULT_SITE_ORIGIN: &str = "https://www.linkedin.com";

const LINK_ATTRIBUTE: &str = "href";

/// Resolves planner element indices to navigable URLs.
#[derive(Clone, Debug)]
pub struct LinkResolver {
    origin: Url,
}

impl LinkResolver {
    pub fn new(origin: &str) -> Result<Self, ResolutionError> {
        let origin = Url::parse(origin.trim())
            .map_err(|_| ResolutionError::InvalidOrigin(origin.to_string()))?;
        if origin.cannot_be_a_base() {
            return Err(ResolutionError::InvalidOrigin(origin.to_string()));
        }
        Ok(Self { origin })
    }

    pub fn origin(&self) -> &Url {
        &self.origin
    }

    /// Resolve the link carried by `index` or one of its close ancestors.
    pub fn resolve_link(
        &self,
        index: ElementIndex,
        snapshot: &PageSnapshot,
    ) -> Result<String, ResolutionError> {
        let element = snapshot
            .element(index)
            .ok_or(ResolutionError::UnknownIndex(index))?;

        for (level, node_id) in snapshot
            .ancestors_or_self(element, MAX_LINK_LOOKUP_DEPTH)
            .into_iter()
            .enumerate()
        {
            let Some(node) = snapshot.node(node_id) else {
                break;
            };
            if let Some(href) = node.attr(LINK_ATTRIBUTE) {
                let link = self.normalize(href);
                info!(%index, level, link = %link, "resolved element link");
                return Ok(link);
            }
            debug!(%index, level, tag = %node.tag, "no link on node, walking up");
        }

        Err(ResolutionError::NoLinkFound {
            index,
            depth: MAX_LINK_LOOKUP_DEPTH,
        })
    }

    /// Make root-relative paths absolute by prefixing the site origin.
    ///
    /// Protocol-relative values (`//host/...`) are not root-relative and are
    /// returned unchanged.
    pub fn normalize(&self, href: &str) -> String {
        let href = href.trim();
        if !href.starts_with('/') || href.starts_with("//") {
            return href.to_string();
        }
        format!("{}{}", self.origin.as_str().trim_end_matches('/'), href)
    }
}
