//! Structural perceiver - read-only page model plus the lookups the action
//! engine performs on it: link resolution by bounded ancestor walk and
//! clickable-ancestor search for filter labels.

pub mod errors;
pub mod judges;
pub mod model;
pub mod resolver;

pub use errors::{LookupError, ResolutionError};
pub use judges::{find_clickable_for_text, is_clickable, MAX_CLICKABLE_LOOKUP_DEPTH};
pub use model::{DomNode, NodeId, PageSnapshot};
pub use resolver::{LinkResolver, DEFAULT_SITE_ORIGIN, MAX_LINK_LOOKUP_DEPTH};
