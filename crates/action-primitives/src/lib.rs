//! Action primitives - the page seam of the action engine
//!
//! This crate defines how the engine talks to a page:
//! - `PageDriver`, the async trait every browser backend implements
//! - `AnchorDescriptor`, the ways an element can be addressed
//! - bounded visibility polling shared by drivers without native waits
//! - `ScriptedPage`, a deterministic in-memory driver for offline rehearsal

pub mod driver;
pub mod errors;
pub mod scripted;
pub mod types;
mod waiting;

pub use driver::*;
pub use errors::*;
pub use scripted::*;
pub use types::*;
pub use waiting::*;
