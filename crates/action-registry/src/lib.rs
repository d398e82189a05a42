//! Action registry - the planner-facing surface of the action engine.
//!
//! Every operation the external planner may call is a named action with a
//! one-line description and a JSON schema for its parameters. Dispatch
//! validates parameters, routes to the owning component and folds the
//! result into a uniform [`ActionOutcome`].

pub mod errors;
pub mod human;
pub mod manifest;
pub mod outcome;
pub mod registry;

pub use errors::RegistryError;
pub use human::{read_code, CodePrompt, ConsoleCodePrompt, HumanInputError, LineCodePrompt};
pub use manifest::{ActionKind, ActionManifest, ApplyParams, FilterParams, NoParams, ResolveLinkParams};
pub use outcome::ActionOutcome;
pub use registry::{ActionRegistry, RegistrySettings, DEFAULT_MAX_ACTIONS};
