//! Candidate chains - ordered element candidates tried first-hit-wins
//!
//! Page controls on job sites carry one of several synonymous labels
//! depending on locale and layout. A chain holds those candidates in
//! priority order and probes them one at a time:
//! - `first_present` checks visibility instantly
//! - `first_visible` gives every candidate a bounded wait
//! - `click_first_visible` additionally clicks, falling through on click errors

pub mod errors;
pub mod labels;
pub mod resolver;

pub use errors::*;
pub use labels::*;
pub use resolver::*;
