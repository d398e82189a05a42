//! Flow layer
//!
//! Multi-step page flows built on the page driver seam: the bounded apply
//! wizard, job-info extraction, the description reader feeding the language
//! classifier, and text-addressed filter clicks.

pub mod apply;
pub mod errors;
pub mod filter;
pub mod reader;
pub mod types;

pub use apply::{ApplyFlow, MAX_APPLY_STEPS};
pub use errors::{ApplyError, FilterError};
pub use filter::{apply_filter, FilterClick};
pub use reader::{detect_job_language, extract_job_info, read_description};
pub use types::{ApplyAttempt, ApplyConfirmation, ApplyLabels, ApplyTiming, JobInfo, ResumeSet};
