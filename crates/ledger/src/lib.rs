//! Append-only progress ledgers.
//!
//! Each ledger is a CSV file owned by exactly one [`Ledger`]. Rows are
//! stamped with the local date at append time and are never rewritten;
//! the persisted row count is the only progress measure.

mod errors;
mod record;
mod store;

pub use errors::LedgerError;
pub use record::{
    ApplicationRecord, JobListingRecord, LedgerRecord, UNSPECIFIED_COMPENSATION,
};
pub use store::{Confirmation, DateSource, Ledger, Progress, DATE_COLUMN};
