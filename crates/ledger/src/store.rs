use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::errors::LedgerError;
use crate::record::LedgerRecord;

/// Name of the leading column every ledger row carries.
pub const DATE_COLUMN: &str = "date";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Supplies the date stamped on appended rows.
pub type DateSource = Arc<dyn Fn() -> NaiveDate + Send + Sync>;

/// Result of a successful append.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Confirmation {
    pub path: PathBuf,
    pub date: NaiveDate,
    pub label: String,
}

/// Ledger count measured against a target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub count: usize,
    pub target: usize,
    pub remaining: usize,
    pub reached: bool,
}

impl Progress {
    pub fn new(count: usize, target: usize) -> Self {
        Self {
            count,
            target,
            remaining: target.saturating_sub(count),
            reached: count >= target,
        }
    }

    /// "done" once the target is reached, "continue" before.
    pub fn decision(&self) -> &'static str {
        if self.reached {
            "done"
        } else {
            "continue"
        }
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} recorded, {} remaining: {}",
            self.count,
            self.target,
            self.remaining,
            self.decision()
        )
    }
}

/// Append-only CSV store of `R` rows.
pub struct Ledger<R> {
    path: PathBuf,
    today: DateSource,
    _record: PhantomData<fn(R)>,
}

impl<R> Clone for Ledger<R> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            today: self.today.clone(),
            _record: PhantomData,
        }
    }
}

impl<R> fmt::Debug for Ledger<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ledger").field("path", &self.path).finish()
    }
}

impl<R: LedgerRecord> Ledger<R> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            today: Arc::new(|| Local::now().date_naive()),
            _record: PhantomData,
        }
    }

    /// Replace the clock used to stamp rows.
    pub fn with_date_source(mut self, today: DateSource) -> Self {
        self.today = today;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Full header row, date column first.
    pub fn headers() -> Vec<&'static str> {
        std::iter::once(DATE_COLUMN)
            .chain(R::HEADERS.iter().copied())
            .collect()
    }

    /// Number of persisted rows, header excluded. A missing file counts 0.
    pub fn count(&self) -> Result<usize, LedgerError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "ledger not created yet");
            return Ok(0);
        }
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&self.path)
            .map_err(|err| LedgerError::io(&self.path, err))?;
        let mut count = 0;
        for row in reader.records() {
            row.map_err(|err| LedgerError::io(&self.path, err))?;
            count += 1;
        }
        info!(path = %self.path.display(), count, "ledger counted");
        Ok(count)
    }

    pub fn progress(&self, target: usize) -> Result<Progress, LedgerError> {
        Ok(Progress::new(self.count()?, target))
    }

    /// Validate, stamp and append one record.
    ///
    /// The row, and the header when this call creates the file, is encoded
    /// in memory first so a rejected record never touches the store.
    pub fn append(&self, record: &R) -> Result<Confirmation, LedgerError> {
        record.validate()?;
        let date = (self.today)();

        let needs_header = match fs::metadata(&self.path) {
            Ok(meta) => meta.len() == 0,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => true,
            Err(err) => return Err(LedgerError::io(&self.path, err)),
        };

        let mut row = vec![date.format(DATE_FORMAT).to_string()];
        row.extend(record.cells());
        let bytes = encode(needs_header.then(Self::headers), &row)
            .map_err(|err| LedgerError::io(&self.path, err))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| LedgerError::io(&self.path, err))?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|err| LedgerError::io(&self.path, err))?;
        file.write_all(&bytes)
            .and_then(|_| file.sync_data())
            .map_err(|err| {
                warn!(path = %self.path.display(), error = %err, "ledger write failed");
                LedgerError::io(&self.path, err)
            })?;

        let label = record.label();
        info!(path = %self.path.display(), record = %label, header = needs_header, "ledger row appended");
        Ok(Confirmation {
            path: self.path.clone(),
            date,
            label,
        })
    }
}

fn encode(headers: Option<Vec<&str>>, row: &[String]) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    if let Some(headers) = headers {
        writer.write_record(&headers)?;
    }
    writer.write_record(row)?;
    writer
        .into_inner()
        .map_err(|err| csv::Error::from(err.into_error()))
}
