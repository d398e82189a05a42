//! Application settings loaded from `config.yaml`

use action_flow::{ApplyFlow, ApplyLabels, ApplyTiming, FilterClick, ResumeSet};
use anyhow::{Context, Result};
use jobpilot_action_registry::{RegistrySettings, DEFAULT_MAX_ACTIONS};
use jobpilot_ledger::{ApplicationRecord, JobListingRecord, Ledger};
use perceiver_structural::{LinkResolver, DEFAULT_SITE_ORIGIN};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    /// Origin that root-relative job links are resolved against
    pub site_origin: String,
    pub ledgers: LedgerPaths,
    pub targets: Targets,
    pub resumes: ResumeSet,
    pub timing: TimingConfig,
    pub labels: ApplyLabels,
    /// Cap on registry dispatches per run; `null` disables it
    pub max_actions: Option<usize>,
    pub logging: LoggingConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LedgerPaths {
    pub applications: PathBuf,
    pub listings: PathBuf,
}

/// Ledger sizes at which the planner should stop.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct Targets {
    pub applications: usize,
    pub listings: usize,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct TimingConfig {
    pub entry_visibility_ms: u64,
    pub step_settle_ms: u64,
    pub submit_settle_ms: u64,
    pub filter_settle_ms: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Mirror log output into this file as well as the console
    pub file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site_origin: DEFAULT_SITE_ORIGIN.to_string(),
            ledgers: LedgerPaths::default(),
            targets: Targets::default(),
            resumes: ResumeSet::default(),
            timing: TimingConfig::default(),
            labels: ApplyLabels::default(),
            max_actions: Some(DEFAULT_MAX_ACTIONS),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LedgerPaths {
    fn default() -> Self {
        Self {
            applications: PathBuf::from("applications.csv"),
            listings: PathBuf::from("job_listings.csv"),
        }
    }
}

impl Default for Targets {
    fn default() -> Self {
        Self {
            applications: 5,
            listings: 10,
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        let apply = ApplyTiming::default();
        Self {
            entry_visibility_ms: apply.entry_visibility_ms,
            step_settle_ms: apply.step_settle_ms,
            submit_settle_ms: apply.submit_settle_ms,
            filter_settle_ms: FilterClick::default().settle_ms,
        }
    }
}

impl TimingConfig {
    pub fn apply(&self) -> ApplyTiming {
        ApplyTiming {
            entry_visibility_ms: self.entry_visibility_ms,
            step_settle_ms: self.step_settle_ms,
            submit_settle_ms: self.submit_settle_ms,
        }
    }

    pub fn filter(&self) -> FilterClick {
        FilterClick {
            settle_ms: self.filter_settle_ms,
        }
    }
}

impl Config {
    pub fn applications_ledger(&self) -> Ledger<ApplicationRecord> {
        Ledger::new(&self.ledgers.applications)
    }

    pub fn listings_ledger(&self) -> Ledger<JobListingRecord> {
        Ledger::new(&self.ledgers.listings)
    }

    pub fn link_resolver(&self) -> Result<LinkResolver> {
        LinkResolver::new(&self.site_origin)
            .with_context(|| format!("Invalid site origin '{}'", self.site_origin))
    }

    /// Wire every registry component from these settings.
    pub fn registry_settings(&self) -> Result<RegistrySettings> {
        Ok(RegistrySettings {
            apply_flow: ApplyFlow::new(self.resumes.clone(), self.timing.apply(), &self.labels),
            filter: self.timing.filter(),
            resolver: self.link_resolver()?,
            applications: self.applications_ledger(),
            listings: self.listings_ledger(),
            max_actions: self.max_actions,
        })
    }
}
