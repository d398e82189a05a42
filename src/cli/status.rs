use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use jobpilot_ledger::Progress;
use serde::Serialize;

use crate::cli::context::CliContext;
use crate::cli::output::{emit, OutputFormat};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum LedgerKind {
    Applications,
    Listings,
}

#[derive(Args, Clone, Debug)]
pub struct StatusArgs {
    /// Which ledger to measure
    #[arg(long, value_enum, default_value = "applications")]
    pub ledger: LedgerKind,

    /// Target to measure against (defaults to the configured one)
    #[arg(long)]
    pub target: Option<usize>,
}

#[derive(Debug, Serialize)]
struct StatusReport {
    ledger: LedgerKind,
    path: PathBuf,
    #[serde(flatten)]
    progress: Progress,
    decision: &'static str,
}

pub async fn cmd_status(args: StatusArgs, ctx: &CliContext, output: OutputFormat) -> Result<()> {
    let config = ctx.config();
    let (path, count, default_target) = match args.ledger {
        LedgerKind::Applications => {
            let ledger = config.applications_ledger();
            (ledger.path().to_path_buf(), ledger.count(), config.targets.applications)
        }
        LedgerKind::Listings => {
            let ledger = config.listings_ledger();
            (ledger.path().to_path_buf(), ledger.count(), config.targets.listings)
        }
    };
    let count = count.with_context(|| format!("Failed to count {}", path.display()))?;
    let progress = Progress::new(count, args.target.unwrap_or(default_target));

    let report = StatusReport {
        ledger: args.ledger,
        path,
        progress,
        decision: progress.decision(),
    };
    emit(output, &report, |report| {
        format!("{}: {}", report.path.display(), report.progress)
    })
}
