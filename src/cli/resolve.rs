use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use jobpilot_core_types::ElementIndex;
use perceiver_structural::PageSnapshot;
use serde::Serialize;
use tokio::fs;

use crate::cli::context::CliContext;
use crate::cli::output::{emit, OutputFormat};

#[derive(Args, Clone, Debug)]
pub struct ResolveLinkArgs {
    /// Page snapshot file (JSON, or YAML for any other extension)
    #[arg(long, value_name = "FILE")]
    pub snapshot: PathBuf,

    /// Element index as shown to the planner
    #[arg(long)]
    pub index: u32,
}

#[derive(Debug, Serialize)]
struct ResolvedLink {
    index: u32,
    link: String,
}

pub async fn cmd_resolve_link(
    args: ResolveLinkArgs,
    ctx: &CliContext,
    output: OutputFormat,
) -> Result<()> {
    let snapshot = read_snapshot(&args.snapshot).await?;
    let resolver = ctx.config().link_resolver()?;
    let link = resolver
        .resolve_link(ElementIndex(args.index), &snapshot)
        .with_context(|| format!("Failed to resolve element {}", args.index))?;

    let resolved = ResolvedLink {
        index: args.index,
        link,
    };
    emit(output, &resolved, |resolved| resolved.link.clone())
}

pub async fn read_snapshot(path: &Path) -> Result<PageSnapshot> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if is_json {
        serde_json::from_str(&content).context("Failed to parse snapshot JSON")
    } else {
        serde_yaml::from_str(&content).context("Failed to parse snapshot YAML")
    }
}
