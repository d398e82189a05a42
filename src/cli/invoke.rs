use std::path::PathBuf;
use std::sync::Arc;

use action_primitives::ScriptedPage;
use anyhow::{anyhow, Context, Result};
use clap::Args;
use jobpilot_action_registry::ActionRegistry;
use serde_json::Value;
use tracing::info;

use crate::cli::context::CliContext;

#[derive(Args, Clone, Debug)]
pub struct InvokeArgs {
    /// Page script describing the screens the action runs against
    #[arg(long, value_name = "FILE")]
    pub script: PathBuf,

    /// Action name, as listed by `actions`
    pub action: String,

    /// Action parameters as a JSON object
    #[arg(long, value_name = "JSON")]
    pub params: Option<String>,
}

/// Prints the `{"extracted": ...}` / `{"error": ...}` outcome; an error
/// outcome also fails the command.
pub async fn cmd_invoke(args: InvokeArgs, ctx: &CliContext) -> Result<()> {
    let params: Value = match args.params.as_deref() {
        Some(raw) => serde_json::from_str(raw).context("Failed to parse --params as JSON")?,
        None => Value::Null,
    };

    let page = ScriptedPage::from_path(&args.script)
        .with_context(|| format!("Failed to load page script {}", args.script.display()))?;
    let page = Arc::new(page);
    let registry = ActionRegistry::new(page.clone(), ctx.config().registry_settings()?);

    let outcome = registry.dispatch(&args.action, params).await;
    println!("{}", serde_json::to_string(&outcome)?);
    info!(
        action = %args.action,
        screen = %page.current_screen(),
        events = page.events().len(),
        "invoke finished"
    );

    match outcome.error() {
        Some(error) => Err(anyhow!("action '{}' failed: {}", args.action, error)),
        None => Ok(()),
    }
}
