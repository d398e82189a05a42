use anyhow::Result;

use jobpilot_action_registry::ActionKind;

use crate::cli::context::CliContext;

/// The manifest is the planner contract, so it is JSON in every output mode.
pub async fn cmd_actions(ctx: &CliContext) -> Result<()> {
    let manifests: Vec<_> = ActionKind::ALL.iter().map(ActionKind::manifest).collect();
    println!("{}", serde_json::to_string_pretty(&manifests)?);
    tracing::debug!(
        count = manifests.len(),
        budget = ?ctx.config().max_actions,
        "printed action manifest"
    );
    Ok(())
}
