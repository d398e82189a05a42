use super::actions::cmd_actions;
use super::classify::cmd_classify;
use super::env::CliArgs;
use super::invoke::cmd_invoke;
use super::resolve::cmd_resolve_link;
use super::status::cmd_status;
use crate::cli::commands::Commands;
use crate::cli::context::CliContext;
use anyhow::Result;

pub async fn dispatch(cli: &CliArgs, ctx: &CliContext) -> Result<()> {
    match cli.command.clone() {
        Commands::Status(args) => cmd_status(args, ctx, cli.output).await,
        Commands::Classify(args) => cmd_classify(args, cli.output).await,
        Commands::ResolveLink(args) => cmd_resolve_link(args, ctx, cli.output).await,
        Commands::Actions => cmd_actions(ctx).await,
        Commands::Invoke(args) => cmd_invoke(args, ctx).await,
    }
}
