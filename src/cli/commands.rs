use clap::Subcommand;

use super::classify::ClassifyArgs;
use super::invoke::InvokeArgs;
use super::resolve::ResolveLinkArgs;
use super::status::StatusArgs;

#[derive(Subcommand, Clone)]
pub enum Commands {
    /// Show a ledger's count against its target
    Status(StatusArgs),

    /// Classify the language of a job description
    Classify(ClassifyArgs),

    /// Resolve the link behind an indexed element of a page snapshot
    ResolveLink(ResolveLinkArgs),

    /// Print the action manifest handed to the planner
    Actions,

    /// Dispatch one action against a scripted page
    Invoke(InvokeArgs),
}
