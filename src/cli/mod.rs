pub mod actions;
pub mod app;
pub mod classify;
pub mod commands;
pub mod context;
pub mod dispatch;
pub mod env;
pub mod invoke;
pub mod output;
pub mod resolve;
pub mod runtime;
pub mod status;

pub use app::run;
pub use env::CliArgs;
pub use output::OutputFormat;
