//! jobpilot library
//!
//! Exposes the CLI entry point and settings for integration testing

pub mod cli;
pub mod config;

pub use config::Config;
