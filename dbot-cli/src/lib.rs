//! # dbot-cli
//!
//! The `dbot-reactor` binary: argument parsing, config loading, health endpoint and task supervision.

pub mod cli;
pub mod config;
pub mod health;
pub mod supervisor;

pub use cli::{Cli, Commands, ConfigArgs};
pub use config::AppConfig;
