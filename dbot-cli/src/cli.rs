//! CLI parser.

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "dbot-reactor")]
#[command(about = "Telegram auto-reactor: answers new posts with a random emoji", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Overrides for values otherwise taken from the environment.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Bot token (overrides BOT_TOKEN).
    #[arg(short, long)]
    pub token: Option<String>,
    /// Chat to monitor, @username or numeric id (overrides TARGET_CHAT).
    #[arg(short, long)]
    pub chat: Option<String>,
    /// Health endpoint port (overrides PORT).
    #[arg(short, long)]
    pub port: Option<u16>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the reactor and the health endpoint until Ctrl-C / SIGTERM.
    Run {
        #[command(flatten)]
        args: ConfigArgs,
    },
    /// Load and validate configuration, print it (token masked) and exit.
    CheckConfig {
        #[command(flatten)]
        args: ConfigArgs,
    },
}
