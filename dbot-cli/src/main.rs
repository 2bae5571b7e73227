//! dbot-reactor: watch one Telegram chat and answer new posts with a random emoji after a random delay.

use anyhow::Result;
use clap::Parser;
use dbot_cli::{supervisor, AppConfig, Cli, Commands};
use dbot_core::init_tracing;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { args } => {
            let config = AppConfig::load(&args)?;
            init_tracing(&config.log_file)?;
            info!(
                target_chat = %config.telegram.target_chat,
                health_address = %config.health_address(),
                "dbot-reactor starting"
            );
            supervisor::run(config).await
        }
        Commands::CheckConfig { args } => {
            let config = AppConfig::load(&args)?;
            println!("{}", config);
            println!("Configuration OK");
            Ok(())
        }
    }
}
