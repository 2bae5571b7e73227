//! Application config: Telegram connectivity, reaction settings, health endpoint, logging, retry.

use anyhow::{Context, Result};
use dbot_telegram::TelegramConfig;
use reaction_handlers::ReactionConfig;
use std::env;
use std::fmt;

use crate::cli::ConfigArgs;

pub const DEFAULT_HEALTH_BIND: &str = "0.0.0.0";
pub const DEFAULT_HEALTH_PORT: u16 = 10000;
pub const DEFAULT_LOG_FILE: &str = "logs/dbot-reactor.log";
pub const DEFAULT_STARTUP_RETRY_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub telegram: TelegramConfig,
    pub reaction: ReactionConfig,
    /// HEALTH_BIND
    pub health_bind: String,
    /// PORT
    pub health_port: u16,
    /// LOG_FILE
    pub log_file: String,
    /// STARTUP_RETRY_SECS: wait between failed startup attempts
    pub startup_retry_secs: u64,
}

impl AppConfig {
    /// Loads everything from env, applying CLI overrides. Any invalid value fails here, before the bot starts.
    pub fn load(args: &ConfigArgs) -> Result<Self> {
        let telegram = TelegramConfig::from_env(args.token.clone(), args.chat.clone())
            .context("Load Telegram config (BOT_TOKEN, TARGET_CHAT, TELEGRAM_API_URL)")?;
        let reaction = ReactionConfig::from_env().context(
            "Load reaction config (REACTION_MIN_DELAY_SECS, REACTION_MAX_DELAY_SECS, REACTION_EMOJIS, REACTION_MODE)",
        )?;

        let health_bind =
            env::var("HEALTH_BIND").unwrap_or_else(|_| DEFAULT_HEALTH_BIND.to_string());
        let health_port = match args.port {
            Some(port) => port,
            None => env_parse("PORT")?.unwrap_or(DEFAULT_HEALTH_PORT),
        };
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
        let startup_retry_secs =
            env_parse("STARTUP_RETRY_SECS")?.unwrap_or(DEFAULT_STARTUP_RETRY_SECS);

        Ok(Self {
            telegram,
            reaction,
            health_bind,
            health_port,
            log_file,
            startup_retry_secs,
        })
    }

    pub fn health_address(&self) -> String {
        format!("{}:{}", self.health_bind, self.health_port)
    }
}

impl fmt::Display for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "bot_token:          {}", self.telegram.masked_token())?;
        writeln!(
            f,
            "telegram_api_url:   {}",
            self.telegram.telegram_api_url.as_deref().unwrap_or("(default)")
        )?;
        writeln!(f, "target_chat:        {}", self.telegram.target_chat)?;
        writeln!(
            f,
            "reaction_delay:     {}-{}s",
            self.reaction.min_delay_secs, self.reaction.max_delay_secs
        )?;
        writeln!(f, "reaction_emojis:    {}", self.reaction.emojis.join(" "))?;
        writeln!(f, "reaction_mode:      {:?}", self.reaction.mode)?;
        writeln!(f, "health_address:     {}", self.health_address())?;
        writeln!(f, "log_file:           {}", self.log_file)?;
        write!(f, "startup_retry_secs: {}", self.startup_retry_secs)
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Result<Option<T>> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| anyhow::anyhow!("{} has an invalid value: {}", key, raw)),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dbot_telegram::TargetChat;

    fn sample() -> AppConfig {
        AppConfig {
            telegram: TelegramConfig::new("123456:SECRET".to_string(), TargetChat::Id(-100)),
            reaction: ReactionConfig::default(),
            health_bind: DEFAULT_HEALTH_BIND.to_string(),
            health_port: DEFAULT_HEALTH_PORT,
            log_file: DEFAULT_LOG_FILE.to_string(),
            startup_retry_secs: DEFAULT_STARTUP_RETRY_SECS,
        }
    }

    #[test]
    fn test_health_address() {
        assert_eq!(sample().health_address(), "0.0.0.0:10000");
    }

    #[test]
    fn test_display_masks_token() {
        let printed = sample().to_string();
        assert!(!printed.contains("SECRET"));
        assert!(printed.contains("****CRET"));
        assert!(printed.contains("target_chat:        -100"));
        assert!(printed.contains("reaction_delay:     5-15s"));
    }
}
