//! Telegram connectivity config: token, optional API URL, target chat.
//! Loaded from env: BOT_TOKEN, TELEGRAM_API_URL (or TELOXIDE_API_URL), TARGET_CHAT.

use dbot_core::{DbotError, Result};
use std::env;
use std::fmt;

/// Chat the bot monitors: a public `@username` or a numeric chat id (e.g. -1001234567890).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetChat {
    Id(i64),
    Username(String),
}

impl TargetChat {
    /// Parses a numeric id, or a username with or without leading `@`.
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(DbotError::Config("TARGET_CHAT is empty".to_string()));
        }
        if let Ok(id) = raw.parse::<i64>() {
            return Ok(TargetChat::Id(id));
        }
        let name = raw.trim_start_matches('@');
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(DbotError::Config(format!(
                "TARGET_CHAT is neither a chat id nor a username: {}",
                raw
            )));
        }
        Ok(TargetChat::Username(format!("@{}", name)))
    }
}

impl fmt::Display for TargetChat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetChat::Id(id) => write!(f, "{}", id),
            TargetChat::Username(name) => write!(f, "{}", name),
        }
    }
}

/// Telegram connectivity config.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub telegram_api_url: Option<String>,
    pub target_chat: TargetChat,
}

impl TelegramConfig {
    /// Loads from env. `token` overrides BOT_TOKEN and `chat` overrides TARGET_CHAT when given.
    pub fn from_env(token: Option<String>, chat: Option<String>) -> Result<Self> {
        let bot_token = token
            .or_else(|| env::var("BOT_TOKEN").ok())
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| DbotError::Config("BOT_TOKEN not set".to_string()))?;
        let target_chat = chat
            .or_else(|| env::var("TARGET_CHAT").ok())
            .ok_or_else(|| DbotError::Config("TARGET_CHAT not set".to_string()))?;
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        let config = Self {
            bot_token,
            telegram_api_url,
            target_chat: TargetChat::parse(&target_chat)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Builds config with the given token and target; no custom API URL.
    pub fn new(bot_token: String, target_chat: TargetChat) -> Self {
        Self {
            bot_token,
            telegram_api_url: None,
            target_chat,
        }
    }

    /// Rejects a telegram_api_url that is set but not a valid URL.
    pub fn validate(&self) -> Result<()> {
        if let Some(ref url) = self.telegram_api_url {
            if reqwest::Url::parse(url).is_err() {
                return Err(DbotError::Config(format!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url
                )));
            }
        }
        Ok(())
    }

    /// Token with everything but the last four characters hidden, for logs and `check-config`.
    pub fn masked_token(&self) -> String {
        let chars: Vec<char> = self.bot_token.chars().collect();
        if chars.len() <= 4 {
            return "****".to_string();
        }
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("****{}", tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let config = TelegramConfig::new("test_token".to_string(), TargetChat::Id(-100));
        assert_eq!(config.bot_token, "test_token");
        assert!(config.telegram_api_url.is_none());
        assert_eq!(config.target_chat, TargetChat::Id(-100));
    }

    #[test]
    fn test_target_chat_parse() {
        assert_eq!(
            TargetChat::parse("-1001234567890").unwrap(),
            TargetChat::Id(-1001234567890)
        );
        assert_eq!(
            TargetChat::parse("@my_channel").unwrap(),
            TargetChat::Username("@my_channel".to_string())
        );
        assert_eq!(
            TargetChat::parse(" my_channel ").unwrap(),
            TargetChat::Username("@my_channel".to_string())
        );
    }

    #[test]
    fn test_target_chat_parse_invalid() {
        assert!(TargetChat::parse("").is_err());
        assert!(TargetChat::parse("@").is_err());
        assert!(TargetChat::parse("https://t.me/x").is_err());
    }

    #[test]
    fn test_validate_rejects_bad_api_url() {
        let mut config = TelegramConfig::new("t".to_string(), TargetChat::Id(1));
        config.telegram_api_url = Some("::::".to_string());
        assert!(matches!(config.validate(), Err(DbotError::Config(_))));
        config.telegram_api_url = Some("https://api.example.org".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_masked_token() {
        let config = TelegramConfig::new("123456:ABCDEF".to_string(), TargetChat::Id(1));
        assert_eq!(config.masked_token(), "****CDEF");
        let short = TelegramConfig::new("abc".to_string(), TargetChat::Id(1));
        assert_eq!(short.masked_token(), "****");
    }
}
