//! Reaction settings: delay bounds, candidate emojis, delivery mode.
//! Loaded from env: REACTION_MIN_DELAY_SECS, REACTION_MAX_DELAY_SECS, REACTION_EMOJIS, REACTION_MODE.

use dbot_core::{DbotError, Result};
use std::env;
use std::str::FromStr;

pub const DEFAULT_MIN_DELAY_SECS: u64 = 5;
pub const DEFAULT_MAX_DELAY_SECS: u64 = 15;
pub const DEFAULT_EMOJIS: [&str; 5] = ["👍", "❤️", "🔥", "⭐", "🎉"];

/// How the chosen emoji is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReactionMode {
    /// Send the emoji as a reply message quoting the post.
    #[default]
    Reply,
    /// Set the emoji as a native message reaction.
    Reaction,
}

impl FromStr for ReactionMode {
    type Err = DbotError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reply" => Ok(ReactionMode::Reply),
            "reaction" => Ok(ReactionMode::Reaction),
            other => Err(DbotError::Config(format!(
                "REACTION_MODE must be 'reply' or 'reaction', got '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionConfig {
    pub min_delay_secs: u64,
    pub max_delay_secs: u64,
    pub emojis: Vec<String>,
    pub mode: ReactionMode,
}

impl Default for ReactionConfig {
    fn default() -> Self {
        Self {
            min_delay_secs: DEFAULT_MIN_DELAY_SECS,
            max_delay_secs: DEFAULT_MAX_DELAY_SECS,
            emojis: DEFAULT_EMOJIS.iter().map(|e| e.to_string()).collect(),
            mode: ReactionMode::default(),
        }
    }
}

impl ReactionConfig {
    /// Loads from env; unset variables keep their defaults. The result is validated.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let min_delay_secs = env_u64("REACTION_MIN_DELAY_SECS")?.unwrap_or(defaults.min_delay_secs);
        let max_delay_secs = env_u64("REACTION_MAX_DELAY_SECS")?.unwrap_or(defaults.max_delay_secs);
        let emojis = match env::var("REACTION_EMOJIS") {
            Ok(raw) => parse_emojis(&raw),
            Err(_) => defaults.emojis,
        };
        let mode = match env::var("REACTION_MODE") {
            Ok(raw) => raw.parse()?,
            Err(_) => defaults.mode,
        };

        let config = Self {
            min_delay_secs,
            max_delay_secs,
            emojis,
            mode,
        };
        config.validate()?;
        Ok(config)
    }

    /// Rejects an empty candidate set and inverted delay bounds.
    pub fn validate(&self) -> Result<()> {
        if self.emojis.is_empty() {
            return Err(DbotError::Config(
                "reaction emoji set is empty (REACTION_EMOJIS)".to_string(),
            ));
        }
        if self.min_delay_secs > self.max_delay_secs {
            return Err(DbotError::Config(format!(
                "reaction delay bounds inverted: min {}s > max {}s",
                self.min_delay_secs, self.max_delay_secs
            )));
        }
        Ok(())
    }
}

/// Splits a comma-separated emoji list, dropping blanks.
pub fn parse_emojis(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .map(str::to_string)
        .collect()
}

fn env_u64(key: &str) -> Result<Option<u64>> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| DbotError::Config(format!("{} must be a non-negative integer, got '{}'", key, raw))),
        Err(_) => Ok(None),
    }
}
