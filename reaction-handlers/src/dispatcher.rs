//! Delayed random emoji reaction for every message not sent by ourselves.
//!
//! One dispatch per message: decide, sleep, send once through the [`Bot`]. Send failures are logged
//! and dropped; they never leave the handler, so the next message is handled as usual.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dbot_core::{Bot, Handler, HandlerResponse, Message, Result};
use tracing::{debug, info, instrument, warn};

use crate::config::{ReactionConfig, ReactionMode};
use crate::decision::DispatchDecision;

/// Outcome of one dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Self-message (or nothing to send); no call was made.
    Skipped,
    /// The emoji was delivered.
    Reacted(String),
    /// The bot call failed; the error was logged.
    Failed,
}

pub struct ReactionDispatcher {
    bot: Arc<dyn Bot>,
    config: ReactionConfig,
}

impl ReactionDispatcher {
    /// Validates `config` up front so a bad emoji set or delay range fails at startup.
    pub fn new(bot: Arc<dyn Bot>, config: ReactionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { bot, config })
    }

    pub fn config(&self) -> &ReactionConfig {
        &self.config
    }

    /// Draws a fresh decision for `message` from the thread-local RNG.
    pub fn decide(&self, message: &Message) -> DispatchDecision {
        let mut rng = rand::thread_rng();
        DispatchDecision::sample(message, &self.config, &mut rng)
    }

    /// Decides, waits the sampled delay, then sends the reaction once. Never returns an error.
    #[instrument(skip(self, message), fields(chat_id = message.chat.id, message_id = %message.id))]
    pub async fn dispatch(&self, message: &Message) -> DispatchOutcome {
        let decision = self.decide(message);
        let emoji = match decision.reaction {
            Some(emoji) if decision.should_react => emoji,
            _ => {
                debug!(sender_is_self = message.sender_is_self, "Skipping message");
                return DispatchOutcome::Skipped;
            }
        };

        debug!(delay_secs = decision.delay_secs, emoji = %emoji, "Reaction scheduled");
        tokio::time::sleep(Duration::from_secs(decision.delay_secs)).await;

        let sent = match self.config.mode {
            ReactionMode::Reply => self.bot.reply_to(message, &emoji).await,
            ReactionMode::Reaction => self.bot.react_to(message, &emoji).await,
        };

        match sent {
            Ok(()) => {
                info!(
                    emoji = %emoji,
                    delay_secs = decision.delay_secs,
                    chat_title = ?message.chat.title,
                    "Reacted to message"
                );
                DispatchOutcome::Reacted(emoji)
            }
            Err(e) => {
                warn!(error = %e, emoji = %emoji, "Failed to react, dropping");
                DispatchOutcome::Failed
            }
        }
    }
}

#[async_trait]
impl Handler for ReactionDispatcher {
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        Ok(match self.dispatch(message).await {
            DispatchOutcome::Skipped => HandlerResponse::Ignore,
            DispatchOutcome::Reacted(emoji) => HandlerResponse::Reply(emoji),
            DispatchOutcome::Failed => HandlerResponse::Stop,
        })
    }
}
