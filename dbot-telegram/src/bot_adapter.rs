//! Wraps teloxide::Bot and implements [`dbot_core::Bot`]. Production code talks to Telegram; tests substitute another Bot impl.

use async_trait::async_trait;
use dbot_core::{parse_message_id, Bot as CoreBot, DbotError, Message, Result};
use teloxide::payloads::{SendMessageSetters, SetMessageReactionSetters};
use teloxide::prelude::*;
use teloxide::types::{ChatId, MessageId, ReactionType, ReplyParameters};

use crate::config::TelegramConfig;

/// Thin wrapper around teloxide::Bot that implements dbot-core's Bot trait.
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    /// Creates an adapter from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }
}

/// Builds a teloxide Bot from config, pointing it at a custom Bot API server when configured.
pub fn build_teloxide_bot(config: &TelegramConfig) -> Result<teloxide::Bot> {
    let bot = teloxide::Bot::new(config.bot_token.clone());
    match config.telegram_api_url.as_deref() {
        Some(url) => {
            let url = reqwest::Url::parse(url)
                .map_err(|e| DbotError::Config(format!("Invalid TELEGRAM_API_URL {}: {}", url, e)))?;
            Ok(bot.set_api_url(url))
        }
        None => Ok(bot),
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        let id = parse_message_id(&message.id)?;
        self.bot
            .send_message(ChatId(message.chat.id), text.to_string())
            .reply_parameters(ReplyParameters::new(MessageId(id)))
            .await
            .map_err(|e| DbotError::Bot(e.to_string()))?;
        Ok(())
    }

    async fn react_to(&self, message: &Message, emoji: &str) -> Result<()> {
        let id = parse_message_id(&message.id)?;
        self.bot
            .set_message_reaction(ChatId(message.chat.id), MessageId(id))
            .reaction(vec![ReactionType::Emoji {
                emoji: emoji.to_string(),
            }])
            .await
            .map_err(|e| DbotError::Bot(e.to_string()))?;
        Ok(())
    }
}
