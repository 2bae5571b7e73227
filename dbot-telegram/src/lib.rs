//! # dbot-telegram
//!
//! Telegram transport layer: adapters, [`dbot_core::Bot`] implementation, connectivity config,
//! target chat resolution and the dispatcher runner. Knows nothing about reactions.

mod adapters;
mod bot_adapter;
mod config;
mod runner;

pub use adapters::{is_self_sender, TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::{build_teloxide_bot, TelegramBotAdapter};
pub use config::{TargetChat, TelegramConfig};
pub use runner::{identify, incoming_message, resolve_target_chat, run_dispatcher, spawn_handling};
pub use teloxide::types::{ChatId, UserId};
pub use teloxide::Bot as TeloxideBot;
