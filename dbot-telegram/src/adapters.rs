//! Adapters from Telegram (teloxide) types to dbot_core types.
//! Depends only on teloxide and dbot_core type definitions.

use dbot_core::{Chat, Message, ToCoreMessage, ToCoreUser, User};
use teloxide::types::UserId;

/// Wraps a teloxide User for conversion to core [`User`].
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl<'a> ToCoreUser for TelegramUserWrapper<'a> {
    fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
            last_name: self.0.last_name.clone(),
        }
    }
}

/// Wraps a teloxide Message (plain message or channel post) together with the running bot's own id,
/// so the core message knows whether it was sent by ourselves.
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message, pub UserId);

impl<'a> ToCoreMessage for TelegramMessageWrapper<'a> {
    fn to_core(&self) -> Message {
        let msg = self.0;
        Message {
            id: msg.id.to_string(),
            user: msg
                .from
                .as_ref()
                .map(|u| TelegramUserWrapper(u).to_core())
                .unwrap_or_else(User::anonymous),
            chat: Chat {
                id: msg.chat.id.0,
                chat_type: chat_type(&msg.chat).to_string(),
                title: msg.chat.title().map(str::to_string),
            },
            sender_is_self: is_self_sender(msg.from.as_ref(), self.1),
            text: msg.text().or_else(|| msg.caption()).map(str::to_string),
            created_at: msg.date,
        }
    }
}

/// Returns true when `from` is the running bot itself.
pub fn is_self_sender(from: Option<&teloxide::types::User>, me: UserId) -> bool {
    from.map(|u| u.id == me).unwrap_or(false)
}

fn chat_type(chat: &teloxide::types::Chat) -> &'static str {
    if chat.is_channel() {
        "channel"
    } else if chat.is_supergroup() {
        "supergroup"
    } else if chat.is_group() {
        "group"
    } else {
        "private"
    }
}
