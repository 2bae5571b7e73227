//! Bot abstraction for replying and reacting to messages.
//!
//! [`Bot`] is transport-agnostic; dbot-telegram implements it via teloxide and tests substitute mocks.

use crate::error::{HandlerError, Result};
use crate::types::Message;
use async_trait::async_trait;

/// Outbound side of the chat client. Implementations map to a transport (e.g. Telegram).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends `text` as a reply quoting the given message (same chat).
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()>;
    /// Sets `emoji` as a native reaction on the given message.
    async fn react_to(&self, message: &Message, emoji: &str) -> Result<()>;
}

/// Parses a message id string into the transport's numeric id.
pub fn parse_message_id(s: &str) -> Result<i32> {
    s.parse()
        .map_err(|_| HandlerError::InvalidMessageId(s.to_string()).into())
}
