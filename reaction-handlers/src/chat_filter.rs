//! Handlers that gate and log messages before the dispatcher sees them.

use async_trait::async_trait;
use dbot_core::{Handler, HandlerResponse, Message, Result};
use tracing::{debug, info, instrument};

/// Stops the chain for messages outside the monitored chat.
pub struct ChatFilterHandler {
    chat_id: i64,
}

impl ChatFilterHandler {
    pub fn new(chat_id: i64) -> Self {
        Self { chat_id }
    }
}

#[async_trait]
impl Handler for ChatFilterHandler {
    async fn before(&self, message: &Message) -> Result<bool> {
        if message.chat.id == self.chat_id {
            return Ok(true);
        }
        debug!(
            chat_id = message.chat.id,
            target_chat_id = self.chat_id,
            "Message from other chat ignored"
        );
        Ok(false)
    }
}

/// Logs each message in before() and the response in after(); always continues.
pub struct LoggingHandler;

#[async_trait]
impl Handler for LoggingHandler {
    #[instrument(skip(self, message))]
    async fn before(&self, message: &Message) -> Result<bool> {
        info!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            message_id = %message.id,
            sender_is_self = message.sender_is_self,
            text = %message.text.as_deref().unwrap_or(""),
            "Received message"
        );
        Ok(true)
    }

    #[instrument(skip(self, message, response))]
    async fn after(&self, message: &Message, response: &HandlerResponse) -> Result<()> {
        debug!(
            message_id = %message.id,
            response = ?response,
            "Processed message"
        );
        Ok(())
    }
}
