//! Mock implementations of [`dbot_core::Bot`] for dispatcher tests.
//!
//! Every call is recorded as a [`SendRecord`] on an unbounded channel together with the
//! (simulated) instant it happened, so tests can check delays without hitting Telegram.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dbot_core::{Bot, Chat, DbotError, Message, Result, User};
use tokio::sync::mpsc;
use tokio::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendKind {
    Reply,
    Reaction,
}

/// One recorded outbound call.
#[derive(Debug, Clone)]
pub struct SendRecord {
    pub kind: SendKind,
    pub chat_id: i64,
    pub message_id: String,
    pub text: String,
    pub at: Instant,
}

/// Mock Bot that records every call; `fail_first` calls return a Bot error (still recorded).
pub struct MockBot {
    tx: mpsc::UnboundedSender<SendRecord>,
    fail_first: usize,
    calls: AtomicUsize,
}

impl MockBot {
    /// Mock that accepts every call.
    pub fn with_receiver() -> (Arc<Self>, mpsc::UnboundedReceiver<SendRecord>) {
        Self::failing(0)
    }

    /// Mock whose first `fail_first` calls fail (e.g. rate limited).
    pub fn failing(fail_first: usize) -> (Arc<Self>, mpsc::UnboundedReceiver<SendRecord>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let bot = Arc::new(Self {
            tx,
            fail_first,
            calls: AtomicUsize::new(0),
        });
        (bot, rx)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record(&self, kind: SendKind, chat_id: i64, message_id: &str, text: &str) -> Result<()> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        let _ = self.tx.send(SendRecord {
            kind,
            chat_id,
            message_id: message_id.to_string(),
            text: text.to_string(),
            at: Instant::now(),
        });
        if n < self.fail_first {
            return Err(DbotError::Bot("Too Many Requests: retry after 30".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.record(SendKind::Reply, message.chat.id, &message.id, text)
    }

    async fn react_to(&self, message: &Message, emoji: &str) -> Result<()> {
        self.record(SendKind::Reaction, message.chat.id, &message.id, emoji)
    }
}

pub const CHAT_ID: i64 = -1001234567890;

pub fn make_message(id: u32, sender_is_self: bool) -> Message {
    Message {
        id: id.to_string(),
        user: User {
            id: if sender_is_self { 777 } else { 123 },
            username: Some("poster".to_string()),
            first_name: Some("Poster".to_string()),
            last_name: None,
        },
        chat: Chat {
            id: CHAT_ID,
            chat_type: "channel".to_string(),
            title: Some("News".to_string()),
        },
        sender_is_self,
        text: Some("hello".to_string()),
        created_at: Utc::now(),
    }
}

/// Drains everything recorded so far.
pub fn drain(rx: &mut mpsc::UnboundedReceiver<SendRecord>) -> Vec<SendRecord> {
    let mut out = Vec::new();
    while let Ok(record) = rx.try_recv() {
        out.push(record);
    }
    out
}
