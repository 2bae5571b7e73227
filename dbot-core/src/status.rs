//! Bot status shared between the bot task (writer) and the health endpoint (readers).
//!
//! Backed by a `tokio::sync::watch` channel: one [`StatusCell`] publishes, any number of
//! [`StatusReader`]s observe the latest value without locking the writer.

use std::fmt;

use tokio::sync::watch;

/// Lifecycle of the monitoring bot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotStatus {
    NotStarted,
    Starting,
    /// Authenticated against the transport; target chat not yet resolved.
    Connected,
    /// Handler chain is receiving messages from the target chat.
    Monitoring,
    /// Last startup attempt failed; carries the error text.
    Error(String),
    Stopped,
}

impl BotStatus {
    /// Short machine-friendly label, used in the JSON health payload.
    pub fn label(&self) -> &'static str {
        match self {
            BotStatus::NotStarted => "not_started",
            BotStatus::Starting => "starting",
            BotStatus::Connected => "connected",
            BotStatus::Monitoring => "monitoring",
            BotStatus::Error(_) => "error",
            BotStatus::Stopped => "stopped",
        }
    }
}

impl fmt::Display for BotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BotStatus::NotStarted => write!(f, "Not started"),
            BotStatus::Starting => write!(f, "Starting..."),
            BotStatus::Connected => write!(f, "Connected to Telegram"),
            BotStatus::Monitoring => write!(f, "Monitoring chat"),
            BotStatus::Error(e) => write!(f, "Error: {}", e),
            BotStatus::Stopped => write!(f, "Stopped"),
        }
    }
}

/// Write side of the status channel.
pub struct StatusCell {
    tx: watch::Sender<BotStatus>,
}

/// Read side of the status channel. Cheap to clone.
#[derive(Clone)]
pub struct StatusReader {
    rx: watch::Receiver<BotStatus>,
}

impl StatusCell {
    /// Creates a cell holding [`BotStatus::NotStarted`] and a reader attached to it.
    pub fn channel() -> (Self, StatusReader) {
        let (tx, rx) = watch::channel(BotStatus::NotStarted);
        (Self { tx }, StatusReader { rx })
    }

    /// Publishes a new status. Succeeds even when no reader is left.
    pub fn set(&self, status: BotStatus) {
        self.tx.send_replace(status);
    }

    /// Returns another reader for this cell.
    pub fn reader(&self) -> StatusReader {
        StatusReader {
            rx: self.tx.subscribe(),
        }
    }
}

impl StatusReader {
    /// Returns the latest published status.
    pub fn current(&self) -> BotStatus {
        self.rx.borrow().clone()
    }
}
