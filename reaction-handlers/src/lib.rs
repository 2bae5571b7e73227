//! # reaction-handlers
//!
//! Handlers that react to new posts in a monitored chat: [`ReactionDispatcher`] waits a random
//! delay and answers with a random emoji, [`ChatFilterHandler`] keeps other chats out, and
//! [`LoggingHandler`] records what came in.

mod chat_filter;
mod config;
mod decision;
mod dispatcher;

pub use chat_filter::{ChatFilterHandler, LoggingHandler};
pub use config::{
    parse_emojis, ReactionConfig, ReactionMode, DEFAULT_EMOJIS, DEFAULT_MAX_DELAY_SECS,
    DEFAULT_MIN_DELAY_SECS,
};
pub use decision::DispatchDecision;
pub use dispatcher::{DispatchOutcome, ReactionDispatcher};
