//! # dbot-core
//!
//! Core types and traits for the reactor bot: [`Bot`], [`Handler`], message and user types,
//! the shared [`StatusCell`], and tracing initialization. Transport-agnostic; used by dbot-telegram,
//! handler-chain and reaction-handlers.

pub mod bot;
pub mod error;
pub mod logger;
pub mod status;
pub mod types;

pub use bot::{parse_message_id, Bot};
pub use error::{DbotError, HandlerError, Result};
pub use logger::init_tracing;
pub use status::{BotStatus, StatusCell, StatusReader};
pub use types::{Chat, Handler, HandlerResponse, Message, ToCoreMessage, ToCoreUser, User};
