//! Dispatcher runner: converts teloxide messages and channel posts to core::Message and passes each to
//! the HandlerChain on its own task. Also resolves the bot identity and the target chat before start.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use dbot_core::{Message as CoreMessage, ToCoreMessage};
use handler_chain::HandlerChain;
use teloxide::prelude::*;
use teloxide::types::{Recipient, Update, UpdateKind, UserId};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument};

use super::adapters::TelegramMessageWrapper;
use super::config::TargetChat;

/// Shared by every update handled by the dispatcher.
struct RunnerContext {
    chain: HandlerChain,
    me: UserId,
}

/// Calls get_me() and returns the bot's own user id (used to flag self-messages).
#[instrument(skip(bot))]
pub async fn identify(bot: &teloxide::Bot) -> Result<UserId> {
    let me = bot.get_me().await.context("get_me failed")?;
    info!(
        user_id = me.user.id.0,
        username = ?me.user.username,
        "Bot identity resolved"
    );
    Ok(me.user.id)
}

/// Resolves the target chat to a chat id via get_chat; fails if the bot cannot see the chat.
#[instrument(skip(bot))]
pub async fn resolve_target_chat(bot: &teloxide::Bot, target_chat: &TargetChat) -> Result<ChatId> {
    let recipient = match target_chat {
        TargetChat::Id(id) => Recipient::Id(ChatId(*id)),
        TargetChat::Username(name) => Recipient::ChannelUsername(name.clone()),
    };
    let chat = bot
        .get_chat(recipient)
        .await
        .with_context(|| format!("cannot access target chat {}", target_chat))?;
    info!(chat_id = chat.id.0, target_chat = %target_chat, "Target chat resolved");
    Ok(chat.id)
}

/// Extracts the message from a plain message or channel post update, flagged against `me`.
/// Any other update kind yields None.
pub fn incoming_message(update: &Update, me: UserId) -> Option<CoreMessage> {
    match &update.kind {
        UpdateKind::Message(msg) | UpdateKind::ChannelPost(msg) => {
            Some(TelegramMessageWrapper(msg, me).to_core())
        }
        _ => None,
    }
}

/// Runs the chain for one message on its own task, so a pending delay never blocks the next update.
pub fn spawn_handling(chain: HandlerChain, message: CoreMessage) -> JoinHandle<()> {
    debug!(
        user_id = message.user.id,
        chat_id = message.chat.id,
        message_id = %message.id,
        sender_is_self = message.sender_is_self,
        "Received message"
    );

    tokio::spawn(async move {
        if let Err(e) = chain.handle(&message).await {
            error!(
                error = %e,
                chat_id = message.chat.id,
                message_id = %message.id,
                "Handler chain failed"
            );
        }
    })
}

async fn on_message(message: CoreMessage, ctx: Arc<RunnerContext>) -> ResponseResult<()> {
    spawn_handling(ctx.chain.clone(), message);
    Ok(())
}

/// Long-polls Telegram and feeds messages and channel posts to `handler_chain` until `shutdown` turns true.
#[instrument(skip(bot, handler_chain, shutdown))]
pub async fn run_dispatcher(
    bot: teloxide::Bot,
    handler_chain: HandlerChain,
    me: UserId,
    mut shutdown: watch::Receiver<bool>,
) -> Result<()> {
    let ctx = Arc::new(RunnerContext {
        chain: handler_chain,
        me,
    });

    let handler = dptree::filter_map(|update: Update, ctx: Arc<RunnerContext>| {
        incoming_message(&update, ctx.me)
    })
    .endpoint(on_message);

    let mut dispatcher = Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![ctx])
        .default_handler(|_| async {})
        .build();

    let token = dispatcher.shutdown_token();
    let stopper = tokio::spawn(async move {
        if shutdown.wait_for(|stop| *stop).await.is_err() {
            return;
        }
        info!("Shutdown requested, stopping dispatcher");
        // shutdown() refuses while the dispatcher is still starting up.
        loop {
            match token.shutdown() {
                Ok(done) => {
                    done.await;
                    break;
                }
                Err(_) => tokio::time::sleep(Duration::from_millis(100)).await,
            }
        }
    });

    info!("Dispatcher started");
    dispatcher.dispatch().await;
    stopper.abort();
    info!("Dispatcher stopped");

    Ok(())
}
