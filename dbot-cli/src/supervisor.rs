//! Process supervision: one task drives the Telegram session, another serves health checks.
//! Both watch a shared shutdown flag, flipped on Ctrl-C / SIGTERM.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use dbot_core::{BotStatus, StatusCell};
use dbot_telegram::{
    build_teloxide_bot, identify, resolve_target_chat, run_dispatcher, TargetChat,
    TelegramBotAdapter, TeloxideBot,
};
use handler_chain::HandlerChain;
use reaction_handlers::{ChatFilterHandler, LoggingHandler, ReactionDispatcher};
use tokio::sync::watch;
use tracing::{error, info, instrument, warn};

use crate::config::AppConfig;
use crate::health;

/// Filter to the target chat, log, then react.
pub fn build_chain(target_chat_id: i64, dispatcher: Arc<ReactionDispatcher>) -> HandlerChain {
    HandlerChain::new()
        .add_handler(Arc::new(ChatFilterHandler::new(target_chat_id)))
        .add_handler(Arc::new(LoggingHandler))
        .add_handler(dispatcher)
}

/// Sleeps `delay` unless shutdown is requested first. Returns true when it is time to retry.
pub async fn wait_before_retry(delay: Duration, shutdown: &mut watch::Receiver<bool>) -> bool {
    tokio::select! {
        _ = tokio::time::sleep(delay) => true,
        _ = shutdown.wait_for(|stop| *stop) => false,
    }
}

/// Runs the reactor and the health endpoint until a shutdown signal arrives.
#[instrument(skip(config))]
pub async fn run(config: AppConfig) -> Result<()> {
    let bot = build_teloxide_bot(&config.telegram)?;
    let dispatcher = Arc::new(ReactionDispatcher::new(
        Arc::new(TelegramBotAdapter::new(bot.clone())),
        config.reaction.clone(),
    )?);

    let address = config.health_address();
    let listener = health::bind(&address)
        .await
        .with_context(|| format!("Bind health endpoint on {}", address))?;

    let (status, reader) = StatusCell::channel();
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let mut health = tokio::spawn(health::serve(listener, reader, shutdown_rx.clone()));
    let mut monitor = tokio::spawn(monitor(
        bot,
        dispatcher,
        config.telegram.target_chat.clone(),
        Duration::from_secs(config.startup_retry_secs),
        status,
        shutdown_rx,
    ));

    let mut monitor_done = None;
    let mut health_done = None;
    tokio::select! {
        signal = wait_for_shutdown() => {
            if let Err(e) = signal {
                error!(error = %e, "Failed to listen for shutdown signal");
            }
            info!("Shutdown signal received");
        }
        result = &mut monitor => {
            warn!("Monitor task ended before shutdown");
            monitor_done = Some(result);
        }
        result = &mut health => {
            warn!("Health endpoint ended before shutdown");
            health_done = Some(result);
        }
    }

    let _ = shutdown_tx.send(true);

    let monitor_result = match monitor_done {
        Some(result) => result,
        None => monitor.await,
    };
    match monitor_result {
        Ok(Ok(())) => {}
        Ok(Err(e)) => error!(error = %format!("{:#}", e), "Monitor task failed"),
        Err(e) => error!(error = %e, "Monitor task panicked"),
    }
    let health_result = match health_done {
        Some(result) => result,
        None => health.await,
    };
    match health_result {
        Ok(Ok(())) => {}
        Ok(Err(e)) => error!(error = %e, "Health endpoint failed"),
        Err(e) => error!(error = %e, "Health endpoint task panicked"),
    }

    info!("Stopped");
    Ok(())
}

/// Startup retry loop: identify, resolve the chat, then dispatch until shutdown.
/// A failed attempt is reported through `status` and retried after `retry_delay`.
async fn monitor(
    bot: TeloxideBot,
    dispatcher: Arc<ReactionDispatcher>,
    target: TargetChat,
    retry_delay: Duration,
    status: StatusCell,
    mut shutdown: watch::Receiver<bool>,
) -> Result<()> {
    let mut result = Ok(());

    while !*shutdown.borrow() {
        status.set(BotStatus::Starting);
        info!(target_chat = %target, "Attempting to start Telegram session");

        let session = async {
            let me = identify(&bot).await?;
            status.set(BotStatus::Connected);
            let chat_id = resolve_target_chat(&bot, &target).await?;
            anyhow::Ok((me, chat_id))
        };

        match session.await {
            Ok((me, chat_id)) => {
                let chain = build_chain(chat_id.0, dispatcher.clone());
                status.set(BotStatus::Monitoring);
                info!(chat_id = chat_id.0, "Monitoring chat for new messages");
                result = run_dispatcher(bot.clone(), chain, me, shutdown.clone()).await;
                break;
            }
            Err(e) => {
                let reason = format!("{:#}", e);
                error!(
                    error = %reason,
                    retry_secs = retry_delay.as_secs(),
                    "Startup failed, retrying"
                );
                status.set(BotStatus::Error(reason));
                if !wait_before_retry(retry_delay, &mut shutdown).await {
                    break;
                }
            }
        }
    }

    status.set(BotStatus::Stopped);
    result
}

#[cfg(unix)]
async fn wait_for_shutdown() -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut term = signal(SignalKind::terminate())?;
    tokio::select! {
        res = tokio::signal::ctrl_c() => res,
        _ = term.recv() => Ok(()),
    }
}

#[cfg(not(unix))]
async fn wait_for_shutdown() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await
}
