//! Telegram Stars demo server
//!
//! Axum server hosting the Web App page, the Telegram webhook, and the
//! balance / invoice API backed by an in-memory star ledger.

mod app;
mod config;
mod handlers;
mod pages;
mod state;

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stars_ledger::{Ledger, MemoryLedger};
use stars_payments::{BotApi, PaymentFlow, SetWebhook, TelegramClient, TelegramConfig};

use crate::config::ServerConfig;
use crate::state::AppState;

/// Webhook connections Telegram may open in parallel
const MAX_WEBHOOK_CONNECTIONS: u32 = 100;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment
    dotenvy::dotenv().ok();
    let config = ServerConfig::from_env()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.log_filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Telegram client
    let mut telegram = TelegramConfig::new(config.token.clone());
    if let Some(api_url) = &config.telegram_api_url {
        telegram.api_url.clone_from(api_url);
    }
    let bot = Arc::new(TelegramClient::from_config(telegram)?);

    let me = bot.get_me().await.context("failed to create new bot")?;
    let username = me.username.unwrap_or(me.first_name);

    // Payments
    let ledger: Arc<dyn Ledger> = Arc::new(MemoryLedger::new());
    let flow = PaymentFlow::new(
        bot.clone(),
        ledger.clone(),
        config.webapp_url.clone(),
        username.clone(),
    );

    bot.set_webhook(&SetWebhook {
        url: config.webhook_url(),
        secret_token: config.webhook_secret.clone(),
        max_connections: MAX_WEBHOOK_CONNECTIONS,
        drop_pending_updates: true,
    })
    .await
    .context("failed to set bot webhooks")?;

    let state = AppState {
        flow: Arc::new(flow),
        ledger,
        token: config.token.as_str().into(),
        webhook_secret: config.webhook_secret.as_str().into(),
        webapp_url: config.webapp_url.as_str().into(),
    };

    let app = app::router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;

    tracing::info!("@{} has been started on http://{}", username, config.bind_addr);
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /               - Web App home page");
    tracing::info!("  GET  /validate       - Validate Web App init data");
    tracing::info!("  POST /bots/<token>   - Telegram webhook");
    tracing::info!("  GET  /get-balance    - Star balance for a user");
    tracing::info!("  POST /create-invoice - Create a 1 Star invoice link");

    axum::serve(listener, app).await?;

    Ok(())
}
