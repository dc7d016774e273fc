//! Bot initialization and webhook registration

use reqwest::ClientBuilder;
use teloxide::prelude::*;

use crate::core::config;

/// Creates a Bot instance with custom or default API URL
///
/// # Arguments
/// * `token` - Bot token from BotFather
///
/// # Returns
/// * `Ok(Bot)` - Successfully created bot instance
/// * `Err(anyhow::Error)` - Missing token, invalid BOT_API_URL or HTTP client failure
pub fn create_bot(token: &str) -> anyhow::Result<Bot> {
    if token.trim().is_empty() {
        return Err(anyhow::anyhow!("TELEGRAM_BOT_TOKEN environment variable is not set"));
    }

    let client = ClientBuilder::new().timeout(config::network::timeout()).build()?;
    let bot = Bot::with_client(token, client);

    // Check if local Bot API server is configured
    let bot = if let Some(bot_api_url) = config::bot_api::get_url() {
        log::info!(
            "Using custom Bot API URL: {} (local: {})",
            bot_api_url,
            config::bot_api::is_local_url(&bot_api_url)
        );
        let url = url::Url::parse(&bot_api_url).map_err(|e| anyhow::anyhow!("Invalid BOT_API_URL: {}", e))?;
        bot.set_api_url(url)
    } else {
        bot
    };

    Ok(bot)
}

/// Points Telegram update delivery at `webhook_url`
///
/// Any previously registered webhook is replaced.
pub async fn register_webhook(bot: &Bot, webhook_url: &str) -> anyhow::Result<()> {
    let url = url::Url::parse(webhook_url).map_err(|e| anyhow::anyhow!("Invalid webhook URL: {}", e))?;
    if url.scheme() != "https" {
        log::warn!("Telegram only delivers webhooks over HTTPS, got {}", url.scheme());
    }

    bot.set_webhook(url.clone()).await?;
    log::info!("Webhook registered at {}", url);
    Ok(())
}
