use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;

use lulurelay::cli::{Cli, Commands};
use lulurelay::core::{config, init_logger, log_startup_configuration};
use lulurelay::download::{select_best_direct_format, MetadataExtractor, YtDlpExtractor};
use lulurelay::telegram::{create_bot, register_webhook, serve, HandlerDeps, WebhookState};

/// Main entry point
///
/// Parses CLI arguments and dispatches to the chosen subcommand, `run` by default.
///
/// # Errors
/// Returns an error if initialization fails (logging, bot token, HTTP clients)
/// or the subcommand itself fails.
#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env if present, before any config is read
    let _ = dotenv();

    let cli = Cli::parse_args();

    // Panics inside update tasks are reported by the webhook; this only gets them into the log
    std::panic::set_hook(Box::new(|panic_info| {
        log::error!("Panic caught: {:?}", panic_info);
        if let Some(location) = panic_info.location() {
            log::error!("Panic at {}:{}:{}", location.file(), location.line(), location.column());
        }
    }));

    init_logger(config::LOG_FILE_PATH.as_deref())?;

    match cli.command {
        Some(Commands::Run { port }) => run_server(port).await,
        None => run_server(None).await,
        Some(Commands::SetWebhook { url }) => set_webhook(url).await,
        Some(Commands::Probe { url, json }) => probe(&url, json).await,
    }
}

/// Serves the webhook until the process is stopped
async fn run_server(port: Option<u16>) -> Result<()> {
    log_startup_configuration();

    let bot = create_bot(&config::BOT_TOKEN)?;
    let deps = HandlerDeps::from_env()?;

    if deps.admin_user_id.is_none() {
        log::warn!("ADMIN_USER_ID is not set, every message will be ignored");
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], port.unwrap_or(*config::webhook::PORT)));
    serve(addr, WebhookState { bot, deps }).await
}

/// Registers the webhook URL with Telegram
async fn set_webhook(url: Option<String>) -> Result<()> {
    let bot = create_bot(&config::BOT_TOKEN)?;
    let url = url
        .or_else(|| config::webhook::BASE_URL.clone())
        .ok_or_else(|| anyhow::anyhow!("No webhook URL given: pass --url or set BASE_URL"))?;

    register_webhook(&bot, &url).await
}

/// Runs extraction and selection only, without uploading anything
async fn probe(url: &str, json: bool) -> Result<()> {
    let extractor = YtDlpExtractor::from_env();
    let metadata = extractor.extract(url).await?;

    let best = select_best_direct_format(metadata.formats());

    if json {
        let summary = serde_json::json!({
            "title": metadata.title(),
            "format_count": metadata.formats().len(),
            "selected": best,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Title: {}", metadata.title().unwrap_or("(untitled)"));
    println!("Formats: {}", metadata.formats().len());

    match best {
        Some(best) => {
            println!("Codec: {}", best.vcodec.as_deref().unwrap_or("?"));
            if let Some(height) = best.height {
                println!("Height: {}p", height);
            }
            if let Some(bitrate) = best.bitrate {
                println!("Bitrate: {:.0} kbit/s", bitrate);
            }
            println!("URL: {}", best.url.as_deref().unwrap_or("(none)"));
        }
        None => println!("No direct video format found"),
    }

    Ok(())
}
