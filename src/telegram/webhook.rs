//! Webhook HTTP entry point
//!
//! Telegram POSTs each update as JSON to `/`. Any update that parses is
//! answered with 200, whatever happens while processing it, so Telegram
//! never redelivers it.

use std::net::SocketAddr;

use axum::{body::Bytes, extract::State, http::StatusCode, routing::get, Router};
use serde_json::Value;
use teloxide::prelude::*;
use teloxide::types::{Update, UpdateKind};

use super::handlers::{handle_message, HandlerDeps};

/// Shared state of the webhook router
#[derive(Clone)]
pub struct WebhookState {
    pub bot: Bot,
    pub deps: HandlerDeps,
}

/// Why a request body was rejected before processing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyRejection {
    Empty,
    InvalidJson,
    NotAnUpdate,
}

impl BodyRejection {
    pub fn message(self) -> &'static str {
        match self {
            BodyRejection::Empty => "Empty body",
            BodyRejection::InvalidJson => "Invalid JSON",
            BodyRejection::NotAnUpdate => "Failed to parse Telegram Update",
        }
    }
}

/// Parses a webhook body into a Telegram update.
pub fn parse_update(body: &[u8]) -> Result<Update, BodyRejection> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(BodyRejection::Empty);
    }

    let value: Value = serde_json::from_slice(body).map_err(|_| BodyRejection::InvalidJson)?;

    let is_empty = match &value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    };
    if is_empty {
        return Err(BodyRejection::Empty);
    }

    serde_json::from_value(value).map_err(|e| {
        log::debug!("Update deserialization failed: {}", e);
        BodyRejection::NotAnUpdate
    })
}

/// Routes an update to the message orchestrator. Other kinds are dropped.
pub async fn process_update(bot: &Bot, update: Update, deps: &HandlerDeps) {
    match update.kind {
        UpdateKind::Message(msg) => handle_message(bot, &msg, deps).await,
        _ => log::debug!("Ignoring update {:?}: not a message", update.id),
    }
}

async fn health_check() -> (StatusCode, String) {
    (StatusCode::OK, "OK".to_string())
}

async fn handle_update(State(state): State<WebhookState>, body: Bytes) -> (StatusCode, String) {
    let update = match parse_update(&body) {
        Ok(update) => update,
        Err(rejection) => {
            log::warn!("Rejected webhook body ({} bytes): {}", body.len(), rejection.message());
            return (StatusCode::BAD_REQUEST, rejection.message().to_string());
        }
    };

    log::debug!("Received update {:?}", update.id);

    let WebhookState { bot, deps } = state;
    let task = tokio::spawn(async move { process_update(&bot, update, &deps).await });

    match task.await {
        Ok(()) => (StatusCode::OK, "OK".to_string()),
        Err(e) => {
            log::error!("Update processing task failed: {}", e);
            (StatusCode::OK, "Processed with internal errors".to_string())
        }
    }
}

/// Creates the webhook router
pub fn router(state: WebhookState) -> Router {
    Router::new()
        .route("/", get(health_check).post(handle_update))
        .with_state(state)
}

/// Serves the webhook until the process is stopped
pub async fn serve(addr: SocketAddr, state: WebhookState) -> anyhow::Result<()> {
    let app = router(state);

    log::info!("🌐 Listening for Telegram updates on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
