//! Common test utilities
//!
//! This module is shared across all integration tests: a scripted metadata
//! extractor and wiremock servers standing in for the Telegram Bot API and
//! the LuluStream API.

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use teloxide::prelude::*;
use teloxide::types::{Message, UserId};
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use lulurelay::core::config::lulustream::DEFAULT_WATCH_BASE;
use lulurelay::download::{ExtractError, MetadataExtractor, VideoMetadata, YtDlpErrorType};
use lulurelay::lulustream::LuluClient;
use lulurelay::telegram::{HandlerDeps, WebhookState};

pub const ADMIN_ID: u64 = 123456789;
pub const STRANGER_ID: u64 = 555000111;
pub const LULU_KEY: &str = "test-lulu-key";

/// What the fake extractor does when called
#[derive(Clone)]
pub enum FakeOutcome {
    Metadata(Value),
    Fail(String),
    Panic,
}

/// Scripted [`MetadataExtractor`] that records every URL it is asked for
pub struct FakeExtractor {
    outcome: FakeOutcome,
    calls: AtomicUsize,
    seen: Mutex<Vec<String>>,
}

impl FakeExtractor {
    pub fn new(outcome: FakeOutcome) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen_urls(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl MetadataExtractor for FakeExtractor {
    async fn extract(&self, url: &str) -> Result<VideoMetadata, ExtractError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(url.to_string());

        match &self.outcome {
            FakeOutcome::Metadata(raw) => VideoMetadata::from_json(raw.clone()).ok_or(ExtractError::InvalidMetadata),
            FakeOutcome::Fail(reason) => Err(ExtractError::Failed {
                kind: YtDlpErrorType::Unknown,
                reason: reason.clone(),
            }),
            FakeOutcome::Panic => panic!("extractor exploded"),
        }
    }
}

/// Metadata with an audio-only entry followed by a 720p h264 one
pub fn demo_metadata() -> Value {
    json!({
        "title": "Demo Clip",
        "formats": [
            {"url": "a", "vcodec": "none"},
            {"url": "b", "vcodec": "h264", "height": 720, "tbr": 500}
        ]
    })
}

/// Builds a private-chat text message from `user_id`
pub fn text_message(user_id: u64, text: &str) -> Message {
    serde_json::from_value(json!({
        "message_id": 1,
        "date": 1735992000,
        "chat": {"id": user_id, "type": "private", "first_name": "Test"},
        "from": {"id": user_id, "is_bot": false, "first_name": "Test"},
        "text": text
    }))
    .unwrap()
}

/// Builds a photo message (no text) from `user_id`
pub fn photo_message(user_id: u64) -> Message {
    serde_json::from_value(json!({
        "message_id": 2,
        "date": 1735992000,
        "chat": {"id": user_id, "type": "private", "first_name": "Test"},
        "from": {"id": user_id, "is_bot": false, "first_name": "Test"},
        "photo": [{"file_id": "p1", "file_unique_id": "u1", "width": 90, "height": 90}]
    }))
    .unwrap()
}

/// Webhook body carrying a text message from `user_id`
pub fn message_update_json(user_id: u64, text: &str) -> String {
    json!({
        "update_id": 10001,
        "message": {
            "message_id": 1,
            "date": 1735992000,
            "chat": {"id": user_id, "type": "private", "first_name": "Test"},
            "from": {"id": user_id, "is_bot": false, "first_name": "Test"},
            "text": text
        }
    })
    .to_string()
}

fn sent_message_response(text: &str) -> Value {
    json!({
        "ok": true,
        "result": {
            "message_id": 42,
            "from": {"id": 987654321, "is_bot": true, "first_name": "TestBot", "username": "test_bot"},
            "chat": {"id": ADMIN_ID, "type": "private", "first_name": "Test"},
            "date": 1735992000,
            "text": text
        }
    })
}

fn sent_photo_response() -> Value {
    json!({
        "ok": true,
        "result": {
            "message_id": 43,
            "from": {"id": 987654321, "is_bot": true, "first_name": "TestBot", "username": "test_bot"},
            "chat": {"id": ADMIN_ID, "type": "private", "first_name": "Test"},
            "date": 1735992000,
            "photo": [{"file_id": "photo1", "file_unique_id": "uphoto1", "width": 320, "height": 180}],
            "caption": "caption"
        }
    })
}

fn api_error_response(code: u16, description: &str) -> ResponseTemplate {
    ResponseTemplate::new(code).set_body_json(json!({
        "ok": false,
        "error_code": code,
        "description": description
    }))
}

/// Test harness with mocked Telegram and LuluStream servers
pub struct TestHarness {
    pub telegram: MockServer,
    pub lulu: MockServer,
    pub bot: Bot,
    pub extractor: Arc<FakeExtractor>,
    pub deps: HandlerDeps,
}

impl TestHarness {
    /// Harness whose admin is [`ADMIN_ID`]
    pub async fn new(outcome: FakeOutcome) -> Self {
        Self::with_admin(outcome, Some(UserId(ADMIN_ID))).await
    }

    pub async fn with_admin(outcome: FakeOutcome, admin: Option<UserId>) -> Self {
        let _ = pretty_env_logger::try_init();

        let telegram = MockServer::start().await;
        let lulu = MockServer::start().await;

        let bot = Bot::new("test_token_12345:ABCDEF").set_api_url(telegram.uri().parse().unwrap());

        let client = LuluClient::new(
            format!("{}/api", lulu.uri()),
            Some(LULU_KEY.to_string().into()),
            Duration::from_millis(500),
        )
        .unwrap();

        let extractor = Arc::new(FakeExtractor::new(outcome));
        let dyn_extractor: Arc<dyn MetadataExtractor> = extractor.clone();
        let deps = HandlerDeps::new(admin, DEFAULT_WATCH_BASE, dyn_extractor, Arc::new(client));

        Self {
            telegram,
            lulu,
            bot,
            extractor,
            deps,
        }
    }

    pub fn webhook_state(&self) -> WebhookState {
        WebhookState {
            bot: self.bot.clone(),
            deps: self.deps.clone(),
        }
    }

    /// Mock successful sendMessage and sendPhoto calls
    pub async fn mount_telegram_ok(&self) {
        self.mount_send_message_ok().await;

        Mock::given(method("POST"))
            .and(path_regex("(?i)/bot[^/]+/sendPhoto$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(sent_photo_response()))
            .mount(&self.telegram)
            .await;
    }

    pub async fn mount_send_message_ok(&self) {
        Mock::given(method("POST"))
            .and(path_regex("(?i)/bot[^/]+/sendMessage$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(sent_message_response("ok")))
            .mount(&self.telegram)
            .await;
    }

    pub async fn mount_send_message_error(&self) {
        Mock::given(method("POST"))
            .and(path_regex("(?i)/bot[^/]+/sendMessage$"))
            .respond_with(api_error_response(500, "Internal Server Error"))
            .mount(&self.telegram)
            .await;
    }

    pub async fn mount_send_photo_error(&self) {
        Mock::given(method("POST"))
            .and(path_regex("(?i)/bot[^/]+/sendPhoto$"))
            .respond_with(api_error_response(
                400,
                "Bad Request: wrong file identifier/HTTP URL specified",
            ))
            .mount(&self.telegram)
            .await;
    }

    /// Mock the upload endpoint for `video_url`
    pub async fn mount_upload(&self, video_url: &str, response: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path("/api/upload/url"))
            .and(query_param("key", LULU_KEY))
            .and(query_param("url", video_url))
            .respond_with(response)
            .mount(&self.lulu)
            .await;
    }

    /// Mock the file info endpoint for `file_code`
    pub async fn mount_file_info(&self, file_code: &str, response: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path("/api/file/info"))
            .and(query_param("key", LULU_KEY))
            .and(query_param("file_code", file_code))
            .respond_with(response)
            .mount(&self.lulu)
            .await;
    }

    /// Upload returns `abc123`, info describes "Demo Clip"
    pub async fn mount_lulu_happy_path(&self) {
        self.mount_upload(
            "b",
            ResponseTemplate::new(200).set_body_json(json!({"msg": "OK", "status": 200, "result": {"filecode": "abc123"}})),
        )
        .await;
        self.mount_file_info(
            "abc123",
            ResponseTemplate::new(200).set_body_json(json!({
                "msg": "OK",
                "status": 200,
                "result": [{
                    "file_code": "abc123",
                    "file_title": "Demo Clip",
                    "player_img": "https://img.example.com/abc123.jpg"
                }]
            })),
        )
        .await;
    }

    async fn telegram_requests(&self, api_method: &str) -> Vec<Request> {
        // teloxide names methods in PascalCase (`/SendMessage`)
        let suffix = format!("/{}", api_method.to_lowercase());
        self.telegram
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|req| req.url.path().to_lowercase().ends_with(&suffix))
            .collect()
    }

    /// Texts of every sendMessage call, in order
    pub async fn sent_texts(&self) -> Vec<String> {
        self.telegram_requests("sendMessage")
            .await
            .iter()
            .map(|req| {
                serde_json::from_slice::<Value>(&req.body)
                    .ok()
                    .and_then(|body| body.get("text").and_then(Value::as_str).map(str::to_string))
                    .unwrap_or_else(|| String::from_utf8_lossy(&req.body).into_owned())
            })
            .collect()
    }

    /// Raw bodies of every sendPhoto call
    pub async fn sent_photos(&self) -> Vec<String> {
        self.telegram_requests("sendPhoto")
            .await
            .iter()
            .map(|req| String::from_utf8_lossy(&req.body).into_owned())
            .collect()
    }

    pub async fn telegram_request_count(&self) -> usize {
        self.telegram.received_requests().await.unwrap_or_default().len()
    }

    /// LuluStream requests whose path ends with `endpoint` (e.g. "upload/url")
    pub async fn lulu_requests(&self, endpoint: &str) -> Vec<Request> {
        self.lulu
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|req| req.url.path().ends_with(endpoint))
            .collect()
    }

    pub async fn lulu_request_count(&self) -> usize {
        self.lulu.received_requests().await.unwrap_or_default().len()
    }
}
