//! HTTP client for the LuluStream remote upload and file info API.

use reqwest::ClientBuilder;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use std::time::Duration;

use super::error::{Endpoint, LuluError, TransportFailure};
use super::fields::{
    lookup, lookup_top_or_nested, INFO_FILE_CODE_KEYS, INFO_THUMBNAIL_KEYS, INFO_TITLE_KEYS, UPLOAD_FILE_CODE_KEYS,
};
use crate::core::config;
use crate::core::error::AppResult;

/// Normalized answer of the file info endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    pub title: String,
    pub thumbnail_url: String,
    pub file_code: String,
}

impl FileInfo {
    /// Extracts the three required fields from a file info response.
    pub fn from_response(data: &Value) -> Result<Self, LuluError> {
        let title = lookup_top_or_nested(data, INFO_TITLE_KEYS);
        let thumbnail_url = lookup_top_or_nested(data, INFO_THUMBNAIL_KEYS);
        let file_code = lookup_top_or_nested(data, INFO_FILE_CODE_KEYS);

        match (title, thumbnail_url, file_code) {
            (Some(title), Some(thumbnail_url), Some(file_code)) => Ok(Self {
                title,
                thumbnail_url,
                file_code,
            }),
            _ => Err(LuluError::MissingFields),
        }
    }
}

/// Extracts the file code from a remote upload response.
pub fn file_code_from_upload_response(data: &Value) -> Result<String, LuluError> {
    let result = data
        .get("result")
        .filter(|result| result.is_object())
        .ok_or(LuluError::MissingResult)?;

    lookup(result, UPLOAD_FILE_CODE_KEYS).ok_or(LuluError::MissingFileCode)
}

/// LuluStream API client
///
/// Holds no per-request state and can be shared behind an `Arc`.
pub struct LuluClient {
    http: reqwest::Client,
    api_base: String,
    api_key: Option<SecretString>,
}

impl LuluClient {
    /// Creates a client for `api_base` (e.g. `https://lulustream.com/api`).
    pub fn new(api_base: impl Into<String>, api_key: Option<SecretString>, timeout: Duration) -> AppResult<Self> {
        let http = ClientBuilder::new().timeout(timeout).build()?;
        let api_base = api_base.into().trim_end_matches('/').to_string();

        Ok(Self {
            http,
            api_base,
            api_key,
        })
    }

    /// Client configured from LULU_KEY and LULU_API_BASE.
    pub fn from_env() -> AppResult<Self> {
        let api_key = config::lulustream::LULU_KEY.clone().map(SecretString::from);
        Self::new(
            config::lulustream::API_BASE.as_str(),
            api_key,
            config::lulustream::timeout(),
        )
    }

    fn key(&self) -> Result<&str, LuluError> {
        self.api_key
            .as_ref()
            .map(|key| key.expose_secret())
            .filter(|key| !key.is_empty())
            .ok_or(LuluError::MissingKey)
    }

    /// GETs `endpoint` with `query` and parses the body as JSON.
    ///
    /// The HTTP status is not checked: the API reports errors in the body.
    async fn get_json(&self, endpoint: Endpoint, query: &[(&str, &str)]) -> Result<Value, LuluError> {
        let url = format!("{}/{}", self.api_base, endpoint.path());

        let transport_error = |e: reqwest::Error| {
            let failure = TransportFailure::classify(&e);
            log::error!("LuluStream {} request failed: {}", endpoint, e.without_url());
            LuluError::Transport { endpoint, failure }
        };

        let response = self.http.get(&url).query(query).send().await.map_err(transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(transport_error)?;

        log::debug!("LuluStream {} responded with {} ({} bytes)", endpoint, status, body.len());

        serde_json::from_slice(&body).map_err(|e| {
            log::warn!("LuluStream {} response (status {}) is not JSON: {}", endpoint, status, e);
            LuluError::InvalidJson(endpoint)
        })
    }

    /// Asks LuluStream to fetch `video_url` itself and returns the new file code.
    pub async fn upload_url(&self, video_url: &str) -> Result<String, LuluError> {
        let key = self.key()?;
        let data = self
            .get_json(Endpoint::Upload, &[("key", key), ("url", video_url)])
            .await?;

        let file_code = file_code_from_upload_response(&data)?;
        log::info!("LuluStream accepted remote upload, file code {}", file_code);
        Ok(file_code)
    }

    /// Retrieves title, thumbnail and file code for `file_code`.
    pub async fn file_info(&self, file_code: &str) -> Result<FileInfo, LuluError> {
        let key = self.key()?;
        let data = self
            .get_json(Endpoint::FileInfo, &[("key", key), ("file_code", file_code)])
            .await?;

        FileInfo::from_response(&data)
    }
}
