//! Handler dependencies and authorization

use std::sync::Arc;

use teloxide::types::{User, UserId};

use crate::core::config;
use crate::core::error::AppResult;
use crate::download::{MetadataExtractor, YtDlpExtractor};
use crate::lulustream::LuluClient;

/// Dependencies required by handlers
///
/// Everything here is immutable; a clone is cheap and shares the clients.
#[derive(Clone)]
pub struct HandlerDeps {
    pub admin_user_id: Option<UserId>,
    pub watch_base: String,
    pub extractor: Arc<dyn MetadataExtractor>,
    pub lulu: Arc<LuluClient>,
}

impl HandlerDeps {
    /// Create new handler dependencies
    pub fn new(
        admin_user_id: Option<UserId>,
        watch_base: impl Into<String>,
        extractor: Arc<dyn MetadataExtractor>,
        lulu: Arc<LuluClient>,
    ) -> Self {
        Self {
            admin_user_id,
            watch_base: watch_base.into().trim_end_matches('/').to_string(),
            extractor,
            lulu,
        }
    }

    /// Dependencies configured from the environment
    pub fn from_env() -> AppResult<Self> {
        Ok(Self::new(
            *config::admin::ADMIN_USER_ID,
            config::lulustream::WATCH_BASE.as_str(),
            Arc::new(YtDlpExtractor::from_env()),
            Arc::new(LuluClient::from_env()?),
        ))
    }

    /// True only when an admin is configured and `user` is that admin.
    pub fn is_admin(&self, user: Option<&User>) -> bool {
        match (self.admin_user_id, user) {
            (Some(admin), Some(user)) => user.id == admin,
            _ => false,
        }
    }

    /// Public watch link for a mirrored file
    pub fn watch_url(&self, file_code: &str) -> String {
        format!("{}/{}", self.watch_base, file_code)
    }
}
