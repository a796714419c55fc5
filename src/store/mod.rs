// src/store/mod.rs
//! Shipped collaborator implementations: a JSON-file task store and an
//! environment-based access grant.

mod json;

pub use json::JsonTaskStore;

use crate::engine::AccessGrants;
use crate::error::EngineError;
use crate::types::ApiToken;

/// Access grants backed by a single token from the environment.
///
/// The CLI case: whoever runs the binary owns the workspace, so every
/// owner resolves to the same integration token. Server deployments
/// implement `AccessGrants` against their per-user grant storage instead.
pub struct EnvAccessGrants {
    token: Option<ApiToken>,
}

impl EnvAccessGrants {
    /// Read `NOTION_API_KEY` from the environment; an unset variable means
    /// every lookup resolves to no grant.
    pub fn from_env() -> Self {
        let token = std::env::var("NOTION_API_KEY")
            .ok()
            .and_then(|raw| ApiToken::new(raw).ok());
        Self { token }
    }

    pub fn with_token(token: ApiToken) -> Self {
        Self { token: Some(token) }
    }
}

#[async_trait::async_trait]
impl AccessGrants for EnvAccessGrants {
    async fn access_token_for(&self, _owner: &str) -> Result<Option<ApiToken>, EngineError> {
        Ok(self.token.clone())
    }
}
