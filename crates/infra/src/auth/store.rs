//! OAuth token persistence
//!
//! Tokens are stored as JSON on disk under the roomctl configuration
//! directory, mirroring where the rest of the configuration lives. The
//! `TokenStore` trait keeps the persistence seam mockable in tests.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use roomctl_domain::{Result, RoomCtlError};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// OAuth 2.0 access and refresh tokens with expiry metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenSet {
    /// Bearer token for API authentication
    pub access_token: String,
    /// Refresh token for obtaining new access tokens.
    /// Optional because providers don't issue one on every exchange.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Token type (always "Bearer" for OAuth 2.0)
    pub token_type: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
    /// Absolute expiration timestamp (UTC), calculated from `expires_in`
    /// at token creation time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    /// Granted scopes (space-separated)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

impl TokenSet {
    /// Create a token set with a calculated expiration timestamp.
    pub fn new(access_token: String, refresh_token: Option<String>, expires_in: i64, scope: Option<String>) -> Self {
        let expires_at =
            (expires_in > 0).then(|| Utc::now() + chrono::Duration::seconds(expires_in));

        Self {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in,
            expires_at,
            scope,
        }
    }

    /// Whether the access token is expired or expires within
    /// `threshold_seconds`. Tokens without an expiry timestamp are assumed
    /// valid.
    pub fn is_expired(&self, threshold_seconds: i64) -> bool {
        match self.expires_at {
            Some(expires_at) => Utc::now() + chrono::Duration::seconds(threshold_seconds) >= expires_at,
            None => false,
        }
    }
}

/// Trait for token persistence
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Load the persisted token set, or `None` when nothing usable is
    /// stored.
    async fn load(&self) -> Result<Option<TokenSet>>;

    /// Persist a token set, replacing any previous one.
    async fn save(&self, tokens: &TokenSet) -> Result<()>;
}

/// JSON-file-backed token store (`~/.roomctl/token.json`).
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Create a store backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn load(&self) -> Result<Option<TokenSet>> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no persisted tokens found");
                return Ok(None);
            }
            Err(e) => {
                return Err(RoomCtlError::Auth(format!(
                    "failed to read token file {}: {e}",
                    self.path.display()
                )))
            }
        };

        match serde_json::from_str::<TokenSet>(&contents) {
            Ok(tokens) => Ok(Some(tokens)),
            Err(e) => {
                // A corrupt token file is recoverable: fall back to the
                // interactive flow instead of hard-failing.
                warn!(path = %self.path.display(), error = %e, "ignoring unparseable token file");
                Ok(None)
            }
        }
    }

    async fn save(&self, tokens: &TokenSet) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                RoomCtlError::Auth(format!("failed to create token directory: {e}"))
            })?;
        }

        let contents = serde_json::to_string_pretty(tokens)
            .map_err(|e| RoomCtlError::Internal(format!("failed to serialize tokens: {e}")))?;

        tokio::fs::write(&self.path, contents).await.map_err(|e| {
            RoomCtlError::Auth(format!("failed to write token file {}: {e}", self.path.display()))
        })?;

        debug!(path = %self.path.display(), "tokens persisted");
        Ok(())
    }
}
