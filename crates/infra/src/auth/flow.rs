//! OAuth2 credential flow for the Google Calendar API
//!
//! The authenticator owns the full lifecycle behind a single idempotent
//! "ensure valid credential" operation: persisted tokens are reused while
//! valid, refreshed silently when near expiry, and obtained through the
//! interactive PKCE consent flow (loopback callback server) when nothing
//! usable is stored. Tokens are persisted on every successful path.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use axum::extract::Query;
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use roomctl_domain::{GoogleConfig, Result, RoomCtlError};
use serde::Deserialize;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{error, info};
use url::Url;

use super::pkce::PkceChallenge;
use super::store::{TokenSet, TokenStore};

const GOOGLE_AUTH_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const GOOGLE_TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
const SCOPES: &[&str] = &[
    "https://www.googleapis.com/auth/calendar",
    "https://www.googleapis.com/auth/calendar.events",
];
/// Refresh tokens this many seconds before expiry
const REFRESH_THRESHOLD_SECONDS: i64 = 300;
/// How long to wait for the user to complete the consent flow
const LOGIN_TIMEOUT: Duration = Duration::from_secs(300);

/// Supplies a valid bearer credential for calendar API calls.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Current access token, refreshed if necessary. Fails when no
    /// credential is stored and interaction would be required.
    async fn access_token(&self) -> Result<String>;
}

/// Google OAuth authenticator with on-disk token persistence.
pub struct GoogleAuthenticator<S: TokenStore> {
    http: reqwest::Client,
    client_id: String,
    client_secret: Option<String>,
    auth_endpoint: String,
    token_endpoint: String,
    store: S,
    refresh_threshold_seconds: i64,
}

impl<S: TokenStore> GoogleAuthenticator<S> {
    /// Create an authenticator from the Google client configuration.
    ///
    /// # Errors
    /// Returns `RoomCtlError::Config` when no client id is configured.
    pub fn new(config: &GoogleConfig, store: S) -> Result<Self> {
        let client_id = config
            .client_id
            .clone()
            .ok_or_else(|| {
                RoomCtlError::Config(
                    "google.client_id is not configured (set it in config.toml or ROOMCTL_CLIENT_ID)"
                        .to_string(),
                )
            })?;

        Ok(Self {
            http: reqwest::Client::new(),
            client_id,
            client_secret: config.client_secret.clone(),
            auth_endpoint: GOOGLE_AUTH_ENDPOINT.to_string(),
            token_endpoint: GOOGLE_TOKEN_ENDPOINT.to_string(),
            store,
            refresh_threshold_seconds: REFRESH_THRESHOLD_SECONDS,
        })
    }

    /// Override OAuth endpoints (tests)
    pub fn with_endpoints(mut self, auth_endpoint: String, token_endpoint: String) -> Self {
        self.auth_endpoint = auth_endpoint;
        self.token_endpoint = token_endpoint;
        self
    }

    /// Ensure a valid access token exists, persisting tokens on every
    /// successful path.
    ///
    /// `prompt` is invoked with the authorization URL when interactive
    /// consent is required; the user completes it in a browser while this
    /// call waits for the loopback callback.
    pub async fn ensure_access_token<F>(&self, prompt: F) -> Result<String>
    where
        F: FnOnce(&str),
    {
        if let Some(tokens) = self.store.load().await? {
            if !tokens.is_expired(self.refresh_threshold_seconds) {
                return Ok(tokens.access_token);
            }
            if tokens.refresh_token.is_some() {
                let refreshed = self.refresh(&tokens).await?;
                self.store.save(&refreshed).await?;
                info!("access token refreshed");
                return Ok(refreshed.access_token);
            }
        }

        let tokens = self.interactive_login(prompt).await?;
        self.store.save(&tokens).await?;
        info!("interactive consent completed, tokens persisted");
        Ok(tokens.access_token)
    }

    /// Exchange the stored refresh token for a fresh access token.
    async fn refresh(&self, tokens: &TokenSet) -> Result<TokenSet> {
        let refresh_token = tokens
            .refresh_token
            .as_deref()
            .ok_or_else(|| RoomCtlError::Auth("no refresh token available".to_string()))?;

        let mut params = vec![
            ("client_id", self.client_id.as_str()),
            ("refresh_token", refresh_token),
            ("grant_type", "refresh_token"),
        ];
        if let Some(secret) = self.client_secret.as_deref() {
            params.push(("client_secret", secret));
        }

        let response = self.token_request(&params).await?;

        // Google omits the refresh token from refresh responses; keep the
        // one we already hold.
        Ok(TokenSet::new(
            response.access_token,
            response.refresh_token.or_else(|| tokens.refresh_token.clone()),
            response.expires_in,
            response.scope,
        ))
    }

    /// Run the interactive PKCE consent flow through a loopback server.
    async fn interactive_login<F>(&self, prompt: F) -> Result<TokenSet>
    where
        F: FnOnce(&str),
    {
        let server = OAuthCallbackServer::start().await?;
        let redirect_uri = server.redirect_uri();
        let pkce = PkceChallenge::generate();

        server.set_expected_state(pkce.state.clone());
        let authorization_url = self.build_authorize_url(&redirect_uri, &pkce)?;
        prompt(&authorization_url);

        let code = server.wait_for_code(LOGIN_TIMEOUT).await?;

        let mut params = vec![
            ("client_id", self.client_id.as_str()),
            ("code", code.as_str()),
            ("code_verifier", pkce.code_verifier.as_str()),
            ("grant_type", "authorization_code"),
            ("redirect_uri", redirect_uri.as_str()),
        ];
        if let Some(secret) = self.client_secret.as_deref() {
            params.push(("client_secret", secret));
        }

        let response = self.token_request(&params).await?;
        server.shutdown().await?;

        Ok(TokenSet::new(
            response.access_token,
            response.refresh_token,
            response.expires_in,
            response.scope,
        ))
    }

    fn build_authorize_url(&self, redirect_uri: &str, pkce: &PkceChallenge) -> Result<String> {
        let url = Url::parse_with_params(
            &self.auth_endpoint,
            &[
                ("client_id", self.client_id.as_str()),
                ("redirect_uri", redirect_uri),
                ("response_type", "code"),
                ("scope", SCOPES.join(" ").as_str()),
                ("code_challenge", pkce.code_challenge.as_str()),
                ("code_challenge_method", pkce.challenge_method()),
                ("state", pkce.state.as_str()),
                // Offline access so a refresh token is issued
                ("access_type", "offline"),
                ("prompt", "consent"),
            ],
        )
        .map_err(|e| RoomCtlError::Config(format!("invalid OAuth endpoint URL: {e}")))?;

        Ok(url.into())
    }

    async fn token_request(&self, params: &[(&str, &str)]) -> Result<TokenExchangeResponse> {
        let response = self
            .http
            .post(&self.token_endpoint)
            .form(params)
            .send()
            .await
            .map_err(|e| RoomCtlError::Auth(format!("Token request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(RoomCtlError::Auth(format!(
                "Token request failed ({status}): {error_text}"
            )));
        }

        response
            .json::<TokenExchangeResponse>()
            .await
            .map_err(|e| RoomCtlError::Auth(format!("Failed to parse token response: {e}")))
    }
}

#[async_trait]
impl<S: TokenStore> AccessTokenProvider for GoogleAuthenticator<S> {
    async fn access_token(&self) -> Result<String> {
        let Some(tokens) = self.store.load().await? else {
            return Err(RoomCtlError::Auth(
                "not authenticated; run roomctl once to complete the consent flow".to_string(),
            ));
        };

        if !tokens.is_expired(self.refresh_threshold_seconds) {
            return Ok(tokens.access_token);
        }

        let refreshed = self.refresh(&tokens).await?;
        self.store.save(&refreshed).await?;
        Ok(refreshed.access_token)
    }
}

/// Token endpoint response (authorization-code and refresh grants)
#[derive(Debug, Deserialize)]
struct TokenExchangeResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    expires_in: i64,
    #[serde(default)]
    scope: Option<String>,
}

/// OAuth callback data captured by the loopback server.
#[derive(Debug, Clone)]
struct OAuthCallbackData {
    code: String,
}

/// Loopback HTTP server that receives OAuth redirect callbacks.
pub struct OAuthCallbackServer {
    port: u16,
    callback_data: Arc<StdMutex<Option<OAuthCallbackData>>>,
    expected_state: Arc<StdMutex<Option<String>>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl OAuthCallbackServer {
    /// Start the loopback server on an ephemeral port.
    pub async fn start() -> Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await.map_err(|err| {
            RoomCtlError::Network(format!("failed to bind OAuth loopback server: {err}"))
        })?;

        let port = listener
            .local_addr()
            .map_err(|err| RoomCtlError::Network(format!("failed to determine port: {err}")))?
            .port();

        let callback_data = Arc::new(StdMutex::new(None));
        let expected_state = Arc::new(StdMutex::new(None));

        let callback_data_clone = callback_data.clone();
        let expected_state_clone = expected_state.clone();

        let app = Router::new().route(
            "/callback",
            get(move |query: Query<HashMap<String, String>>| {
                handle_oauth_callback(
                    query,
                    callback_data_clone.clone(),
                    expected_state_clone.clone(),
                )
            }),
        );

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let handle = tokio::spawn(async move {
            if let Err(err) = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await
            {
                error!("OAuth callback server error: {}", err);
            }
        });

        Ok(Self {
            port,
            callback_data,
            expected_state,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        })
    }

    /// Redirect URI used in the authorization request.
    pub fn redirect_uri(&self) -> String {
        format!("http://localhost:{}/callback", self.port)
    }

    /// Configure expected OAuth state for CSRF validation.
    pub fn set_expected_state(&self, state: String) {
        let mut guard = self.expected_state.lock().expect("expected_state poisoned");
        *guard = Some(state);
    }

    /// Await the OAuth callback with a timeout.
    pub async fn wait_for_code(&self, timeout: Duration) -> Result<String> {
        {
            let guard = self.expected_state.lock().expect("expected_state poisoned");
            if guard.is_none() {
                return Err(RoomCtlError::Config(
                    "OAuth expected state not configured".to_string(),
                ));
            }
        }

        let deadline = Instant::now() + timeout;

        loop {
            {
                let data_guard = self.callback_data.lock().expect("callback_data poisoned");
                if let Some(data) = data_guard.clone() {
                    return Ok(data.code);
                }
            }

            if Instant::now() > deadline {
                return Err(RoomCtlError::Network(
                    "OAuth callback timeout waiting for authorization code".to_string(),
                ));
            }

            sleep(Duration::from_millis(100)).await;
        }
    }

    /// Shut down the loopback server gracefully.
    pub async fn shutdown(mut self) -> Result<()> {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }

        if let Some(handle) = self.handle.take() {
            if let Err(err) = handle.await {
                if err.is_panic() {
                    return Err(RoomCtlError::Internal(format!(
                        "OAuth callback server panicked: {err}"
                    )));
                }
            }
        }

        Ok(())
    }
}

impl Drop for OAuthCallbackServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            if !handle.is_finished() {
                handle.abort();
            }
        }
    }
}

async fn handle_oauth_callback(
    Query(params): Query<HashMap<String, String>>,
    callback_data: Arc<StdMutex<Option<OAuthCallbackData>>>,
    expected_state: Arc<StdMutex<Option<String>>>,
) -> Html<&'static str> {
    let code = params.get("code").cloned();
    let state = params.get("state").cloned();
    let expected = expected_state.lock().expect("expected_state poisoned").clone();

    match (code, state, expected) {
        (Some(code), Some(state), Some(expected_state)) if state == expected_state => {
            let mut guard = callback_data.lock().expect("callback_data poisoned");
            *guard = Some(OAuthCallbackData { code });

            Html(
                r#"<!DOCTYPE html>
<html>
<head><title>Authorization Complete</title></head>
<body><h1>Authorization Successful</h1><p>You can close this window.</p></body>
</html>"#,
            )
        }
        _ => Html(
            r#"<!DOCTYPE html>
<html>
<head><title>Authorization Failed</title></head>
<body><h1>Authorization Failed</h1><p>Invalid or unexpected callback parameters.</p></body>
</html>"#,
        ),
    }
}
