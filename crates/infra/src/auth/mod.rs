//! OAuth2 credential acquisition and persistence
//!
//! Implements the "ensure valid credential" lifecycle for the Google
//! Calendar API: load the persisted token, refresh it silently when near
//! expiry, or run the interactive PKCE consent flow through a loopback
//! callback server. Every successful path persists the resulting tokens.

mod flow;
mod pkce;
mod store;

pub use flow::{AccessTokenProvider, GoogleAuthenticator, OAuthCallbackServer};
pub use pkce::PkceChallenge;
pub use store::{FileTokenStore, TokenSet, TokenStore};
