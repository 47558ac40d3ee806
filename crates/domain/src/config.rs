//! Configuration structures
//!
//! Deserialized from `config.toml`/`config.json` (see the infra loader) or
//! assembled from `ROOMCTL_*` environment variables. Missing sections fall
//! back to defaults; only the Google client id has no usable default.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_DURATION_MINUTES, DEFAULT_FLOOR, DEFAULT_MIN_CAPACITY};

/// Top-level application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub booking: BookingDefaults,
    #[serde(default)]
    pub google: GoogleConfig,
    /// Override for the room registry path (defaults to
    /// `~/.roomctl/rooms.json`)
    #[serde(default)]
    pub rooms_path: Option<String>,
}

/// Default booking parameters, overridable per invocation via CLI flags
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingDefaults {
    #[serde(default = "default_duration")]
    pub duration_minutes: u32,
    #[serde(default = "default_floor")]
    pub floor: i32,
    #[serde(default = "default_min_capacity")]
    pub min_capacity: u32,
    /// Organizer address added as an attendee of created bookings.
    /// Required for booking, not for listing.
    #[serde(default)]
    pub email: Option<String>,
}

impl Default for BookingDefaults {
    fn default() -> Self {
        Self {
            duration_minutes: default_duration(),
            floor: default_floor(),
            min_capacity: default_min_capacity(),
            email: None,
        }
    }
}

/// Google OAuth client settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GoogleConfig {
    #[serde(default)]
    pub client_id: Option<String>,
    /// Optional for installed applications using PKCE
    #[serde(default)]
    pub client_secret: Option<String>,
}

fn default_duration() -> u32 {
    DEFAULT_DURATION_MINUTES
}

fn default_floor() -> i32 {
    DEFAULT_FLOOR
}

fn default_min_capacity() -> u32 {
    DEFAULT_MIN_CAPACITY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_values() {
        let defaults = BookingDefaults::default();
        assert_eq!(defaults.duration_minutes, 30);
        assert_eq!(defaults.floor, 3);
        assert_eq!(defaults.min_capacity, 1);
        assert!(defaults.email.is_none());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [booking]
            duration_minutes = 45
            email = "user@example.com"
            "#,
        )
        .unwrap();
        assert_eq!(config.booking.duration_minutes, 45);
        assert_eq!(config.booking.floor, 3);
        assert_eq!(config.booking.min_capacity, 1);
        assert_eq!(config.booking.email.as_deref(), Some("user@example.com"));
    }
}
