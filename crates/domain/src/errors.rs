//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for roomctl
#[derive(Error, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum RoomCtlError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Availability query failed: {0}")]
    Query(String),

    #[error("Booking failed: {0}")]
    Booking(String),

    #[error("No available rooms found for booking.")]
    NoRoomAvailable,

    #[error("Room named '{0}' is not available.")]
    RoomNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for roomctl operations
pub type Result<T> = std::result::Result<T, RoomCtlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_names_room() {
        let err = RoomCtlError::RoomNotFound("Boardroom".to_string());
        assert!(err.to_string().contains("Boardroom"));
    }

    #[test]
    fn test_error_serializes_with_tag() {
        let err = RoomCtlError::Query("freebusy timeout".to_string());
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["type"], "Query");
        assert_eq!(json["message"], "freebusy timeout");
    }
}
