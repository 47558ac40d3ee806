//! Room registry loading
//!
//! The registry is an ordered JSON array of room records. Records pass
//! through `Room::new` so malformed entries are rejected at the
//! configuration boundary with a message naming the offending record.

use std::path::Path;

use roomctl_domain::{Config, Result, Room, RoomCtlError};
use serde::Deserialize;

use super::registry_path;

/// Raw registry record before validation
#[derive(Debug, Deserialize)]
struct RoomRecord {
    id: String,
    name: String,
    floor: i32,
    capacity: u32,
}

/// Load the room registry from the configured location.
///
/// Uses `rooms_path` from the configuration when set, otherwise the default
/// `~/.roomctl/rooms.json`.
///
/// # Errors
/// Returns `RoomCtlError::Config` if the registry file is missing or
/// unparseable, or `RoomCtlError::InvalidInput` for a malformed record.
pub fn load_rooms(config: &Config) -> Result<Vec<Room>> {
    let path = config.rooms_path.as_ref().map_or_else(registry_path, |p| Path::new(p).to_path_buf());
    load_rooms_from(&path)
}

/// Load the room registry from a specific file, preserving record order.
pub fn load_rooms_from(path: &Path) -> Result<Vec<Room>> {
    tracing::debug!(path = %path.display(), "loading room registry");

    let contents = std::fs::read_to_string(path).map_err(|e| {
        RoomCtlError::Config(format!("Failed to read room registry {}: {e}", path.display()))
    })?;

    let records: Vec<RoomRecord> = serde_json::from_str(&contents)
        .map_err(|e| RoomCtlError::Config(format!("Invalid room registry: {e}")))?;

    records
        .into_iter()
        .map(|record| Room::new(record.id, record.name, record.floor, record.capacity))
        .collect()
}
