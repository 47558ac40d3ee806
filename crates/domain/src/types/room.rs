//! Bookable room value object

use serde::Serialize;

use crate::errors::{Result, RoomCtlError};

/// A bookable meeting room, loaded from the room registry at startup.
///
/// Immutable once constructed. `id` is the provider-side calendar identifier
/// the room answers free/busy queries under; `name` is the human-facing
/// display name. Construction validates required fields so malformed registry
/// entries are rejected at the configuration boundary rather than deep in the
/// booking pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Room {
    /// Provider-side calendar identifier (opaque)
    pub id: String,
    /// Display name, assumed unique within the registry
    pub name: String,
    /// Floor the room is on
    pub floor: i32,
    /// Seating capacity (always positive)
    pub capacity: u32,
}

impl Room {
    /// Create a validated room.
    ///
    /// # Errors
    /// Returns `RoomCtlError::InvalidInput` if `id` or `name` is empty
    /// (after trimming) or `capacity` is zero.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        floor: i32,
        capacity: u32,
    ) -> Result<Self> {
        let id = id.into();
        let name = name.into();

        if id.trim().is_empty() {
            return Err(RoomCtlError::InvalidInput("room id must not be empty".to_string()));
        }
        if name.trim().is_empty() {
            return Err(RoomCtlError::InvalidInput(format!(
                "room '{id}' has an empty display name"
            )));
        }
        if capacity == 0 {
            return Err(RoomCtlError::InvalidInput(format!(
                "room '{name}' must have a positive capacity"
            )));
        }

        Ok(Self { id, name, floor, capacity })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_room() {
        let room = Room::new("room-a@resource.calendar.google.com", "Room A", 2, 6)
            .expect("valid room should construct");
        assert_eq!(room.name, "Room A");
        assert_eq!(room.floor, 2);
        assert_eq!(room.capacity, 6);
    }

    #[test]
    fn test_rejects_empty_id() {
        assert!(Room::new("  ", "Room A", 2, 6).is_err());
    }

    #[test]
    fn test_rejects_empty_name() {
        assert!(Room::new("id-1", "", 2, 6).is_err());
    }

    #[test]
    fn test_rejects_zero_capacity() {
        assert!(Room::new("id-1", "Room A", 2, 0).is_err());
    }
}
