//! Room selection pipeline
//!
//! Pure functions that narrow the resolved available rooms down to the one
//! to book: constraint filtering, deterministic ranking, and selection by
//! name or by rank.

use roomctl_domain::Room;

/// Keep rooms matching the given constraints.
///
/// A room passes when its floor equals `floor` (if given) and its capacity
/// is at least `min_capacity` (if given). Absent constraints pass everything
/// through. Input ordering is preserved.
pub fn filter(rooms: &[Room], floor: Option<i32>, min_capacity: Option<u32>) -> Vec<Room> {
    rooms
        .iter()
        .filter(|room| floor.map_or(true, |f| room.floor == f))
        .filter(|room| min_capacity.map_or(true, |c| room.capacity >= c))
        .cloned()
        .collect()
}

/// Sort rooms ascending by `(floor, capacity)`, ties broken by input order.
///
/// Lower floors first, then tighter capacity: auto-selection prefers the
/// most appropriately-sized room rather than an oversized one.
pub fn rank(rooms: &[Room]) -> Vec<Room> {
    let mut ranked = rooms.to_vec();
    ranked.sort_by_key(|room| (room.floor, room.capacity));
    ranked
}

/// First room whose name matches `name`, ignoring case and surrounding
/// whitespace. Name collisions are not an error; first match wins.
pub fn select_by_name<'a>(rooms: &'a [Room], name: &str) -> Option<&'a Room> {
    let wanted = name.trim().to_lowercase();
    rooms.iter().find(|room| room.name.trim().to_lowercase() == wanted)
}

/// First room of a ranked list, or `None` when no room is available.
pub fn select_default(rooms: &[Room]) -> Option<&Room> {
    rooms.first()
}
