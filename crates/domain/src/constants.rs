//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Booking defaults (overridable via configuration)
pub const DEFAULT_DURATION_MINUTES: u32 = 30;
pub const DEFAULT_FLOOR: i32 = 3;
pub const DEFAULT_MIN_CAPACITY: u32 = 1;

// Free/busy queries are batched to respect provider-side query limits
pub const DEFAULT_FREEBUSY_BATCH_SIZE: usize = 10;

// Configuration file layout (under the user's home directory)
pub const CONFIG_DIR_NAME: &str = ".roomctl";
pub const CONFIG_FILE_STEM: &str = "config";
pub const ROOMS_FILE_NAME: &str = "rooms.json";
pub const TOKEN_FILE_NAME: &str = "token.json";

// Event content for automatically scheduled bookings
pub const EVENT_SUMMARY_PREFIX: &str = "Meeting in Room: ";
pub const EVENT_DESCRIPTION: &str = "Automatically scheduled meeting.";
