//! Configuration and room-registry loading

mod loader;
mod registry;

use std::path::PathBuf;

use roomctl_domain::constants::{CONFIG_DIR_NAME, ROOMS_FILE_NAME, TOKEN_FILE_NAME};

pub use loader::{load_config, load_config_from, parse_config};
pub use registry::{load_rooms, load_rooms_from};

/// Directory holding roomctl configuration (`~/.roomctl`).
///
/// Falls back to the current directory when the home directory cannot be
/// determined (containerized environments).
pub fn config_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(CONFIG_DIR_NAME)
}

/// Default room registry location (`~/.roomctl/rooms.json`)
pub fn registry_path() -> PathBuf {
    config_dir().join(ROOMS_FILE_NAME)
}

/// Persisted OAuth token location (`~/.roomctl/token.json`)
pub fn token_path() -> PathBuf {
    config_dir().join(TOKEN_FILE_NAME)
}
