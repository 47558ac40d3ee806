//! Configuration loader
//!
//! Loads application configuration from files with environment overrides.
//!
//! ## Loading Strategy
//! 1. Probes for a config file (`~/.roomctl/config.{toml,json}`, then
//!    `./config.{toml,json}`); missing file means pure defaults
//! 2. Applies `ROOMCTL_*` environment variable overrides on top
//! 3. Supports TOML and JSON formats (detected by file extension)
//!
//! ## Environment Variables
//! - `ROOMCTL_CONFIG`: Explicit config file path (skips probing)
//! - `ROOMCTL_DURATION`: Default booking duration in minutes
//! - `ROOMCTL_FLOOR`: Default floor filter
//! - `ROOMCTL_MIN_CAPACITY`: Default minimum capacity
//! - `ROOMCTL_EMAIL`: Organizer email
//! - `ROOMCTL_CLIENT_ID` / `ROOMCTL_CLIENT_SECRET`: Google OAuth client
//! - `ROOMCTL_ROOMS`: Room registry path

use std::path::{Path, PathBuf};

use roomctl_domain::constants::CONFIG_FILE_STEM;
use roomctl_domain::{Config, Result, RoomCtlError};

use super::config_dir;

/// Load configuration with defaults, file, and environment fallback chain.
///
/// # Errors
/// Returns `RoomCtlError::Config` if an explicitly named file is missing,
/// a found file fails to parse, or an environment override has an invalid
/// value.
pub fn load_config() -> Result<Config> {
    let config = match explicit_path()?.or_else(probe_config_paths) {
        Some(path) => load_config_from(&path)?,
        None => {
            tracing::debug!("no config file found, using defaults");
            Config::default()
        }
    };
    apply_env_overrides(config)
}

/// Load configuration from a specific file.
///
/// # Errors
/// Returns `RoomCtlError::Config` if the file cannot be read or parsed.
pub fn load_config_from(path: &Path) -> Result<Config> {
    tracing::info!(path = %path.display(), "loading configuration from file");

    let contents = std::fs::read_to_string(path)
        .map_err(|e| RoomCtlError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, path)
}

/// Parse configuration from string content.
///
/// Format is detected by file extension (`.toml` or `.json`).
pub fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| RoomCtlError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| RoomCtlError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(RoomCtlError::Config(format!("Unsupported config format: {extension}"))),
    }
}

fn explicit_path() -> Result<Option<PathBuf>> {
    match std::env::var("ROOMCTL_CONFIG") {
        Ok(raw) => {
            let path = PathBuf::from(raw);
            if path.exists() {
                Ok(Some(path))
            } else {
                Err(RoomCtlError::Config(format!("Config file not found: {}", path.display())))
            }
        }
        Err(_) => Ok(None),
    }
}

/// Probe the standard locations for a configuration file.
///
/// Searches `~/.roomctl` first, then the current working directory.
fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    let home = config_dir();
    candidates.push(home.join(format!("{CONFIG_FILE_STEM}.toml")));
    candidates.push(home.join(format!("{CONFIG_FILE_STEM}.json")));

    if let Ok(cwd) = std::env::current_dir() {
        candidates.push(cwd.join(format!("{CONFIG_FILE_STEM}.toml")));
        candidates.push(cwd.join(format!("{CONFIG_FILE_STEM}.json")));
    }

    candidates.into_iter().find(|path| path.exists())
}

fn apply_env_overrides(mut config: Config) -> Result<Config> {
    if let Some(duration) = env_parsed::<u32>("ROOMCTL_DURATION")? {
        config.booking.duration_minutes = duration;
    }
    if let Some(floor) = env_parsed::<i32>("ROOMCTL_FLOOR")? {
        config.booking.floor = floor;
    }
    if let Some(capacity) = env_parsed::<u32>("ROOMCTL_MIN_CAPACITY")? {
        config.booking.min_capacity = capacity;
    }
    if let Ok(email) = std::env::var("ROOMCTL_EMAIL") {
        config.booking.email = Some(email);
    }
    if let Ok(client_id) = std::env::var("ROOMCTL_CLIENT_ID") {
        config.google.client_id = Some(client_id);
    }
    if let Ok(secret) = std::env::var("ROOMCTL_CLIENT_SECRET") {
        config.google.client_secret = Some(secret);
    }
    if let Ok(rooms) = std::env::var("ROOMCTL_ROOMS") {
        config.rooms_path = Some(rooms);
    }
    Ok(config)
}

fn env_parsed<T: std::str::FromStr>(name: &str) -> Result<Option<T>>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|e| RoomCtlError::Config(format!("Invalid value for {name}: {e}"))),
        Err(_) => Ok(None),
    }
}
