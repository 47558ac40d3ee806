//! # roomctl Application
//!
//! CLI surface and wiring for the room-booking assistant: argument
//! parsing, application context assembly, and console output.

pub mod cli;
pub mod commands;
pub mod context;
pub mod output;

pub use cli::{Cli, RunOptions};
pub use context::AppContext;
