//! Google Calendar gateway adapter
//!
//! Implements the core `CalendarGateway` port against the Google Calendar
//! v3 REST API. The remote API is the source of truth; this module owns
//! only request/response shaping.

mod gateway;
mod wire;

pub use gateway::GoogleCalendarGateway;
