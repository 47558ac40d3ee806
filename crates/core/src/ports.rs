//! Calendar gateway port interface
//!
//! The remote calendar service is the source of truth for availability and
//! event creation; this system owns only the request/response shaping around
//! it. Infrastructure adapters implement this trait.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use roomctl_domain::{BusyInterval, Result, TimeWindow};

/// Per-calendar busy schedules, keyed by calendar id.
///
/// Rebuilt on every free/busy query; never cached across calls so results
/// always reflect live provider state. A calendar id the provider omitted
/// from its response is simply absent from the map.
pub type FreeBusySchedules = HashMap<String, Vec<BusyInterval>>;

/// Draft of a calendar event to be created on the organizer's calendar.
#[derive(Debug, Clone)]
pub struct EventDraft {
    pub summary: String,
    pub description: String,
    pub window: TimeWindow,
    /// Calendar the event is inserted on
    pub organizer_email: String,
    /// Attendee addresses (room calendar id and organizer)
    pub attendees: Vec<String>,
    /// Client-generated id for the conferencing allocation request
    pub conference_request_id: String,
}

/// Identifiers and links returned by the provider after event creation.
#[derive(Debug, Clone)]
pub struct CreatedEvent {
    pub id: String,
    pub html_link: Option<String>,
    /// Conferencing link; may be absent while the provider allocates one
    pub conference_link: Option<String>,
}

/// Trait for calendar provider operations
#[async_trait]
pub trait CalendarGateway: Send + Sync {
    /// Query busy intervals for a set of calendars over a time window.
    async fn query_free_busy(
        &self,
        window: TimeWindow,
        calendar_ids: &[String],
    ) -> Result<FreeBusySchedules>;

    /// Start of the earliest event at or after `from` on one calendar, or
    /// `None` when the calendar has no upcoming event.
    async fn next_event_start(
        &self,
        calendar_id: &str,
        from: DateTime<Utc>,
    ) -> Result<Option<DateTime<Utc>>>;

    /// Create a calendar event, requesting a conferencing link.
    async fn create_event(&self, draft: &EventDraft) -> Result<CreatedEvent>;
}
