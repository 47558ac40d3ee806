//! Wire types for the Google Calendar v3 API

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Free/busy query
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct FreeBusyRequest {
    #[serde(rename = "timeMin")]
    pub time_min: String,
    #[serde(rename = "timeMax")]
    pub time_max: String,
    #[serde(rename = "timeZone")]
    pub time_zone: &'static str,
    pub items: Vec<FreeBusyRequestItem>,
}

#[derive(Debug, Serialize)]
pub struct FreeBusyRequestItem {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct FreeBusyResponse {
    #[serde(default)]
    pub calendars: HashMap<String, FreeBusyCalendar>,
}

#[derive(Debug, Deserialize)]
pub struct FreeBusyCalendar {
    #[serde(default)]
    pub busy: Vec<WireInterval>,
    /// Populated when the calendar could not be queried (access problems);
    /// such entries carry an empty busy list and must not read as "free"
    #[serde(default)]
    pub errors: Vec<FreeBusyCalendarError>,
}

#[derive(Debug, Deserialize)]
pub struct WireInterval {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Deserialize)]
pub struct FreeBusyCalendarError {
    #[serde(default)]
    pub reason: String,
}

// ---------------------------------------------------------------------------
// Events listing (next-event lookahead)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct EventsResponse {
    #[serde(default)]
    pub items: Vec<WireEvent>,
}

#[derive(Debug, Deserialize)]
pub struct WireEvent {
    pub start: WireEventTime,
}

#[derive(Debug, Deserialize)]
pub struct WireEventTime {
    /// Set for timed events
    #[serde(rename = "dateTime")]
    pub date_time: Option<String>,
    /// Set for all-day events
    pub date: Option<String>,
}

// ---------------------------------------------------------------------------
// Event creation
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct EventInsertRequest {
    pub summary: String,
    pub description: String,
    pub start: EventTimeSpec,
    pub end: EventTimeSpec,
    pub attendees: Vec<EventAttendee>,
    #[serde(rename = "conferenceData")]
    pub conference_data: ConferenceData,
}

#[derive(Debug, Serialize)]
pub struct EventTimeSpec {
    #[serde(rename = "dateTime")]
    pub date_time: String,
    #[serde(rename = "timeZone")]
    pub time_zone: &'static str,
}

#[derive(Debug, Serialize)]
pub struct EventAttendee {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct ConferenceData {
    #[serde(rename = "createRequest")]
    pub create_request: ConferenceCreateRequest,
}

#[derive(Debug, Serialize)]
pub struct ConferenceCreateRequest {
    #[serde(rename = "requestId")]
    pub request_id: String,
    #[serde(rename = "conferenceSolutionKey")]
    pub conference_solution_key: ConferenceSolutionKey,
}

#[derive(Debug, Serialize)]
pub struct ConferenceSolutionKey {
    #[serde(rename = "type")]
    pub solution_type: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct EventInsertResponse {
    pub id: String,
    #[serde(rename = "htmlLink")]
    pub html_link: Option<String>,
    #[serde(rename = "hangoutLink")]
    pub hangout_link: Option<String>,
}
