//! Google Calendar gateway implementation

use std::sync::Arc;
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use reqwest::StatusCode;
use roomctl_core::ports::{CalendarGateway, CreatedEvent, EventDraft, FreeBusySchedules};
use roomctl_domain::{BusyInterval, Result, RoomCtlError, TimeWindow};
use tracing::{debug, warn};

use super::wire::{
    ConferenceCreateRequest, ConferenceData, ConferenceSolutionKey, EventAttendee,
    EventInsertRequest, EventInsertResponse, EventTimeSpec, EventsResponse, FreeBusyRequest,
    FreeBusyRequestItem, FreeBusyResponse,
};
use crate::auth::AccessTokenProvider;

const GOOGLE_CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3";
/// Bound on every calendar API call; no retry on top (at-most-once booking)
const HTTP_TIMEOUT: StdDuration = StdDuration::from_secs(30);
const CONFERENCE_SOLUTION: &str = "hangoutsMeet";

/// Google Calendar API client implementing the core gateway port.
///
/// Every call is a single bounded attempt: failures surface immediately
/// rather than being retried, so a booking can never be submitted twice.
pub struct GoogleCalendarGateway {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn AccessTokenProvider>,
}

impl GoogleCalendarGateway {
    /// Create a gateway using the given credential provider.
    ///
    /// # Errors
    /// Returns `RoomCtlError::Internal` if the HTTP client cannot be built.
    pub fn new(tokens: Arc<dyn AccessTokenProvider>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| RoomCtlError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, base_url: GOOGLE_CALENDAR_API_BASE.to_string(), tokens })
    }

    /// Override the API base URL (tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl CalendarGateway for GoogleCalendarGateway {
    async fn query_free_busy(
        &self,
        window: TimeWindow,
        calendar_ids: &[String],
    ) -> Result<FreeBusySchedules> {
        let access_token = self.tokens.access_token().await?;
        let url = format!("{}/freeBusy", self.base_url);

        let body = FreeBusyRequest {
            time_min: window.start().to_rfc3339(),
            time_max: window.end().to_rfc3339(),
            time_zone: "UTC",
            items: calendar_ids
                .iter()
                .map(|id| FreeBusyRequestItem { id: id.clone() })
                .collect(),
        };

        debug!(calendars = calendar_ids.len(), "querying free/busy");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&access_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| RoomCtlError::Query(format!("free/busy request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(api_error(response, "free/busy query", RoomCtlError::Query).await);
        }

        let parsed: FreeBusyResponse = response
            .json()
            .await
            .map_err(|e| RoomCtlError::Query(format!("failed to parse free/busy response: {e}")))?;

        let mut schedules = FreeBusySchedules::new();
        for (calendar_id, calendar) in parsed.calendars {
            if !calendar.errors.is_empty() {
                // An errored calendar answers with an empty busy list; keep
                // it out of the map so it resolves as unavailable.
                let reasons: Vec<&str> =
                    calendar.errors.iter().map(|e| e.reason.as_str()).collect();
                warn!(calendar_id = %calendar_id, ?reasons, "free/busy lookup failed for calendar");
                continue;
            }

            let busy = calendar
                .busy
                .into_iter()
                .map(|interval| {
                    Ok(BusyInterval {
                        start: parse_rfc3339(&interval.start)?,
                        end: parse_rfc3339(&interval.end)?,
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            schedules.insert(calendar_id, busy);
        }

        Ok(schedules)
    }

    async fn next_event_start(
        &self,
        calendar_id: &str,
        from: DateTime<Utc>,
    ) -> Result<Option<DateTime<Utc>>> {
        let access_token = self.tokens.access_token().await?;
        let url =
            format!("{}/calendars/{}/events", self.base_url, urlencoding::encode(calendar_id));

        let response = self
            .http
            .get(&url)
            .bearer_auth(&access_token)
            .query(&[
                ("timeMin", from.to_rfc3339()),
                ("maxResults", "1".to_string()),
                ("singleEvents", "true".to_string()),
                ("orderBy", "startTime".to_string()),
            ])
            .send()
            .await
            .map_err(|e| RoomCtlError::Query(format!("next-event request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(api_error(response, "next-event query", RoomCtlError::Query).await);
        }

        let parsed: EventsResponse = response
            .json()
            .await
            .map_err(|e| RoomCtlError::Query(format!("failed to parse events response: {e}")))?;

        let Some(event) = parsed.items.into_iter().next() else {
            return Ok(None);
        };

        if let Some(date_time) = event.start.date_time.as_deref() {
            return parse_rfc3339(date_time).map(Some);
        }
        if let Some(date) = event.start.date.as_deref() {
            // All-day events carry a bare date; treat it as midnight UTC
            let day = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|e| {
                RoomCtlError::Query(format!("invalid all-day event date '{date}': {e}"))
            })?;
            return Ok(Some(DateTime::from_naive_utc_and_offset(
                day.and_time(NaiveTime::MIN),
                Utc,
            )));
        }

        warn!(calendar_id, "event without start time in provider response");
        Ok(None)
    }

    async fn create_event(&self, draft: &EventDraft) -> Result<CreatedEvent> {
        let access_token = self.tokens.access_token().await?;
        let url = format!(
            "{}/calendars/{}/events",
            self.base_url,
            urlencoding::encode(&draft.organizer_email)
        );

        let body = EventInsertRequest {
            summary: draft.summary.clone(),
            description: draft.description.clone(),
            start: EventTimeSpec {
                date_time: draft.window.start().to_rfc3339(),
                time_zone: "UTC",
            },
            end: EventTimeSpec { date_time: draft.window.end().to_rfc3339(), time_zone: "UTC" },
            attendees: draft
                .attendees
                .iter()
                .map(|email| EventAttendee { email: email.clone() })
                .collect(),
            conference_data: ConferenceData {
                create_request: ConferenceCreateRequest {
                    request_id: draft.conference_request_id.clone(),
                    conference_solution_key: ConferenceSolutionKey {
                        solution_type: CONFERENCE_SOLUTION,
                    },
                },
            },
        };

        debug!(summary = %draft.summary, "creating calendar event");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&access_token)
            .query(&[("conferenceDataVersion", "1")])
            .json(&body)
            .send()
            .await
            .map_err(|e| RoomCtlError::Booking(format!("event creation request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(api_error(response, "event creation", RoomCtlError::Booking).await);
        }

        let parsed: EventInsertResponse = response.json().await.map_err(|e| {
            RoomCtlError::Booking(format!("failed to parse event creation response: {e}"))
        })?;

        Ok(CreatedEvent {
            id: parsed.id,
            html_link: parsed.html_link,
            conference_link: parsed.hangout_link,
        })
    }
}

/// Map a non-2xx provider response to a domain error, naming the operation.
/// Credential rejections map to `Auth` regardless of operation.
async fn api_error(
    response: reqwest::Response,
    operation: &str,
    to_error: fn(String) -> RoomCtlError,
) -> RoomCtlError {
    let status = response.status();
    let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
    let message = format!("Google API error during {operation} ({status}): {error_text}");

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => RoomCtlError::Auth(message),
        _ => to_error(message),
    }
}

fn parse_rfc3339(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RoomCtlError::Query(format!("invalid timestamp '{value}': {e}")))
}
