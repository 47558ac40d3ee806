//! Booking orchestration
//!
//! Turns a booking request into a calendar event via the gateway. Exactly
//! one booking is issued per process run, and a failed creation is never
//! retried: a retry could create a duplicate event, so at-most-once
//! semantics win over at-least-once here.

use std::sync::Arc;

use chrono::{Duration, Utc};
use roomctl_domain::constants::{EVENT_DESCRIPTION, EVENT_SUMMARY_PREFIX};
use roomctl_domain::{BookingReceipt, BookingRequest, Result, TimeWindow};
use tracing::{debug, info};
use uuid::Uuid;

use crate::ports::{CalendarGateway, EventDraft};

/// Books a room by creating a calendar event on the organizer's calendar.
pub struct BookingService {
    gateway: Arc<dyn CalendarGateway>,
}

impl BookingService {
    /// Create a new booking service.
    pub fn new(gateway: Arc<dyn CalendarGateway>) -> Self {
        Self { gateway }
    }

    /// Create an event spanning `[now, now + duration)` in UTC, with the
    /// room's calendar id and the organizer as attendees and a conferencing
    /// link requested from the provider.
    ///
    /// # Errors
    /// Gateway failures propagate as `RoomCtlError::Booking`; the room is
    /// reported as not booked and no retry is attempted.
    pub async fn book(&self, request: &BookingRequest) -> Result<BookingReceipt> {
        let window = TimeWindow::starting_at(
            Utc::now(),
            Duration::minutes(i64::from(request.duration_minutes)),
        )?;

        let draft = EventDraft {
            summary: format!("{EVENT_SUMMARY_PREFIX}{}", request.room.name),
            description: EVENT_DESCRIPTION.to_string(),
            window,
            organizer_email: request.organizer_email.clone(),
            attendees: vec![request.room.id.clone(), request.organizer_email.clone()],
            conference_request_id: Uuid::new_v4().to_string(),
        };

        debug!(
            room = %request.room.name,
            duration_minutes = request.duration_minutes,
            "submitting booking event"
        );

        let created = self.gateway.create_event(&draft).await?;

        info!(room = %request.room.name, event_id = %created.id, "room booked");

        Ok(BookingReceipt {
            event_id: created.id,
            event_link: created.html_link,
            conference_link: created.conference_link,
            room: request.room.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use roomctl_domain::{Room, RoomCtlError};

    use super::*;
    use crate::ports::{CreatedEvent, FreeBusySchedules};

    struct RecordingGateway {
        drafts: Mutex<Vec<EventDraft>>,
        fail: bool,
    }

    impl RecordingGateway {
        fn new() -> Self {
            Self { drafts: Mutex::new(Vec::new()), fail: false }
        }

        fn failing() -> Self {
            Self { drafts: Mutex::new(Vec::new()), fail: true }
        }
    }

    #[async_trait]
    impl CalendarGateway for RecordingGateway {
        async fn query_free_busy(
            &self,
            _window: TimeWindow,
            _calendar_ids: &[String],
        ) -> Result<FreeBusySchedules> {
            Ok(FreeBusySchedules::new())
        }

        async fn next_event_start(
            &self,
            _calendar_id: &str,
            _from: DateTime<Utc>,
        ) -> Result<Option<DateTime<Utc>>> {
            Ok(None)
        }

        async fn create_event(&self, draft: &EventDraft) -> Result<CreatedEvent> {
            if self.fail {
                return Err(RoomCtlError::Booking("provider rejected event".to_string()));
            }
            self.drafts.lock().unwrap().push(draft.clone());
            Ok(CreatedEvent {
                id: "evt-1".to_string(),
                html_link: Some("https://calendar.example/evt-1".to_string()),
                conference_link: None,
            })
        }
    }

    fn request() -> BookingRequest {
        BookingRequest {
            room: Room::new("room-a@resource", "Room A", 1, 4).unwrap(),
            duration_minutes: 30,
            organizer_email: "organizer@example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn test_book_builds_event_draft() {
        let gateway = Arc::new(RecordingGateway::new());
        let service = BookingService::new(gateway.clone());

        let receipt = service.book(&request()).await.unwrap();

        let drafts = gateway.drafts.lock().unwrap();
        assert_eq!(drafts.len(), 1);
        let draft = &drafts[0];
        assert_eq!(draft.summary, "Meeting in Room: Room A");
        assert_eq!(draft.window.duration(), Duration::minutes(30));
        assert_eq!(draft.organizer_email, "organizer@example.com");
        assert!(draft.attendees.contains(&"room-a@resource".to_string()));
        assert!(draft.attendees.contains(&"organizer@example.com".to_string()));
        assert!(!draft.conference_request_id.is_empty());

        assert_eq!(receipt.event_id, "evt-1");
        assert_eq!(receipt.room.name, "Room A");
        // Conferencing link is optional; the provider had not allocated one
        assert!(receipt.conference_link.is_none());
    }

    #[tokio::test]
    async fn test_booking_failure_propagates_without_retry() {
        let gateway = Arc::new(RecordingGateway::failing());
        let service = BookingService::new(gateway.clone());

        let result = service.book(&request()).await;

        assert!(matches!(result, Err(RoomCtlError::Booking(_))));
        assert!(gateway.drafts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_conference_request_ids_are_unique() {
        let gateway = Arc::new(RecordingGateway::new());
        let service = BookingService::new(gateway.clone());

        service.book(&request()).await.unwrap();
        service.book(&request()).await.unwrap();

        let drafts = gateway.drafts.lock().unwrap();
        assert_ne!(drafts[0].conference_request_id, drafts[1].conference_request_id);
    }
}
