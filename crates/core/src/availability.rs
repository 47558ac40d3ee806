//! Room availability resolution
//!
//! Resolves which rooms are free over a time window by querying the calendar
//! gateway's free/busy endpoint in batches.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use roomctl_domain::constants::DEFAULT_FREEBUSY_BATCH_SIZE;
use roomctl_domain::{Result, Room, TimeWindow};
use tracing::{debug, warn};

use crate::ports::CalendarGateway;

/// Resolves room availability against the calendar gateway.
///
/// Queries are batched to respect provider-side limits and issued
/// sequentially. Each resolution is stateless with respect to prior calls:
/// results always reflect live provider state.
pub struct AvailabilityService {
    gateway: Arc<dyn CalendarGateway>,
    batch_size: usize,
}

impl AvailabilityService {
    /// Create a new service with the default batch size.
    pub fn new(gateway: Arc<dyn CalendarGateway>) -> Self {
        Self { gateway, batch_size: DEFAULT_FREEBUSY_BATCH_SIZE }
    }

    /// Override the free/busy batch size (clamped to at least 1).
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Return the subset of `rooms` with no busy interval overlapping
    /// `window`, as reported by the gateway.
    ///
    /// A room is free iff the provider response contains its id with an
    /// empty busy list. Ids omitted from the response are treated as
    /// unavailable: an omission may indicate a provider-side access problem
    /// rather than true availability, and a room that cannot be verified
    /// must never be offered for booking.
    ///
    /// # Errors
    /// Any batch query failure aborts the whole resolution; partial results
    /// are never reported as availability.
    pub async fn resolve(&self, rooms: &[Room], window: TimeWindow) -> Result<Vec<Room>> {
        let mut available = Vec::with_capacity(rooms.len());

        for batch in rooms.chunks(self.batch_size) {
            let ids: Vec<String> = batch.iter().map(|room| room.id.clone()).collect();
            debug!(batch_len = ids.len(), "querying free/busy for room batch");

            let schedules = self.gateway.query_free_busy(window, &ids).await?;

            for room in batch {
                match schedules.get(&room.id) {
                    Some(busy) if busy.is_empty() => available.push(room.clone()),
                    Some(_) => {}
                    None => {
                        warn!(
                            room = %room.name,
                            calendar_id = %room.id,
                            "calendar missing from free/busy response; treating as unavailable"
                        );
                    }
                }
            }
        }

        debug!(available = available.len(), total = rooms.len(), "availability resolved");
        Ok(available)
    }

    /// Gap between `from` and the start of the earliest event at or after
    /// `from` on the room's calendar, or `None` when there is no upcoming
    /// event.
    ///
    /// Informational display only: a missing upcoming event is never
    /// availability confirmation. Only [`Self::resolve`] is authoritative
    /// for booking decisions.
    pub async fn time_until_next_event(
        &self,
        calendar_id: &str,
        from: DateTime<Utc>,
    ) -> Result<Option<Duration>> {
        let next_start = self.gateway.next_event_start(calendar_id, from).await?;
        Ok(next_start.map(|start| start - from))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use roomctl_domain::{BusyInterval, RoomCtlError};

    use super::*;
    use crate::ports::{CreatedEvent, EventDraft, FreeBusySchedules};

    /// Mock gateway that serves a fixed free/busy map and records the size
    /// of each batch it is queried with.
    struct MockGateway {
        schedules: FreeBusySchedules,
        batch_sizes: Mutex<Vec<usize>>,
        fail_queries: bool,
    }

    impl MockGateway {
        fn with_schedules(schedules: FreeBusySchedules) -> Self {
            Self { schedules, batch_sizes: Mutex::new(Vec::new()), fail_queries: false }
        }

        fn failing() -> Self {
            Self {
                schedules: HashMap::new(),
                batch_sizes: Mutex::new(Vec::new()),
                fail_queries: true,
            }
        }
    }

    #[async_trait]
    impl CalendarGateway for MockGateway {
        async fn query_free_busy(
            &self,
            _window: TimeWindow,
            calendar_ids: &[String],
        ) -> Result<FreeBusySchedules> {
            if self.fail_queries {
                return Err(RoomCtlError::Query("simulated gateway failure".to_string()));
            }
            self.batch_sizes.lock().unwrap().push(calendar_ids.len());
            Ok(calendar_ids
                .iter()
                .filter_map(|id| {
                    self.schedules.get(id).map(|busy| (id.clone(), busy.clone()))
                })
                .collect())
        }

        async fn next_event_start(
            &self,
            _calendar_id: &str,
            _from: DateTime<Utc>,
        ) -> Result<Option<DateTime<Utc>>> {
            Ok(None)
        }

        async fn create_event(&self, _draft: &EventDraft) -> Result<CreatedEvent> {
            Err(RoomCtlError::Booking("not supported by mock".to_string()))
        }
    }

    fn room(id: &str, name: &str) -> Room {
        Room::new(id, name, 1, 4).unwrap()
    }

    fn window() -> TimeWindow {
        TimeWindow::starting_at(Utc::now(), Duration::minutes(30)).unwrap()
    }

    fn busy_now() -> Vec<BusyInterval> {
        let start = Utc::now();
        vec![BusyInterval { start, end: start + Duration::minutes(15) }]
    }

    #[tokio::test]
    async fn test_resolve_free_and_busy_rooms() {
        let mut schedules = FreeBusySchedules::new();
        schedules.insert("r1".to_string(), Vec::new());
        schedules.insert("r2".to_string(), busy_now());

        let gateway = Arc::new(MockGateway::with_schedules(schedules));
        let service = AvailabilityService::new(gateway);

        let rooms = vec![room("r1", "Room 1"), room("r2", "Room 2")];
        let available = service.resolve(&rooms, window()).await.unwrap();

        assert_eq!(available.len(), 1);
        assert_eq!(available[0].id, "r1");
    }

    #[tokio::test]
    async fn test_omitted_calendar_is_unavailable() {
        // Response only covers r1; r2 is omitted entirely and must be
        // excluded (fail closed).
        let mut schedules = FreeBusySchedules::new();
        schedules.insert("r1".to_string(), Vec::new());

        let gateway = Arc::new(MockGateway::with_schedules(schedules));
        let service = AvailabilityService::new(gateway);

        let rooms = vec![room("r1", "Room 1"), room("r2", "Room 2")];
        let available = service.resolve(&rooms, window()).await.unwrap();

        assert_eq!(available.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(), vec!["r1"]);
    }

    #[tokio::test]
    async fn test_batching_splits_queries() {
        // 25 rooms with batch size 10 must issue 3 queries (10, 10, 5) and
        // the union must match an unbounded single-batch resolution.
        let rooms: Vec<Room> =
            (0..25).map(|i| room(&format!("r{i}"), &format!("Room {i}"))).collect();
        let schedules: FreeBusySchedules =
            rooms.iter().map(|r| (r.id.clone(), Vec::new())).collect();

        let batched_gateway = Arc::new(MockGateway::with_schedules(schedules.clone()));
        let batched = AvailabilityService::new(batched_gateway.clone())
            .with_batch_size(10)
            .resolve(&rooms, window())
            .await
            .unwrap();

        assert_eq!(*batched_gateway.batch_sizes.lock().unwrap(), vec![10, 10, 5]);

        let unbounded_gateway = Arc::new(MockGateway::with_schedules(schedules));
        let unbounded = AvailabilityService::new(unbounded_gateway)
            .with_batch_size(usize::MAX)
            .resolve(&rooms, window())
            .await
            .unwrap();

        assert_eq!(batched, unbounded);
        assert_eq!(batched.len(), 25);
    }

    #[tokio::test]
    async fn test_query_failure_aborts_resolution() {
        let gateway = Arc::new(MockGateway::failing());
        let service = AvailabilityService::new(gateway);

        let rooms = vec![room("r1", "Room 1")];
        let result = service.resolve(&rooms, window()).await;

        assert!(matches!(result, Err(RoomCtlError::Query(_))));
    }

    #[tokio::test]
    async fn test_zero_batch_size_clamped() {
        let gateway = Arc::new(MockGateway::with_schedules(FreeBusySchedules::new()));
        let service = AvailabilityService::new(gateway).with_batch_size(0);

        // Must not loop forever or panic on empty chunks
        let available = service.resolve(&[room("r1", "Room 1")], window()).await.unwrap();
        assert!(available.is_empty());
    }
}
