//! Booking request and receipt artifacts

use serde::Serialize;

use crate::types::room::Room;

/// A request to book one room, produced once per process run.
///
/// Consumed exactly once by the booking orchestrator; never retried.
#[derive(Debug, Clone, Serialize)]
pub struct BookingRequest {
    pub room: Room,
    pub duration_minutes: u32,
    pub organizer_email: String,
}

/// Terminal artifact of a successful booking: printed and discarded.
///
/// The conferencing link is optional — providers may not have allocated one
/// by the time the creation call returns.
#[derive(Debug, Clone, Serialize)]
pub struct BookingReceipt {
    pub event_id: String,
    pub event_link: Option<String>,
    pub conference_link: Option<String>,
    pub room: Room,
}
