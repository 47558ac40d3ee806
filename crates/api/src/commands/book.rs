//! Room booking command

use chrono::{Duration, Utc};
use roomctl_core::selection;
use roomctl_domain::{BookingReceipt, BookingRequest, Result, RoomCtlError, TimeWindow};

use super::resolve_candidates;
use crate::cli::RunOptions;
use crate::context::AppContext;

/// Book the named room, or the best-ranked available room when no name is
/// given.
///
/// # Errors
/// - `RoomCtlError::RoomNotFound` when the named room is not in the
///   available set (event creation is never attempted)
/// - `RoomCtlError::NoRoomAvailable` when auto-selection finds no candidate
/// - `RoomCtlError::Config` when no organizer email is configured
pub async fn run(ctx: &AppContext, options: &RunOptions) -> Result<BookingReceipt> {
    let window = TimeWindow::starting_at(
        Utc::now(),
        Duration::minutes(i64::from(options.duration_minutes)),
    )?;

    let candidates = resolve_candidates(ctx, options, window).await?;

    let room = match options.name.as_deref() {
        Some(name) => selection::select_by_name(&candidates, name)
            .ok_or_else(|| RoomCtlError::RoomNotFound(name.trim().to_string()))?,
        None => selection::select_default(&candidates).ok_or(RoomCtlError::NoRoomAvailable)?,
    };

    let organizer_email = options.organizer_email.clone().ok_or_else(|| {
        RoomCtlError::Config(
            "booking.email is not configured (set it in config.toml or ROOMCTL_EMAIL)".to_string(),
        )
    })?;

    let request = BookingRequest {
        room: room.clone(),
        duration_minutes: options.duration_minutes,
        organizer_email,
    };

    ctx.booking.book(&request).await
}
