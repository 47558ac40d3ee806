//! Room listing command

use std::collections::BTreeMap;

use chrono::{Duration, Utc};
use roomctl_domain::{Result, Room, TimeWindow};

use super::resolve_candidates;
use crate::cli::RunOptions;
use crate::context::AppContext;
use crate::output;

/// List available rooms grouped by floor, with the time until each room's
/// next event. Does not book anything.
pub async fn run(ctx: &AppContext, options: &RunOptions) -> Result<()> {
    let window = TimeWindow::starting_at(
        Utc::now(),
        Duration::minutes(i64::from(options.duration_minutes)),
    )?;

    let candidates = resolve_candidates(ctx, options, window).await?;
    if candidates.is_empty() {
        println!("No available rooms found.");
        return Ok(());
    }

    let mut by_floor: BTreeMap<i32, Vec<&Room>> = BTreeMap::new();
    for room in &candidates {
        by_floor.entry(room.floor).or_default().push(room);
    }

    println!("Available rooms:");
    for (floor, rooms) in by_floor {
        println!("\nFloor {floor}");
        for room in rooms {
            // Lookahead is informational only; it never feeds the booking
            // decision
            let gap = ctx.availability.time_until_next_event(&room.id, window.start()).await?;
            println!(
                "- Room: {}, Capacity: {}, Time until next event: {}",
                room.name,
                room.capacity,
                output::format_gap(gap)
            );
        }
    }
    println!("-----------------------------");

    Ok(())
}
