//! Console output formatting

use chrono::Duration;
use roomctl_domain::{BookingDefaults, BookingReceipt};

/// Print the effective booking configuration banner.
pub fn print_config_banner(defaults: &BookingDefaults) {
    println!("-----------------------------");
    println!("Current Booking Configuration:");
    println!("  Duration (minutes): {}", defaults.duration_minutes);
    println!("  Floor: {}", defaults.floor);
    println!("  Minimum Capacity: {}", defaults.min_capacity);
    println!("  email: {}", defaults.email.as_deref().unwrap_or("(not set)"));
    println!("-----------------------------");
}

/// Render the gap until a room's next event.
///
/// Under an hour the gap is shown in whole minutes, above that in fractional
/// hours; `None` means the calendar has no upcoming event at all.
pub fn format_gap(gap: Option<Duration>) -> String {
    match gap {
        None => "No upcoming events".to_string(),
        Some(gap) => {
            let seconds = gap.num_seconds().max(0);
            if seconds < 3600 {
                format!("{} minutes", seconds / 60)
            } else {
                format!("{:.1} hours", seconds as f64 / 3600.0)
            }
        }
    }
}

/// Print the booking receipt.
pub fn print_receipt(receipt: &BookingReceipt) {
    println!("Event created: {}", receipt.event_link.as_deref().unwrap_or("(no link returned)"));
    println!(
        "Meet link: {}",
        receipt.conference_link.as_deref().unwrap_or("(not yet allocated)")
    );
    println!("-----------------------------");
    println!("Room booked: {} on floor {}", receipt.room.name, receipt.room.floor);
}
