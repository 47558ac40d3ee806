//! Domain types and models

pub mod booking;
pub mod room;
pub mod schedule;

pub use booking::{BookingReceipt, BookingRequest};
pub use room::Room;
pub use schedule::{BusyInterval, TimeWindow};
