//! Application context - dependency injection container

use std::sync::Arc;

use roomctl_core::ports::CalendarGateway;
use roomctl_core::{AvailabilityService, BookingService};
use roomctl_domain::{Config, Room};

/// Application context - holds configuration, the room registry, and the
/// services wired to one calendar gateway.
pub struct AppContext {
    pub config: Config,
    /// Registry order is preserved; ranking happens per invocation
    pub rooms: Vec<Room>,
    pub availability: AvailabilityService,
    pub booking: BookingService,
}

impl AppContext {
    /// Wire the services around a calendar gateway implementation.
    pub fn new(config: Config, rooms: Vec<Room>, gateway: Arc<dyn CalendarGateway>) -> Self {
        Self {
            config,
            rooms,
            availability: AvailabilityService::new(gateway.clone()),
            booking: BookingService::new(gateway),
        }
    }
}
