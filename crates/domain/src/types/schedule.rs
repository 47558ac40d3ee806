//! Time window and busy-interval types

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{Result, RoomCtlError};

/// A half-open UTC time window `[start, end)`.
///
/// `end > start` holds by construction: windows can only be built from a
/// start instant plus a positive duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeWindow {
    /// Build a window spanning `duration` from `start`.
    ///
    /// # Errors
    /// Returns `RoomCtlError::InvalidInput` if `duration` is not positive.
    pub fn starting_at(start: DateTime<Utc>, duration: Duration) -> Result<Self> {
        if duration <= Duration::zero() {
            return Err(RoomCtlError::InvalidInput(
                "time window duration must be positive".to_string(),
            ));
        }
        Ok(Self { start, end: start + duration })
    }

    /// Window start (inclusive)
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Window end (exclusive)
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Window length
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

/// A busy span reported by the calendar provider for one calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusyInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_end_after_start() {
        let start = Utc::now();
        let window = TimeWindow::starting_at(start, Duration::minutes(30)).unwrap();
        assert!(window.end() > window.start());
        assert_eq!(window.duration(), Duration::minutes(30));
    }

    #[test]
    fn test_window_rejects_zero_duration() {
        assert!(TimeWindow::starting_at(Utc::now(), Duration::zero()).is_err());
    }

    #[test]
    fn test_window_rejects_negative_duration() {
        assert!(TimeWindow::starting_at(Utc::now(), Duration::minutes(-5)).is_err());
    }
}
