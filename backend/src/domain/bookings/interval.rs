//! Booking time intervals with inclusive endpoints.

use chrono::{DateTime, Utc};

/// Closed time interval `[start, end]` claimed by a booking.
///
/// Endpoints are inclusive: two intervals that merely touch at an endpoint
/// overlap. Construction enforces `end > start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingInterval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

/// Error returned when an interval's endpoints are out of order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("booking end must be after its start")]
pub struct EndNotAfterStart;

impl BookingInterval {
    /// Build an interval, rejecting `end <= start`.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::bookings::BookingInterval;
    /// use chrono::{TimeZone, Utc};
    ///
    /// let start = Utc.with_ymd_and_hms(2026, 3, 1, 10, 0, 0).unwrap();
    /// let end = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
    /// assert!(BookingInterval::try_new(start, end).is_ok());
    /// assert!(BookingInterval::try_new(end, start).is_err());
    /// ```
    pub fn try_new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, EndNotAfterStart> {
        if end <= start {
            return Err(EndNotAfterStart);
        }
        Ok(Self { start, end })
    }

    /// Inclusive start of the interval.
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Inclusive end of the interval.
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Inclusive overlap test: `s1 <= e2 && s2 <= e1`.
    ///
    /// Symmetric, and true for intervals that share only an endpoint.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}
