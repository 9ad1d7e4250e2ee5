//! Booking status set and the legal transition graph.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a booking.
///
/// A booking is created `pending`, moderated to `confirmed` or `rejected`,
/// and a confirmed booking ends `completed` or `cancelled`. Terminal states
/// absorb: no transition leaves them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Awaiting moderation.
    Pending,
    /// Accepted; occupies its interval and blocks equipment deletion.
    Confirmed,
    /// Declined during moderation. Terminal.
    Rejected,
    /// Fulfilled. Terminal.
    Completed,
    /// Withdrawn by the requester or an administrator. Terminal.
    Cancelled,
}

impl BookingStatus {
    /// Canonical lowercase form, matching storage and wire representations.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Rejected => "rejected",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether bookings in this status occupy their interval.
    ///
    /// Only active bookings participate in conflict detection.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }

    /// Whether this status admits no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Rejected | Self::Completed | Self::Cancelled)
    }

    /// Whether the lifecycle permits moving from this status to `next`.
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Confirmed)
                | (Self::Pending, Self::Rejected)
                | (Self::Pending, Self::Cancelled)
                | (Self::Confirmed, Self::Completed)
                | (Self::Confirmed, Self::Cancelled)
        )
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a stored status string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown booking status: {value}")]
pub struct ParseBookingStatusError {
    /// The rejected input.
    pub value: String,
}

impl std::str::FromStr for BookingStatus {
    type Err = ParseBookingStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "rejected" => Ok(Self::Rejected),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(ParseBookingStatusError {
                value: other.to_owned(),
            }),
        }
    }
}

/// Error raised when a status transition falls outside the lifecycle graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("illegal booking transition from {from} to {to}")]
pub struct IllegalTransition {
    /// Status the booking currently holds.
    pub from: BookingStatus,
    /// Status the caller attempted to move to.
    pub to: BookingStatus,
}
