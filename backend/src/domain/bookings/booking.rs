//! The booking entity.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::interval::BookingInterval;
use super::status::{BookingStatus, IllegalTransition};

/// Error raised when a booking draft fails validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BookingValidationError {
    /// The stated purpose is empty or whitespace.
    #[error("booking purpose must not be empty")]
    EmptyPurpose,
}

/// Unvalidated input for constructing a [`Booking`].
#[derive(Debug, Clone)]
pub struct BookingDraft {
    /// Identifier for the new booking.
    pub id: Uuid,
    /// The requesting user.
    pub user_id: Uuid,
    /// The equipment item being reserved.
    pub equipment_id: Uuid,
    /// The claimed time interval.
    pub interval: BookingInterval,
    /// Free-text statement of what the equipment is needed for.
    pub purpose: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A reservation of one equipment item over a time interval.
///
/// Bookings start life `pending`; status changes go through
/// [`Booking::with_status`], which enforces the lifecycle graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    id: Uuid,
    user_id: Uuid,
    equipment_id: Uuid,
    interval: BookingInterval,
    purpose: String,
    status: BookingStatus,
    created_at: DateTime<Utc>,
}

impl Booking {
    /// Validate a draft into a `pending` booking.
    pub fn new(draft: BookingDraft) -> Result<Self, BookingValidationError> {
        let purpose = draft.purpose.trim();
        if purpose.is_empty() {
            return Err(BookingValidationError::EmptyPurpose);
        }
        Ok(Self {
            id: draft.id,
            user_id: draft.user_id,
            equipment_id: draft.equipment_id,
            interval: draft.interval,
            purpose: purpose.to_owned(),
            status: BookingStatus::Pending,
            created_at: draft.created_at,
        })
    }

    /// Reconstruct a booking from storage without lifecycle checks.
    ///
    /// Adapters use this when hydrating rows; the stored status is trusted.
    pub fn from_parts(draft: BookingDraft, status: BookingStatus) -> Self {
        Self {
            id: draft.id,
            user_id: draft.user_id,
            equipment_id: draft.equipment_id,
            interval: draft.interval,
            purpose: draft.purpose,
            status,
            created_at: draft.created_at,
        }
    }

    /// Booking identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The requesting user.
    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    /// The reserved equipment item.
    pub fn equipment_id(&self) -> Uuid {
        self.equipment_id
    }

    /// The claimed time interval.
    pub fn interval(&self) -> BookingInterval {
        self.interval
    }

    /// Stated purpose of the reservation.
    pub fn purpose(&self) -> &str {
        self.purpose.as_str()
    }

    /// Current lifecycle status.
    pub fn status(&self) -> BookingStatus {
        self.status
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Move the booking to `next`, enforcing the lifecycle graph.
    pub fn with_status(mut self, next: BookingStatus) -> Result<Self, IllegalTransition> {
        if !self.status.can_transition_to(next) {
            return Err(IllegalTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(self)
    }
}
