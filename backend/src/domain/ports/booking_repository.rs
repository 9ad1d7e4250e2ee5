//! Port for booking persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::bookings::{Booking, BookingStatus};

use super::define_port_error;

define_port_error! {
    /// Errors raised by booking repository adapters.
    pub enum BookingRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "booking repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "booking repository query failed: {message}",
        /// Insert lost the race: an active booking already claims an
        /// overlapping interval on the same equipment.
        Conflict { booking_id: Uuid } =>
            "interval conflicts with booking {booking_id}",
    }
}

/// Port for writing and reading bookings.
///
/// `insert` must re-verify the no-conflict invariant atomically with the
/// write (for the same equipment, against active bookings, under the
/// inclusive overlap predicate) and report a loss with
/// [`BookingRepositoryError::Conflict`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Persist a new booking, atomically re-checking for conflicts.
    async fn insert(&self, booking: &Booking) -> Result<(), BookingRepositoryError>;

    /// Find a booking by id.
    async fn find_by_id(&self, booking_id: Uuid)
        -> Result<Option<Booking>, BookingRepositoryError>;

    /// Move a booking from `from` to `to` in one guarded write.
    ///
    /// Returns `false` when the booking no longer holds `from`, so callers
    /// can surface a concurrent status change instead of clobbering it.
    async fn update_status(
        &self,
        booking_id: Uuid,
        from: BookingStatus,
        to: BookingStatus,
    ) -> Result<bool, BookingRepositoryError>;

    /// Active (`pending` or `confirmed`) bookings for one equipment item.
    async fn list_active_for_equipment(
        &self,
        equipment_id: Uuid,
    ) -> Result<Vec<Booking>, BookingRepositoryError>;

    /// All bookings placed by a user, newest first.
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Booking>, BookingRepositoryError>;

    /// All bookings in the system, newest first.
    async fn list_all(&self) -> Result<Vec<Booking>, BookingRepositoryError>;

    /// Whether any `confirmed` booking references the equipment item.
    ///
    /// Used as the deletion guard; `pending` bookings do not count.
    async fn has_confirmed_for_equipment(
        &self,
        equipment_id: Uuid,
    ) -> Result<bool, BookingRepositoryError>;
}

/// Fixture implementation for tests that do not exercise booking persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureBookingRepository;

#[async_trait]
impl BookingRepository for FixtureBookingRepository {
    async fn insert(&self, _booking: &Booking) -> Result<(), BookingRepositoryError> {
        Ok(())
    }

    async fn find_by_id(
        &self,
        _booking_id: Uuid,
    ) -> Result<Option<Booking>, BookingRepositoryError> {
        Ok(None)
    }

    async fn update_status(
        &self,
        _booking_id: Uuid,
        _from: BookingStatus,
        _to: BookingStatus,
    ) -> Result<bool, BookingRepositoryError> {
        Ok(true)
    }

    async fn list_active_for_equipment(
        &self,
        _equipment_id: Uuid,
    ) -> Result<Vec<Booking>, BookingRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_for_user(&self, _user_id: Uuid) -> Result<Vec<Booking>, BookingRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_all(&self) -> Result<Vec<Booking>, BookingRepositoryError> {
        Ok(Vec::new())
    }

    async fn has_confirmed_for_equipment(
        &self,
        _equipment_id: Uuid,
    ) -> Result<bool, BookingRepositoryError> {
        Ok(false)
    }
}
