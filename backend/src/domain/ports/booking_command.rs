//! Driving port for booking mutations.
//!
//! Covers placing a booking, walking its lifecycle, and the standalone
//! availability probe used by calendar previews.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::auth::AuthContext;
use crate::domain::bookings::{Booking, BookingStatus};
use crate::domain::Error;

/// Serializable booking payload for driving ports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingPayload {
    pub id: Uuid,
    pub user_id: Uuid,
    pub equipment_id: Uuid,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub purpose: String,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Booking> for BookingPayload {
    fn from(value: Booking) -> Self {
        Self {
            id: value.id(),
            user_id: value.user_id(),
            equipment_id: value.equipment_id(),
            start: value.interval().start(),
            end: value.interval().end(),
            purpose: value.purpose().to_owned(),
            status: value.status(),
            created_at: value.created_at(),
        }
    }
}

/// Request to place a booking on behalf of the acting user.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateBookingRequest {
    pub acting: AuthContext,
    pub equipment_id: Uuid,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub purpose: String,
}

/// Request to move an existing booking along its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionBookingRequest {
    pub acting: AuthContext,
    pub booking_id: Uuid,
}

/// Request to probe whether an interval could be granted right now.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckAvailabilityRequest {
    pub equipment_id: Uuid,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Driving port for booking write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingCommand: Send + Sync {
    /// Place a booking. The new booking starts `pending`.
    async fn create_booking(&self, request: CreateBookingRequest)
        -> Result<BookingPayload, Error>;

    /// Confirm a pending booking, re-checking maintenance and conflicts.
    async fn confirm_booking(
        &self,
        request: TransitionBookingRequest,
    ) -> Result<BookingPayload, Error>;

    /// Reject a pending booking.
    async fn reject_booking(
        &self,
        request: TransitionBookingRequest,
    ) -> Result<BookingPayload, Error>;

    /// Cancel a pending or confirmed booking (owner or manager).
    async fn cancel_booking(
        &self,
        request: TransitionBookingRequest,
    ) -> Result<BookingPayload, Error>;

    /// Mark a confirmed booking as completed.
    async fn complete_booking(
        &self,
        request: TransitionBookingRequest,
    ) -> Result<BookingPayload, Error>;

    /// Evaluate the availability preconditions without writing anything.
    async fn check_availability(&self, request: CheckAvailabilityRequest) -> Result<(), Error>;
}

/// Fixture command implementation for tests that do not need persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureBookingCommand;

#[async_trait]
impl BookingCommand for FixtureBookingCommand {
    async fn create_booking(
        &self,
        request: CreateBookingRequest,
    ) -> Result<BookingPayload, Error> {
        use crate::domain::bookings::{BookingDraft, BookingInterval};

        let interval = BookingInterval::try_new(request.start, request.end)
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        let booking = Booking::new(BookingDraft {
            id: Uuid::new_v4(),
            user_id: request.acting.user_id(),
            equipment_id: request.equipment_id,
            interval,
            purpose: request.purpose,
            created_at: request.start,
        })
        .map_err(|err| Error::invalid_request(err.to_string()))?;
        Ok(booking.into())
    }

    async fn confirm_booking(
        &self,
        request: TransitionBookingRequest,
    ) -> Result<BookingPayload, Error> {
        Err(Error::not_found(format!(
            "booking {} not found",
            request.booking_id
        )))
    }

    async fn reject_booking(
        &self,
        request: TransitionBookingRequest,
    ) -> Result<BookingPayload, Error> {
        Err(Error::not_found(format!(
            "booking {} not found",
            request.booking_id
        )))
    }

    async fn cancel_booking(
        &self,
        request: TransitionBookingRequest,
    ) -> Result<BookingPayload, Error> {
        Err(Error::not_found(format!(
            "booking {} not found",
            request.booking_id
        )))
    }

    async fn complete_booking(
        &self,
        request: TransitionBookingRequest,
    ) -> Result<BookingPayload, Error> {
        Err(Error::not_found(format!(
            "booking {} not found",
            request.booking_id
        )))
    }

    async fn check_availability(&self, _request: CheckAvailabilityRequest) -> Result<(), Error> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use chrono::Duration;
    use rstest::rstest;

    use super::*;
    use crate::domain::auth::Role;
    use crate::domain::ErrorCode;

    fn create_request() -> CreateBookingRequest {
        let start = Utc::now() + Duration::hours(1);
        CreateBookingRequest {
            acting: AuthContext::new(Uuid::new_v4(), Role::User),
            equipment_id: Uuid::new_v4(),
            start,
            end: start + Duration::hours(2),
            purpose: "thermal camera survey".to_owned(),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_create_returns_pending_booking() {
        let command = FixtureBookingCommand;
        let request = create_request();
        let payload = command
            .create_booking(request.clone())
            .await
            .expect("fixture create succeeds");
        assert_eq!(payload.status, BookingStatus::Pending);
        assert_eq!(payload.user_id, request.acting.user_id());
        assert_eq!(payload.equipment_id, request.equipment_id);
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_create_rejects_inverted_interval() {
        let command = FixtureBookingCommand;
        let mut request = create_request();
        std::mem::swap(&mut request.start, &mut request.end);
        let err = command
            .create_booking(request)
            .await
            .expect_err("inverted interval");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_transitions_report_not_found() {
        let command = FixtureBookingCommand;
        let request = TransitionBookingRequest {
            acting: AuthContext::new(Uuid::new_v4(), Role::Admin),
            booking_id: Uuid::new_v4(),
        };
        let err = command
            .confirm_booking(request)
            .await
            .expect_err("fixture knows no bookings");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
