//! Driving port for booking reads.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::auth::AuthContext;
use crate::domain::Error;

use super::booking_command::BookingPayload;

/// Request to read a single booking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GetBookingRequest {
    pub acting: AuthContext,
    pub booking_id: Uuid,
}

/// Driving port for booking read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingQuery: Send + Sync {
    /// Read one booking. Owners see their own; managers see all.
    async fn get_booking(&self, request: GetBookingRequest) -> Result<BookingPayload, Error>;

    /// Bookings placed by the acting user, newest first.
    async fn list_own_bookings(&self, acting: AuthContext) -> Result<Vec<BookingPayload>, Error>;

    /// All bookings, newest first. Managers only.
    async fn list_all_bookings(&self, acting: AuthContext) -> Result<Vec<BookingPayload>, Error>;
}

/// Fixture query implementation for tests that do not need persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureBookingQuery;

#[async_trait]
impl BookingQuery for FixtureBookingQuery {
    async fn get_booking(&self, request: GetBookingRequest) -> Result<BookingPayload, Error> {
        Err(Error::not_found(format!(
            "booking {} not found",
            request.booking_id
        )))
    }

    async fn list_own_bookings(&self, _acting: AuthContext) -> Result<Vec<BookingPayload>, Error> {
        Ok(Vec::new())
    }

    async fn list_all_bookings(&self, acting: AuthContext) -> Result<Vec<BookingPayload>, Error> {
        if !acting.role().can_manage_bookings() {
            return Err(Error::forbidden("listing all bookings requires admin"));
        }
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;
    use crate::domain::auth::Role;
    use crate::domain::ErrorCode;

    #[rstest]
    #[tokio::test]
    async fn fixture_list_own_is_empty() {
        let query = FixtureBookingQuery;
        let acting = AuthContext::new(Uuid::new_v4(), Role::User);
        let listed = query
            .list_own_bookings(acting)
            .await
            .expect("fixture list succeeds");
        assert!(listed.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_list_all_requires_admin() {
        let query = FixtureBookingQuery;
        let acting = AuthContext::new(Uuid::new_v4(), Role::User);
        let err = query
            .list_all_bookings(acting)
            .await
            .expect_err("regular users cannot list all bookings");
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }
}
