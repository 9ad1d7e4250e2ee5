//! PostgreSQL-backed `BookingRepository` implementation using Diesel ORM.
//!
//! The insert path is where the no-conflict invariant is made atomic: the
//! equipment row is locked `FOR UPDATE`, the inclusive overlap predicate is
//! re-evaluated against active bookings, and only then is the row written.
//! Two racing requests for overlapping intervals therefore serialise on the
//! lock and the loser surfaces [`BookingRepositoryError::Conflict`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{BookingRepository, BookingRepositoryError};
use crate::domain::{Booking, BookingDraft, BookingInterval, BookingStatus};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{BookingRow, NewBookingRow};
use super::pool::{DbPool, PoolError};
use super::schema::{bookings, equipment_items};

/// Status strings whose bookings occupy their interval.
const ACTIVE_STATUSES: [&str; 2] = ["pending", "confirmed"];

/// Diesel-backed implementation of the booking repository port.
#[derive(Clone)]
pub struct DieselBookingRepository {
    pool: DbPool,
}

impl DieselBookingRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> BookingRepositoryError {
    map_pool_error(error, BookingRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> BookingRepositoryError {
    map_diesel_error(
        error,
        BookingRepositoryError::query,
        BookingRepositoryError::connection,
    )
}

/// Error carried through the insert transaction.
///
/// Diesel requires the transaction error to absorb its own error type; the
/// extra variant lets the conflict loser escape with the winning booking id.
enum InsertTxError {
    Conflict(Uuid),
    Diesel(diesel::result::Error),
}

impl From<diesel::result::Error> for InsertTxError {
    fn from(value: diesel::result::Error) -> Self {
        Self::Diesel(value)
    }
}

/// Convert a database row into a domain booking.
fn row_to_booking(row: BookingRow) -> Result<Booking, BookingRepositoryError> {
    let BookingRow {
        id,
        user_id,
        equipment_id,
        start_at,
        end_at,
        purpose,
        status,
        created_at,
    } = row;

    let interval = BookingInterval::try_new(start_at, end_at)
        .map_err(|err| BookingRepositoryError::query(err.to_string()))?;
    let status: BookingStatus = status
        .parse()
        .map_err(|err: crate::domain::ParseBookingStatusError| {
            BookingRepositoryError::query(err.to_string())
        })?;

    Ok(Booking::from_parts(
        BookingDraft {
            id,
            user_id,
            equipment_id,
            interval,
            purpose,
            created_at,
        },
        status,
    ))
}

#[async_trait]
impl BookingRepository for DieselBookingRepository {
    async fn insert(&self, booking: &Booking) -> Result<(), BookingRepositoryError> {
        use diesel_async::scoped_futures::ScopedFutureExt as _;
        use diesel_async::AsyncConnection as _;

        let new_row = NewBookingRow {
            id: booking.id(),
            user_id: booking.user_id(),
            equipment_id: booking.equipment_id(),
            start_at: booking.interval().start(),
            end_at: booking.interval().end(),
            purpose: booking.purpose(),
            status: booking.status().as_str(),
            created_at: booking.created_at(),
        };
        let equipment_id = booking.equipment_id();
        let start = booking.interval().start();
        let end = booking.interval().end();
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        conn.transaction(|conn| {
            async move {
                // Serialise concurrent inserts for the same item on its row
                // lock, then re-check the inclusive overlap predicate.
                equipment_items::table
                    .filter(equipment_items::id.eq(equipment_id))
                    .select(equipment_items::id)
                    .for_update()
                    .load::<Uuid>(conn)
                    .await?;

                let winner: Option<Uuid> = bookings::table
                    .filter(bookings::equipment_id.eq(equipment_id))
                    .filter(bookings::status.eq_any(ACTIVE_STATUSES))
                    .filter(bookings::start_at.le(end).and(bookings::end_at.ge(start)))
                    .select(bookings::id)
                    .first(conn)
                    .await
                    .optional()?;
                if let Some(winner) = winner {
                    return Err(InsertTxError::Conflict(winner));
                }

                diesel::insert_into(bookings::table)
                    .values(&new_row)
                    .execute(conn)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(|err| match err {
            InsertTxError::Conflict(winner) => BookingRepositoryError::conflict(winner),
            InsertTxError::Diesel(err) => diesel_error(err),
        })
    }

    async fn find_by_id(
        &self,
        booking_id: Uuid,
    ) -> Result<Option<Booking>, BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row = bookings::table
            .filter(bookings::id.eq(booking_id))
            .select(BookingRow::as_select())
            .first::<BookingRow>(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        row.map(row_to_booking).transpose()
    }

    async fn update_status(
        &self,
        booking_id: Uuid,
        from: BookingStatus,
        to: BookingStatus,
    ) -> Result<bool, BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let updated = diesel::update(
            bookings::table
                .filter(bookings::id.eq(booking_id))
                .filter(bookings::status.eq(from.as_str())),
        )
        .set(bookings::status.eq(to.as_str()))
        .execute(&mut conn)
        .await
        .map_err(diesel_error)?;

        Ok(updated == 1)
    }

    async fn list_active_for_equipment(
        &self,
        equipment_id: Uuid,
    ) -> Result<Vec<Booking>, BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<BookingRow> = bookings::table
            .filter(bookings::equipment_id.eq(equipment_id))
            .filter(bookings::status.eq_any(ACTIVE_STATUSES))
            .order(bookings::start_at.asc())
            .select(BookingRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        rows.into_iter().map(row_to_booking).collect()
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Booking>, BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<BookingRow> = bookings::table
            .filter(bookings::user_id.eq(user_id))
            .order((bookings::created_at.desc(), bookings::id.desc()))
            .select(BookingRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        rows.into_iter().map(row_to_booking).collect()
    }

    async fn list_all(&self) -> Result<Vec<Booking>, BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<BookingRow> = bookings::table
            .order((bookings::created_at.desc(), bookings::id.desc()))
            .select(BookingRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        rows.into_iter().map(row_to_booking).collect()
    }

    async fn has_confirmed_for_equipment(
        &self,
        equipment_id: Uuid,
    ) -> Result<bool, BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let found: Option<Uuid> = bookings::table
            .filter(bookings::equipment_id.eq(equipment_id))
            .filter(bookings::status.eq(BookingStatus::Confirmed.as_str()))
            .select(bookings::id)
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        Ok(found.is_some())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for error mapping and row conversion edge cases.

    use chrono::{Duration, Utc};
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn valid_row() -> BookingRow {
        let start = Utc::now() + Duration::hours(1);
        BookingRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            equipment_id: Uuid::new_v4(),
            start_at: start,
            end_at: start + Duration::hours(2),
            purpose: "oscilloscope calibration".to_owned(),
            status: "confirmed".to_owned(),
            created_at: Utc::now(),
        }
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let err = pool_error(PoolError::checkout("connection refused"));
        assert!(matches!(err, BookingRepositoryError::Connection { .. }));
        assert!(err.to_string().contains("connection refused"));
    }

    #[rstest]
    fn diesel_error_maps_to_query_error() {
        let err = diesel_error(diesel::result::Error::NotFound);
        assert!(matches!(err, BookingRepositoryError::Query { .. }));
        assert!(err.to_string().contains("record not found"));
    }

    #[rstest]
    fn row_conversion_hydrates_status(valid_row: BookingRow) {
        let booking = row_to_booking(valid_row).expect("valid row");
        assert_eq!(booking.status(), BookingStatus::Confirmed);
    }

    #[rstest]
    fn row_conversion_rejects_unknown_status(mut valid_row: BookingRow) {
        valid_row.status = "archived".to_owned();
        let error = row_to_booking(valid_row).expect_err("unknown status should fail");
        assert!(matches!(error, BookingRepositoryError::Query { .. }));
        assert!(error.to_string().contains("archived"));
    }

    #[rstest]
    fn row_conversion_rejects_inverted_interval(mut valid_row: BookingRow) {
        valid_row.end_at = valid_row.start_at - Duration::seconds(1);
        let error = row_to_booking(valid_row).expect_err("inverted interval should fail");
        assert!(matches!(error, BookingRepositoryError::Query { .. }));
    }
}
