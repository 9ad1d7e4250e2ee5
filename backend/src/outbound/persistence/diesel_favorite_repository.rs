//! PostgreSQL-backed `FavoriteRepository` implementation using Diesel ORM.
//!
//! The unique index on `(user_id, equipment_id)` backs the at-most-one
//! favorite invariant; a violating insert surfaces as a query error.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{FavoriteRepository, FavoriteRepositoryError};
use crate::domain::Favorite;

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{FavoriteRow, NewFavoriteRow};
use super::pool::{DbPool, PoolError};
use super::schema::favorites;

/// Diesel-backed implementation of the favorite repository port.
#[derive(Clone)]
pub struct DieselFavoriteRepository {
    pool: DbPool,
}

impl DieselFavoriteRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> FavoriteRepositoryError {
    map_pool_error(error, FavoriteRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> FavoriteRepositoryError {
    map_diesel_error(
        error,
        FavoriteRepositoryError::query,
        FavoriteRepositoryError::connection,
    )
}

fn row_to_favorite(row: FavoriteRow) -> Favorite {
    Favorite::new(row.id, row.user_id, row.equipment_id, row.created_at)
}

#[async_trait]
impl FavoriteRepository for DieselFavoriteRepository {
    async fn find(
        &self,
        user_id: Uuid,
        equipment_id: Uuid,
    ) -> Result<Option<Favorite>, FavoriteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row = favorites::table
            .filter(favorites::user_id.eq(user_id))
            .filter(favorites::equipment_id.eq(equipment_id))
            .select(FavoriteRow::as_select())
            .first::<FavoriteRow>(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        Ok(row.map(row_to_favorite))
    }

    async fn insert(&self, favorite: &Favorite) -> Result<(), FavoriteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let new_row = NewFavoriteRow {
            id: favorite.id(),
            user_id: favorite.user_id(),
            equipment_id: favorite.equipment_id(),
            created_at: favorite.created_at(),
        };

        diesel::insert_into(favorites::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }

    async fn delete(&self, favorite_id: Uuid) -> Result<bool, FavoriteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let deleted = diesel::delete(favorites::table.filter(favorites::id.eq(favorite_id)))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;

        Ok(deleted == 1)
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Favorite>, FavoriteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<FavoriteRow> = favorites::table
            .filter(favorites::user_id.eq(user_id))
            .order((favorites::created_at.desc(), favorites::id.desc()))
            .select(FavoriteRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        Ok(rows.into_iter().map(row_to_favorite).collect())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for error mapping.

    use rstest::rstest;

    use super::*;

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let err = pool_error(PoolError::checkout("connection refused"));
        assert!(matches!(err, FavoriteRepositoryError::Connection { .. }));
    }

    #[rstest]
    fn unique_violation_maps_to_query_error() {
        let err = diesel_error(diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key".to_owned()),
        ));
        assert!(matches!(err, FavoriteRepositoryError::Query { .. }));
        assert!(err.to_string().contains("unique constraint"));
    }
}
