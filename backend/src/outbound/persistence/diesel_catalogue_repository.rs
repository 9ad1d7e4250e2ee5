//! PostgreSQL-backed `CatalogueRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{CatalogueRepository, CatalogueRepositoryError};
use crate::domain::{EquipmentCategory, EquipmentDraft, EquipmentItem};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{CategoryRow, EquipmentRow, NewCategoryRow, NewEquipmentRow};
use super::pool::{DbPool, PoolError};
use super::schema::{bookings, equipment_categories, equipment_items, favorites};

/// Diesel-backed implementation of the catalogue repository port.
#[derive(Clone)]
pub struct DieselCatalogueRepository {
    pool: DbPool,
}

impl DieselCatalogueRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> CatalogueRepositoryError {
    map_pool_error(error, CatalogueRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> CatalogueRepositoryError {
    map_diesel_error(
        error,
        CatalogueRepositoryError::query,
        CatalogueRepositoryError::connection,
    )
}

/// Convert a database row into a domain category.
fn row_to_category(row: CategoryRow) -> Result<EquipmentCategory, CatalogueRepositoryError> {
    EquipmentCategory::new(row.id, row.name, row.description)
        .map_err(|err| CatalogueRepositoryError::query(err.to_string()))
}

/// Convert a database row into a domain equipment item.
fn row_to_equipment(row: EquipmentRow) -> EquipmentItem {
    EquipmentItem::from_parts(
        EquipmentDraft {
            id: row.id,
            category_id: row.category_id,
            name: row.name,
            description: row.description,
            specifications: row.specifications,
            image_url: row.image_url,
        },
        row.is_available,
    )
}

#[async_trait]
impl CatalogueRepository for DieselCatalogueRepository {
    async fn list_categories(&self) -> Result<Vec<EquipmentCategory>, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<CategoryRow> = equipment_categories::table
            .order(equipment_categories::name.asc())
            .select(CategoryRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        rows.into_iter().map(row_to_category).collect()
    }

    async fn insert_category(
        &self,
        category: &EquipmentCategory,
    ) -> Result<(), CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let new_row = NewCategoryRow {
            id: category.id(),
            name: category.name(),
            description: category.description(),
        };

        diesel::insert_into(equipment_categories::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }

    async fn list_equipment(&self) -> Result<Vec<EquipmentItem>, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<EquipmentRow> = equipment_items::table
            .order(equipment_items::name.asc())
            .select(EquipmentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        Ok(rows.into_iter().map(row_to_equipment).collect())
    }

    async fn find_equipment(
        &self,
        equipment_id: Uuid,
    ) -> Result<Option<EquipmentItem>, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row = equipment_items::table
            .filter(equipment_items::id.eq(equipment_id))
            .select(EquipmentRow::as_select())
            .first::<EquipmentRow>(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        Ok(row.map(row_to_equipment))
    }

    async fn insert_equipment(
        &self,
        item: &EquipmentItem,
    ) -> Result<(), CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let new_row = NewEquipmentRow {
            id: item.id(),
            category_id: item.category_id(),
            name: item.name(),
            description: item.description(),
            specifications: item.specifications(),
            image_url: item.image_url(),
            is_available: item.is_available(),
        };

        diesel::insert_into(equipment_items::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }

    async fn set_equipment_availability(
        &self,
        equipment_id: Uuid,
        is_available: bool,
    ) -> Result<bool, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let updated = diesel::update(
            equipment_items::table.filter(equipment_items::id.eq(equipment_id)),
        )
        .set(equipment_items::is_available.eq(is_available))
        .execute(&mut conn)
        .await
        .map_err(diesel_error)?;

        Ok(updated == 1)
    }

    async fn delete_equipment(
        &self,
        equipment_id: Uuid,
    ) -> Result<bool, CatalogueRepositoryError> {
        use diesel_async::scoped_futures::ScopedFutureExt as _;
        use diesel_async::AsyncConnection as _;

        let mut conn = self.pool.get().await.map_err(pool_error)?;

        // Drop dependent rows and the item together so a failure cannot
        // orphan bookings or favorites.
        let deleted = conn
            .transaction(|conn| {
                async move {
                    diesel::delete(
                        favorites::table.filter(favorites::equipment_id.eq(equipment_id)),
                    )
                    .execute(conn)
                    .await?;

                    diesel::delete(
                        bookings::table.filter(bookings::equipment_id.eq(equipment_id)),
                    )
                    .execute(conn)
                    .await?;

                    diesel::delete(
                        equipment_items::table.filter(equipment_items::id.eq(equipment_id)),
                    )
                    .execute(conn)
                    .await
                }
                .scope_boxed()
            })
            .await
            .map_err(diesel_error)?;

        Ok(deleted == 1)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for error mapping and row conversion edge cases.

    use rstest::rstest;

    use super::*;

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let err = pool_error(PoolError::checkout("connection refused"));
        assert!(matches!(err, CatalogueRepositoryError::Connection { .. }));
    }

    #[rstest]
    fn row_conversion_rejects_blank_category_name() {
        let row = CategoryRow {
            id: Uuid::new_v4(),
            name: "  ".to_owned(),
            description: None,
        };
        let error = row_to_category(row).expect_err("blank name should fail");
        assert!(matches!(error, CatalogueRepositoryError::Query { .. }));
    }

    #[rstest]
    fn row_conversion_preserves_maintenance_flag() {
        let row = EquipmentRow {
            id: Uuid::new_v4(),
            category_id: Uuid::new_v4(),
            name: "Bandsaw".to_owned(),
            description: None,
            specifications: None,
            image_url: None,
            is_available: false,
        };
        let item = row_to_equipment(row);
        assert!(!item.is_available());
    }
}
