//! Port for catalogue persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::catalogue::{EquipmentCategory, EquipmentItem};

use super::define_port_error;

define_port_error! {
    /// Errors raised by catalogue repository adapters.
    pub enum CatalogueRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "catalogue repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "catalogue repository query failed: {message}",
    }
}

/// Port for reading and writing categories and equipment items.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogueRepository: Send + Sync {
    /// All categories, ordered by name.
    async fn list_categories(&self) -> Result<Vec<EquipmentCategory>, CatalogueRepositoryError>;

    /// Persist a new category.
    async fn insert_category(
        &self,
        category: &EquipmentCategory,
    ) -> Result<(), CatalogueRepositoryError>;

    /// All equipment items, ordered by name.
    async fn list_equipment(&self) -> Result<Vec<EquipmentItem>, CatalogueRepositoryError>;

    /// Find an equipment item by id.
    async fn find_equipment(
        &self,
        equipment_id: Uuid,
    ) -> Result<Option<EquipmentItem>, CatalogueRepositoryError>;

    /// Persist a new equipment item.
    async fn insert_equipment(&self, item: &EquipmentItem)
        -> Result<(), CatalogueRepositoryError>;

    /// Set the maintenance flag. Returns `false` when the item is unknown.
    async fn set_equipment_availability(
        &self,
        equipment_id: Uuid,
        is_available: bool,
    ) -> Result<bool, CatalogueRepositoryError>;

    /// Delete an item and its dependent rows. Returns `false` when unknown.
    async fn delete_equipment(&self, equipment_id: Uuid)
        -> Result<bool, CatalogueRepositoryError>;
}

/// Fixture implementation for tests that do not exercise the catalogue.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCatalogueRepository;

#[async_trait]
impl CatalogueRepository for FixtureCatalogueRepository {
    async fn list_categories(&self) -> Result<Vec<EquipmentCategory>, CatalogueRepositoryError> {
        Ok(Vec::new())
    }

    async fn insert_category(
        &self,
        _category: &EquipmentCategory,
    ) -> Result<(), CatalogueRepositoryError> {
        Ok(())
    }

    async fn list_equipment(&self) -> Result<Vec<EquipmentItem>, CatalogueRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_equipment(
        &self,
        _equipment_id: Uuid,
    ) -> Result<Option<EquipmentItem>, CatalogueRepositoryError> {
        Ok(None)
    }

    async fn insert_equipment(
        &self,
        _item: &EquipmentItem,
    ) -> Result<(), CatalogueRepositoryError> {
        Ok(())
    }

    async fn set_equipment_availability(
        &self,
        _equipment_id: Uuid,
        _is_available: bool,
    ) -> Result<bool, CatalogueRepositoryError> {
        Ok(false)
    }

    async fn delete_equipment(
        &self,
        _equipment_id: Uuid,
    ) -> Result<bool, CatalogueRepositoryError> {
        Ok(false)
    }
}
