//! Catalogue entities: equipment categories and items.

use serde_json::Value;
use uuid::Uuid;

/// Error raised when a catalogue draft fails validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CatalogueValidationError {
    /// The name is empty or whitespace.
    #[error("name must not be empty")]
    EmptyName,
}

/// A grouping of equipment items, such as "3D printers".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquipmentCategory {
    id: Uuid,
    name: String,
    description: Option<String>,
}

impl EquipmentCategory {
    /// Validate and build a category.
    pub fn new(
        id: Uuid,
        name: impl Into<String>,
        description: Option<String>,
    ) -> Result<Self, CatalogueValidationError> {
        let name = name.into().trim().to_owned();
        if name.is_empty() {
            return Err(CatalogueValidationError::EmptyName);
        }
        Ok(Self {
            id,
            name,
            description,
        })
    }

    /// Category identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Optional free-text description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// Unvalidated input for constructing an [`EquipmentItem`].
#[derive(Debug, Clone)]
pub struct EquipmentDraft {
    /// Identifier for the new item.
    pub id: Uuid,
    /// Category the item belongs to.
    pub category_id: Uuid,
    /// Display name.
    pub name: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Optional structured specifications, stored verbatim.
    pub specifications: Option<Value>,
    /// Optional image location.
    pub image_url: Option<String>,
}

/// A bookable piece of equipment.
///
/// `is_available` is the maintenance flag: items taken out of service keep
/// their bookings but accept no new ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquipmentItem {
    id: Uuid,
    category_id: Uuid,
    name: String,
    description: Option<String>,
    specifications: Option<Value>,
    image_url: Option<String>,
    is_available: bool,
}

impl EquipmentItem {
    /// Validate a draft into an in-service equipment item.
    pub fn new(draft: EquipmentDraft) -> Result<Self, CatalogueValidationError> {
        let name = draft.name.trim().to_owned();
        if name.is_empty() {
            return Err(CatalogueValidationError::EmptyName);
        }
        Ok(Self {
            id: draft.id,
            category_id: draft.category_id,
            name,
            description: draft.description,
            specifications: draft.specifications,
            image_url: draft.image_url,
            is_available: true,
        })
    }

    /// Reconstruct an item from storage without validation.
    pub fn from_parts(draft: EquipmentDraft, is_available: bool) -> Self {
        Self {
            id: draft.id,
            category_id: draft.category_id,
            name: draft.name,
            description: draft.description,
            specifications: draft.specifications,
            image_url: draft.image_url,
            is_available,
        }
    }

    /// Item identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Category the item belongs to.
    pub fn category_id(&self) -> Uuid {
        self.category_id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Optional free-text description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Optional structured specifications.
    pub fn specifications(&self) -> Option<&Value> {
        self.specifications.as_ref()
    }

    /// Optional image location.
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    /// Whether the item currently accepts new bookings.
    pub fn is_available(&self) -> bool {
        self.is_available
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn equipment_draft() -> EquipmentDraft {
        EquipmentDraft {
            id: Uuid::new_v4(),
            category_id: Uuid::new_v4(),
            name: "Prusa MK4".to_owned(),
            description: Some("FDM printer".to_owned()),
            specifications: Some(json!({ "nozzle": "0.4mm" })),
            image_url: None,
        }
    }

    #[test]
    fn new_item_starts_available() {
        let item = EquipmentItem::new(equipment_draft()).expect("valid draft");
        assert!(item.is_available());
        assert_eq!(item.name(), "Prusa MK4");
    }

    #[test]
    fn new_item_rejects_blank_name() {
        let mut draft = equipment_draft();
        draft.name = "  ".to_owned();
        assert_eq!(
            EquipmentItem::new(draft).err(),
            Some(CatalogueValidationError::EmptyName)
        );
    }

    #[test]
    fn category_trims_its_name() {
        let category = EquipmentCategory::new(Uuid::new_v4(), " Laser cutters ", None)
            .expect("valid category");
        assert_eq!(category.name(), "Laser cutters");
    }

    #[test]
    fn category_rejects_blank_name() {
        assert_eq!(
            EquipmentCategory::new(Uuid::new_v4(), "\t", None).err(),
            Some(CatalogueValidationError::EmptyName)
        );
    }
}
