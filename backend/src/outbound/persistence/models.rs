//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{bookings, equipment_categories, equipment_items, favorites};

// ---------------------------------------------------------------------------
// Catalogue models
// ---------------------------------------------------------------------------

/// Row struct for reading from the equipment_categories table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = equipment_categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CategoryRow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
}

/// Insertable struct for creating category records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = equipment_categories)]
pub(crate) struct NewCategoryRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub description: Option<&'a str>,
}

/// Row struct for reading from the equipment_items table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = equipment_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct EquipmentRow {
    pub id: Uuid,
    pub category_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub specifications: Option<serde_json::Value>,
    pub image_url: Option<String>,
    pub is_available: bool,
}

/// Insertable struct for creating equipment records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = equipment_items)]
pub(crate) struct NewEquipmentRow<'a> {
    pub id: Uuid,
    pub category_id: Uuid,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub specifications: Option<&'a serde_json::Value>,
    pub image_url: Option<&'a str>,
    pub is_available: bool,
}

// ---------------------------------------------------------------------------
// Booking models
// ---------------------------------------------------------------------------

/// Row struct for reading from the bookings table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = bookings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BookingRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub equipment_id: Uuid,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub purpose: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating booking records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = bookings)]
pub(crate) struct NewBookingRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub equipment_id: Uuid,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub purpose: &'a str,
    pub status: &'a str,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Favorite models
// ---------------------------------------------------------------------------

/// Row struct for reading from the favorites table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = favorites)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct FavoriteRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub equipment_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating favorite records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = favorites)]
pub(crate) struct NewFavoriteRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub equipment_id: Uuid,
    pub created_at: DateTime<Utc>,
}
