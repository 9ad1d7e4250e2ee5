//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly; Diesel uses
//! them for compile-time query validation. Regenerate with
//! `diesel print-schema` after migrations change.

diesel::table! {
    /// Equipment category table.
    equipment_categories (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Display name, unique per deployment.
        name -> Varchar,
        /// Optional free-text description.
        description -> Nullable<Text>,
    }
}

diesel::table! {
    /// Equipment item table.
    equipment_items (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Owning category.
        category_id -> Uuid,
        /// Display name.
        name -> Varchar,
        /// Optional free-text description.
        description -> Nullable<Text>,
        /// Optional structured specifications, stored verbatim.
        specifications -> Nullable<Jsonb>,
        /// Optional image location.
        image_url -> Nullable<Text>,
        /// Maintenance flag; `false` while the item is out of service.
        is_available -> Bool,
    }
}

diesel::table! {
    /// Booking table.
    ///
    /// `status` holds the lowercase lifecycle status string. Conflict checks
    /// treat `[start_at, end_at]` as a closed interval.
    bookings (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Requesting user (asserted by the identity gateway).
        user_id -> Uuid,
        /// Reserved equipment item.
        equipment_id -> Uuid,
        /// Inclusive interval start.
        start_at -> Timestamptz,
        /// Inclusive interval end.
        end_at -> Timestamptz,
        /// Stated purpose of the reservation.
        purpose -> Text,
        /// Lifecycle status string.
        status -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Favorite table.
    ///
    /// A unique index on `(user_id, equipment_id)` backs the at-most-one
    /// favorite invariant.
    favorites (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Owning user.
        user_id -> Uuid,
        /// Bookmarked equipment item.
        equipment_id -> Uuid,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(equipment_items -> equipment_categories (category_id));
diesel::joinable!(bookings -> equipment_items (equipment_id));
diesel::joinable!(favorites -> equipment_items (equipment_id));

diesel::allow_tables_to_appear_in_same_query!(
    equipment_categories,
    equipment_items,
    bookings,
    favorites,
);
