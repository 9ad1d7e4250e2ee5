//! Favorites: a user's bookmarks on equipment items.
//!
//! At most one favorite exists per (user, equipment) pair; the persistence
//! adapter backs this with a unique index and the toggle operation relies
//! on it.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A user's bookmark on an equipment item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Favorite {
    id: Uuid,
    user_id: Uuid,
    equipment_id: Uuid,
    created_at: DateTime<Utc>,
}

impl Favorite {
    /// Build a favorite.
    pub fn new(id: Uuid, user_id: Uuid, equipment_id: Uuid, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id,
            equipment_id,
            created_at,
        }
    }

    /// Favorite identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Owning user.
    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    /// Bookmarked equipment item.
    pub fn equipment_id(&self) -> Uuid {
        self.equipment_id
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
