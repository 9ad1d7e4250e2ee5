//! Port for favorite persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::favorites::Favorite;

use super::define_port_error;

define_port_error! {
    /// Errors raised by favorite repository adapters.
    pub enum FavoriteRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "favorite repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "favorite repository query failed: {message}",
    }
}

/// Port for reading and writing favorites.
///
/// Adapters must uphold the at-most-one invariant per (user, equipment)
/// pair; the Diesel adapter backs it with a unique index.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    /// Find the favorite a user holds on an item, if any.
    async fn find(
        &self,
        user_id: Uuid,
        equipment_id: Uuid,
    ) -> Result<Option<Favorite>, FavoriteRepositoryError>;

    /// Persist a new favorite.
    async fn insert(&self, favorite: &Favorite) -> Result<(), FavoriteRepositoryError>;

    /// Remove a favorite by id. Returns `false` when unknown.
    async fn delete(&self, favorite_id: Uuid) -> Result<bool, FavoriteRepositoryError>;

    /// All favorites held by a user, newest first.
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Favorite>, FavoriteRepositoryError>;
}

/// Fixture implementation for tests that do not exercise favorites.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureFavoriteRepository;

#[async_trait]
impl FavoriteRepository for FixtureFavoriteRepository {
    async fn find(
        &self,
        _user_id: Uuid,
        _equipment_id: Uuid,
    ) -> Result<Option<Favorite>, FavoriteRepositoryError> {
        Ok(None)
    }

    async fn insert(&self, _favorite: &Favorite) -> Result<(), FavoriteRepositoryError> {
        Ok(())
    }

    async fn delete(&self, _favorite_id: Uuid) -> Result<bool, FavoriteRepositoryError> {
        Ok(false)
    }

    async fn list_for_user(
        &self,
        _user_id: Uuid,
    ) -> Result<Vec<Favorite>, FavoriteRepositoryError> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use chrono::Utc;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn fixture_find_returns_none() {
        let repo = FixtureFavoriteRepository;
        let found = repo
            .find(Uuid::new_v4(), Uuid::new_v4())
            .await
            .expect("fixture lookup succeeds");
        assert!(found.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_insert_succeeds() {
        let repo = FixtureFavoriteRepository;
        let favorite = Favorite::new(Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4(), Utc::now());
        repo.insert(&favorite).await.expect("fixture insert succeeds");
    }

    #[rstest]
    fn query_error_formats_message() {
        let err = FavoriteRepositoryError::query("duplicate key");
        assert!(err.to_string().contains("duplicate key"));
    }
}
