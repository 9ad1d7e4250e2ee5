//! Favorite HTTP handlers.
//!
//! ```text
//! POST /api/v1/equipment/{id}/favorite
//! GET  /api/v1/favorites
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ports::FavoriteRepositoryError;
use crate::domain::{Error, Favorite};
use crate::inbound::http::auth::Identity;
use crate::inbound::http::catalogue::map_catalogue_error;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

fn map_favorite_error(error: FavoriteRepositoryError) -> Error {
    match error {
        FavoriteRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("favorite repository unavailable: {message}"))
        }
        FavoriteRepositoryError::Query { message } => {
            Error::internal(format!("favorite repository error: {message}"))
        }
    }
}

/// Favorite payload.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteResponseBody {
    #[schema(format = "uuid")]
    pub id: String,
    #[schema(format = "uuid")]
    pub equipment_id: String,
    #[schema(format = "date-time")]
    pub created_at: String,
}

impl From<Favorite> for FavoriteResponseBody {
    fn from(value: Favorite) -> Self {
        Self {
            id: value.id().to_string(),
            equipment_id: value.equipment_id().to_string(),
            created_at: value.created_at().to_rfc3339(),
        }
    }
}

/// Toggle result.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ToggleFavoriteResponseBody {
    /// Whether the item is favorited after the toggle.
    pub favorited: bool,
}

/// Toggle the caller's favorite on an equipment item.
///
/// At most one favorite exists per (user, equipment) pair; toggling flips
/// between present and absent. Administrators cannot hold favorites.
#[utoipa::path(
    post,
    path = "/api/v1/equipment/{id}/favorite",
    params(("id" = Uuid, Path, description = "Equipment identifier")),
    responses(
        (status = 200, description = "Toggle result", body = ToggleFavoriteResponseBody),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Equipment not found", body = ErrorSchema)
    ),
    tags = ["favorites"],
    operation_id = "toggleFavorite"
)]
#[post("/equipment/{id}/favorite")]
pub async fn toggle_favorite(
    state: web::Data<HttpState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<ToggleFavoriteResponseBody>> {
    let acting = identity.context();
    if !acting.role().can_place_bookings() {
        return Err(Error::forbidden("administrators cannot hold favorites"));
    }
    let equipment_id = path.into_inner();
    state
        .catalogue
        .find_equipment(equipment_id)
        .await
        .map_err(map_catalogue_error)?
        .ok_or_else(|| Error::not_found(format!("equipment {equipment_id} not found")))?;

    let existing = state
        .favorites
        .find(acting.user_id(), equipment_id)
        .await
        .map_err(map_favorite_error)?;
    let favorited = match existing {
        Some(favorite) => {
            state
                .favorites
                .delete(favorite.id())
                .await
                .map_err(map_favorite_error)?;
            false
        }
        None => {
            let favorite = Favorite::new(
                Uuid::new_v4(),
                acting.user_id(),
                equipment_id,
                state.clock.utc(),
            );
            state
                .favorites
                .insert(&favorite)
                .await
                .map_err(map_favorite_error)?;
            true
        }
    };
    Ok(web::Json(ToggleFavoriteResponseBody { favorited }))
}

/// List the caller's favorites.
#[utoipa::path(
    get,
    path = "/api/v1/favorites",
    responses(
        (status = 200, description = "The caller's favorites", body = [FavoriteResponseBody]),
        (status = 401, description = "Unauthorized", body = ErrorSchema)
    ),
    tags = ["favorites"],
    operation_id = "listFavorites"
)]
#[get("/favorites")]
pub async fn list_favorites(
    state: web::Data<HttpState>,
    identity: Identity,
) -> ApiResult<web::Json<Vec<FavoriteResponseBody>>> {
    let favorites = state
        .favorites
        .list_for_user(identity.context().user_id())
        .await
        .map_err(map_favorite_error)?;
    Ok(web::Json(favorites.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
#[path = "favorites_tests.rs"]
mod tests;
