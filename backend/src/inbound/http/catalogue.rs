//! Catalogue HTTP handlers.
//!
//! ```text
//! GET    /api/v1/categories
//! POST   /api/v1/categories
//! GET    /api/v1/equipment
//! GET    /api/v1/equipment/{id}
//! POST   /api/v1/equipment
//! POST   /api/v1/equipment/{id}/maintenance
//! DELETE /api/v1/equipment/{id}
//! ```

use actix_web::{delete, get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ports::{BookingRepositoryError, CatalogueRepositoryError};
use crate::domain::{EquipmentCategory, EquipmentDraft, EquipmentItem, Error};
use crate::inbound::http::auth::Identity;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_uuid, FieldName};
use crate::inbound::http::ApiResult;

pub(crate) fn map_catalogue_error(error: CatalogueRepositoryError) -> Error {
    match error {
        CatalogueRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("catalogue repository unavailable: {message}"))
        }
        CatalogueRepositoryError::Query { message } => {
            Error::internal(format!("catalogue repository error: {message}"))
        }
    }
}

fn map_booking_guard_error(error: BookingRepositoryError) -> Error {
    match error {
        BookingRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("booking repository unavailable: {message}"))
        }
        other => Error::internal(format!("booking repository error: {other}")),
    }
}

fn require_catalogue_manager(identity: &Identity) -> Result<(), Error> {
    if !identity.context().role().can_manage_catalogue() {
        return Err(Error::forbidden("managing the catalogue requires admin"));
    }
    Ok(())
}

/// Category payload.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponseBody {
    #[schema(format = "uuid")]
    pub id: String,
    pub name: String,
    pub description: Option<String>,
}

impl From<EquipmentCategory> for CategoryResponseBody {
    fn from(value: EquipmentCategory) -> Self {
        Self {
            id: value.id().to_string(),
            name: value.name().to_owned(),
            description: value.description().map(str::to_owned),
        }
    }
}

/// Request payload for creating a category.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequestBody {
    pub name: String,
    pub description: Option<String>,
}

/// Equipment item payload.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentResponseBody {
    #[schema(format = "uuid")]
    pub id: String,
    #[schema(format = "uuid")]
    pub category_id: String,
    pub name: String,
    pub description: Option<String>,
    pub specifications: Option<serde_json::Value>,
    pub image_url: Option<String>,
    pub is_available: bool,
}

impl From<EquipmentItem> for EquipmentResponseBody {
    fn from(value: EquipmentItem) -> Self {
        Self {
            id: value.id().to_string(),
            category_id: value.category_id().to_string(),
            name: value.name().to_owned(),
            description: value.description().map(str::to_owned),
            specifications: value.specifications().cloned(),
            image_url: value.image_url().map(str::to_owned),
            is_available: value.is_available(),
        }
    }
}

/// Request payload for creating an equipment item.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEquipmentRequestBody {
    #[schema(format = "uuid")]
    pub category_id: String,
    pub name: String,
    pub description: Option<String>,
    pub specifications: Option<serde_json::Value>,
    pub image_url: Option<String>,
}

/// Maintenance toggle result.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceResponseBody {
    #[schema(format = "uuid")]
    pub id: String,
    pub is_available: bool,
}

/// List all categories.
#[utoipa::path(
    get,
    path = "/api/v1/categories",
    responses(
        (status = 200, description = "All categories", body = [CategoryResponseBody]),
        (status = 401, description = "Unauthorized", body = ErrorSchema)
    ),
    tags = ["catalogue"],
    operation_id = "listCategories"
)]
#[get("/categories")]
pub async fn list_categories(
    state: web::Data<HttpState>,
    _identity: Identity,
) -> ApiResult<web::Json<Vec<CategoryResponseBody>>> {
    let categories = state
        .catalogue
        .list_categories()
        .await
        .map_err(map_catalogue_error)?;
    Ok(web::Json(categories.into_iter().map(Into::into).collect()))
}

/// Create a category. Admin only.
#[utoipa::path(
    post,
    path = "/api/v1/categories",
    request_body = CreateCategoryRequestBody,
    responses(
        (status = 200, description = "Category created", body = CategoryResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema)
    ),
    tags = ["catalogue"],
    operation_id = "createCategory"
)]
#[post("/categories")]
pub async fn create_category(
    state: web::Data<HttpState>,
    identity: Identity,
    payload: web::Json<CreateCategoryRequestBody>,
) -> ApiResult<web::Json<CategoryResponseBody>> {
    require_catalogue_manager(&identity)?;
    let body = payload.into_inner();
    let category = EquipmentCategory::new(Uuid::new_v4(), body.name, body.description)
        .map_err(|err| {
            Error::invalid_request(err.to_string()).with_details(json!({ "field": "name" }))
        })?;
    state
        .catalogue
        .insert_category(&category)
        .await
        .map_err(map_catalogue_error)?;
    Ok(web::Json(category.into()))
}

/// List all equipment items.
#[utoipa::path(
    get,
    path = "/api/v1/equipment",
    responses(
        (status = 200, description = "All equipment items", body = [EquipmentResponseBody]),
        (status = 401, description = "Unauthorized", body = ErrorSchema)
    ),
    tags = ["catalogue"],
    operation_id = "listEquipment"
)]
#[get("/equipment")]
pub async fn list_equipment(
    state: web::Data<HttpState>,
    _identity: Identity,
) -> ApiResult<web::Json<Vec<EquipmentResponseBody>>> {
    let items = state
        .catalogue
        .list_equipment()
        .await
        .map_err(map_catalogue_error)?;
    Ok(web::Json(items.into_iter().map(Into::into).collect()))
}

/// Read one equipment item.
#[utoipa::path(
    get,
    path = "/api/v1/equipment/{id}",
    params(("id" = Uuid, Path, description = "Equipment identifier")),
    responses(
        (status = 200, description = "The equipment item", body = EquipmentResponseBody),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 404, description = "Equipment not found", body = ErrorSchema)
    ),
    tags = ["catalogue"],
    operation_id = "getEquipment"
)]
#[get("/equipment/{id}")]
pub async fn get_equipment(
    state: web::Data<HttpState>,
    _identity: Identity,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<EquipmentResponseBody>> {
    let equipment_id = path.into_inner();
    let item = state
        .catalogue
        .find_equipment(equipment_id)
        .await
        .map_err(map_catalogue_error)?
        .ok_or_else(|| Error::not_found(format!("equipment {equipment_id} not found")))?;
    Ok(web::Json(item.into()))
}

/// Create an equipment item. Admin only.
#[utoipa::path(
    post,
    path = "/api/v1/equipment",
    request_body = CreateEquipmentRequestBody,
    responses(
        (status = 200, description = "Equipment created", body = EquipmentResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema)
    ),
    tags = ["catalogue"],
    operation_id = "createEquipment"
)]
#[post("/equipment")]
pub async fn create_equipment(
    state: web::Data<HttpState>,
    identity: Identity,
    payload: web::Json<CreateEquipmentRequestBody>,
) -> ApiResult<web::Json<EquipmentResponseBody>> {
    require_catalogue_manager(&identity)?;
    let body = payload.into_inner();
    let item = EquipmentItem::new(EquipmentDraft {
        id: Uuid::new_v4(),
        category_id: parse_uuid(&body.category_id, FieldName::new("categoryId"))?,
        name: body.name,
        description: body.description,
        specifications: body.specifications,
        image_url: body.image_url,
    })
    .map_err(|err| {
        Error::invalid_request(err.to_string()).with_details(json!({ "field": "name" }))
    })?;
    state
        .catalogue
        .insert_equipment(&item)
        .await
        .map_err(map_catalogue_error)?;
    Ok(web::Json(item.into()))
}

/// Toggle the maintenance flag on an equipment item. Admin only.
#[utoipa::path(
    post,
    path = "/api/v1/equipment/{id}/maintenance",
    params(("id" = Uuid, Path, description = "Equipment identifier")),
    responses(
        (status = 200, description = "New availability state", body = MaintenanceResponseBody),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Equipment not found", body = ErrorSchema)
    ),
    tags = ["catalogue"],
    operation_id = "toggleMaintenance"
)]
#[post("/equipment/{id}/maintenance")]
pub async fn toggle_maintenance(
    state: web::Data<HttpState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<MaintenanceResponseBody>> {
    require_catalogue_manager(&identity)?;
    let equipment_id = path.into_inner();
    let item = state
        .catalogue
        .find_equipment(equipment_id)
        .await
        .map_err(map_catalogue_error)?
        .ok_or_else(|| Error::not_found(format!("equipment {equipment_id} not found")))?;
    let next = !item.is_available();
    let updated = state
        .catalogue
        .set_equipment_availability(equipment_id, next)
        .await
        .map_err(map_catalogue_error)?;
    if !updated {
        return Err(Error::not_found(format!(
            "equipment {equipment_id} not found"
        )));
    }
    Ok(web::Json(MaintenanceResponseBody {
        id: equipment_id.to_string(),
        is_available: next,
    }))
}

/// Delete an equipment item. Admin only.
///
/// Refused while any confirmed booking references the item; pending
/// bookings do not block deletion.
#[utoipa::path(
    delete,
    path = "/api/v1/equipment/{id}",
    params(("id" = Uuid, Path, description = "Equipment identifier")),
    responses(
        (status = 204, description = "Equipment deleted"),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Equipment not found", body = ErrorSchema),
        (status = 409, description = "Confirmed bookings reference the item", body = ErrorSchema)
    ),
    tags = ["catalogue"],
    operation_id = "deleteEquipment"
)]
#[delete("/equipment/{id}")]
pub async fn delete_equipment(
    state: web::Data<HttpState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    require_catalogue_manager(&identity)?;
    let equipment_id = path.into_inner();
    let blocked = state
        .booking_repo
        .has_confirmed_for_equipment(equipment_id)
        .await
        .map_err(map_booking_guard_error)?;
    if blocked {
        return Err(
            Error::conflict("equipment has confirmed bookings").with_details(json!({
                "code": "equipment_in_use",
                "equipmentId": equipment_id,
            })),
        );
    }
    let deleted = state
        .catalogue
        .delete_equipment(equipment_id)
        .await
        .map_err(map_catalogue_error)?;
    if !deleted {
        return Err(Error::not_found(format!(
            "equipment {equipment_id} not found"
        )));
    }
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "catalogue_tests.rs"]
mod tests;
