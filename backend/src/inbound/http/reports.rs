//! Report HTTP handlers.
//!
//! ```text
//! GET /api/v1/reports/mine
//! GET /api/v1/reports/overview
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    booking_status_breakdown, catalogue_overview, BookingStatusBreakdown, CatalogueOverview,
};
use crate::inbound::http::auth::Identity;
use crate::inbound::http::catalogue::map_catalogue_error;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Per-user report payload.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserReportResponseBody {
    #[schema(value_type = Object)]
    pub bookings: BookingStatusBreakdown,
    pub total: u64,
    pub active: u64,
}

/// Admin overview payload.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OverviewResponseBody {
    #[schema(value_type = Object)]
    pub bookings: BookingStatusBreakdown,
    #[schema(value_type = Object)]
    pub equipment: CatalogueOverview,
}

/// Booking status breakdown for the authenticated user.
#[utoipa::path(
    get,
    path = "/api/v1/reports/mine",
    responses(
        (status = 200, description = "The caller's booking breakdown", body = UserReportResponseBody),
        (status = 401, description = "Unauthorized", body = ErrorSchema)
    ),
    tags = ["reports"],
    operation_id = "userReport"
)]
#[get("/reports/mine")]
pub async fn user_report(
    state: web::Data<HttpState>,
    identity: Identity,
) -> ApiResult<web::Json<UserReportResponseBody>> {
    let bookings = state
        .bookings_query
        .list_own_bookings(identity.context())
        .await?;
    let breakdown = booking_status_breakdown(bookings.into_iter().map(|b| b.status));
    Ok(web::Json(UserReportResponseBody {
        bookings: breakdown,
        total: breakdown.total(),
        active: breakdown.active(),
    }))
}

/// System-wide overview of bookings and equipment. Admin only.
#[utoipa::path(
    get,
    path = "/api/v1/reports/overview",
    responses(
        (status = 200, description = "System overview", body = OverviewResponseBody),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema)
    ),
    tags = ["reports"],
    operation_id = "overviewReport"
)]
#[get("/reports/overview")]
pub async fn overview_report(
    state: web::Data<HttpState>,
    identity: Identity,
) -> ApiResult<web::Json<OverviewResponseBody>> {
    // list_all_bookings enforces the admin requirement.
    let bookings = state
        .bookings_query
        .list_all_bookings(identity.context())
        .await?;
    let items = state
        .catalogue
        .list_equipment()
        .await
        .map_err(map_catalogue_error)?;
    let categories = state
        .catalogue
        .list_categories()
        .await
        .map_err(map_catalogue_error)?;
    Ok(web::Json(OverviewResponseBody {
        bookings: booking_status_breakdown(bookings.into_iter().map(|b| b.status)),
        equipment: catalogue_overview(&items, &categories),
    }))
}

#[cfg(test)]
#[path = "reports_tests.rs"]
mod tests;
