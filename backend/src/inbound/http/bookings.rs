//! Booking HTTP handlers.
//!
//! ```text
//! POST /api/v1/bookings
//! GET  /api/v1/bookings
//! GET  /api/v1/bookings/mine
//! POST /api/v1/bookings/{id}/confirm
//! POST /api/v1/bookings/{id}/reject
//! POST /api/v1/bookings/{id}/cancel
//! POST /api/v1/bookings/{id}/complete
//! GET  /api/v1/equipment/{id}/availability
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ports::{
    BookingPayload, CheckAvailabilityRequest, CreateBookingRequest, TransitionBookingRequest,
};
use crate::domain::ErrorCode;
use crate::inbound::http::auth::Identity;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    missing_field_error, parse_rfc3339_timestamp, parse_uuid, FieldName,
};
use crate::inbound::http::ApiResult;

/// Request payload for placing a booking.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequestBody {
    #[schema(format = "uuid")]
    pub equipment_id: String,
    #[schema(format = "date-time")]
    pub start: String,
    #[schema(format = "date-time")]
    pub end: String,
    pub purpose: String,
}

/// Booking payload returned by every booking endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponseBody {
    #[schema(format = "uuid")]
    pub id: String,
    #[schema(format = "uuid")]
    pub user_id: String,
    #[schema(format = "uuid")]
    pub equipment_id: String,
    #[schema(format = "date-time")]
    pub start: String,
    #[schema(format = "date-time")]
    pub end: String,
    pub purpose: String,
    #[schema(example = "pending")]
    pub status: String,
    #[schema(format = "date-time")]
    pub created_at: String,
}

impl From<BookingPayload> for BookingResponseBody {
    fn from(value: BookingPayload) -> Self {
        Self {
            id: value.id.to_string(),
            user_id: value.user_id.to_string(),
            equipment_id: value.equipment_id.to_string(),
            start: value.start.to_rfc3339(),
            end: value.end.to_rfc3339(),
            purpose: value.purpose,
            status: value.status.as_str().to_owned(),
            created_at: value.created_at.to_rfc3339(),
        }
    }
}

/// List wrapper for booking responses.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingListResponseBody {
    pub bookings: Vec<BookingResponseBody>,
}

impl From<Vec<BookingPayload>> for BookingListResponseBody {
    fn from(value: Vec<BookingPayload>) -> Self {
        Self {
            bookings: value.into_iter().map(Into::into).collect(),
        }
    }
}

/// Place a booking for the authenticated user.
#[utoipa::path(
    post,
    path = "/api/v1/bookings",
    request_body = CreateBookingRequestBody,
    responses(
        (status = 200, description = "Booking placed as pending", body = BookingResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Equipment not found", body = ErrorSchema),
        (status = 409, description = "Interval conflict or maintenance", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["bookings"],
    operation_id = "createBooking"
)]
#[post("/bookings")]
pub async fn create_booking(
    state: web::Data<HttpState>,
    identity: Identity,
    payload: web::Json<CreateBookingRequestBody>,
) -> ApiResult<web::Json<BookingResponseBody>> {
    let body = payload.into_inner();
    let request = CreateBookingRequest {
        acting: identity.context(),
        equipment_id: parse_uuid(&body.equipment_id, FieldName::new("equipmentId"))?,
        start: parse_rfc3339_timestamp(&body.start, FieldName::new("start"))?,
        end: parse_rfc3339_timestamp(&body.end, FieldName::new("end"))?,
        purpose: body.purpose,
    };
    let booking = state.bookings.create_booking(request).await?;
    Ok(web::Json(booking.into()))
}

/// List every booking. Admin only.
#[utoipa::path(
    get,
    path = "/api/v1/bookings",
    responses(
        (status = 200, description = "All bookings", body = BookingListResponseBody),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema)
    ),
    tags = ["bookings"],
    operation_id = "listBookings"
)]
#[get("/bookings")]
pub async fn list_bookings(
    state: web::Data<HttpState>,
    identity: Identity,
) -> ApiResult<web::Json<BookingListResponseBody>> {
    let bookings = state
        .bookings_query
        .list_all_bookings(identity.context())
        .await?;
    Ok(web::Json(bookings.into()))
}

/// List the authenticated user's bookings.
#[utoipa::path(
    get,
    path = "/api/v1/bookings/mine",
    responses(
        (status = 200, description = "The caller's bookings", body = BookingListResponseBody),
        (status = 401, description = "Unauthorized", body = ErrorSchema)
    ),
    tags = ["bookings"],
    operation_id = "listOwnBookings"
)]
#[get("/bookings/mine")]
pub async fn list_own_bookings(
    state: web::Data<HttpState>,
    identity: Identity,
) -> ApiResult<web::Json<BookingListResponseBody>> {
    let bookings = state
        .bookings_query
        .list_own_bookings(identity.context())
        .await?;
    Ok(web::Json(bookings.into()))
}

/// Confirm a pending booking. Admin only.
#[utoipa::path(
    post,
    path = "/api/v1/bookings/{id}/confirm",
    params(("id" = Uuid, Path, description = "Booking identifier")),
    responses(
        (status = 200, description = "Booking confirmed", body = BookingResponseBody),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Booking not found", body = ErrorSchema),
        (status = 409, description = "Illegal transition or interval conflict", body = ErrorSchema)
    ),
    tags = ["bookings"],
    operation_id = "confirmBooking"
)]
#[post("/bookings/{id}/confirm")]
pub async fn confirm_booking(
    state: web::Data<HttpState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<BookingResponseBody>> {
    let booking = state
        .bookings
        .confirm_booking(TransitionBookingRequest {
            acting: identity.context(),
            booking_id: path.into_inner(),
        })
        .await?;
    Ok(web::Json(booking.into()))
}

/// Reject a pending booking. Admin only.
#[utoipa::path(
    post,
    path = "/api/v1/bookings/{id}/reject",
    params(("id" = Uuid, Path, description = "Booking identifier")),
    responses(
        (status = 200, description = "Booking rejected", body = BookingResponseBody),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Booking not found", body = ErrorSchema),
        (status = 409, description = "Illegal transition", body = ErrorSchema)
    ),
    tags = ["bookings"],
    operation_id = "rejectBooking"
)]
#[post("/bookings/{id}/reject")]
pub async fn reject_booking(
    state: web::Data<HttpState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<BookingResponseBody>> {
    let booking = state
        .bookings
        .reject_booking(TransitionBookingRequest {
            acting: identity.context(),
            booking_id: path.into_inner(),
        })
        .await?;
    Ok(web::Json(booking.into()))
}

/// Cancel a booking. Owner or admin.
#[utoipa::path(
    post,
    path = "/api/v1/bookings/{id}/cancel",
    params(("id" = Uuid, Path, description = "Booking identifier")),
    responses(
        (status = 200, description = "Booking cancelled", body = BookingResponseBody),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Booking not found", body = ErrorSchema),
        (status = 409, description = "Illegal transition", body = ErrorSchema)
    ),
    tags = ["bookings"],
    operation_id = "cancelBooking"
)]
#[post("/bookings/{id}/cancel")]
pub async fn cancel_booking(
    state: web::Data<HttpState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<BookingResponseBody>> {
    let booking = state
        .bookings
        .cancel_booking(TransitionBookingRequest {
            acting: identity.context(),
            booking_id: path.into_inner(),
        })
        .await?;
    Ok(web::Json(booking.into()))
}

/// Mark a confirmed booking as completed. Admin only.
#[utoipa::path(
    post,
    path = "/api/v1/bookings/{id}/complete",
    params(("id" = Uuid, Path, description = "Booking identifier")),
    responses(
        (status = 200, description = "Booking completed", body = BookingResponseBody),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Booking not found", body = ErrorSchema),
        (status = 409, description = "Illegal transition", body = ErrorSchema)
    ),
    tags = ["bookings"],
    operation_id = "completeBooking"
)]
#[post("/bookings/{id}/complete")]
pub async fn complete_booking(
    state: web::Data<HttpState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<BookingResponseBody>> {
    let booking = state
        .bookings
        .complete_booking(TransitionBookingRequest {
            acting: identity.context(),
            booking_id: path.into_inner(),
        })
        .await?;
    Ok(web::Json(booking.into()))
}

/// Query parameters for the availability probe.
#[derive(Debug, Deserialize)]
pub struct AvailabilityParams {
    start: Option<String>,
    end: Option<String>,
}

/// Availability probe result for calendar previews.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponseBody {
    pub available: bool,
    /// Why the interval cannot be granted, when it cannot.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Probe whether an interval could be granted right now.
///
/// Conflicts and maintenance report `available: false` with a reason rather
/// than an error status; malformed input and unknown equipment still fail.
#[utoipa::path(
    get,
    path = "/api/v1/equipment/{id}/availability",
    params(
        ("id" = Uuid, Path, description = "Equipment identifier"),
        ("start" = String, Query, description = "RFC 3339 interval start"),
        ("end" = String, Query, description = "RFC 3339 interval end")
    ),
    responses(
        (status = 200, description = "Probe result", body = AvailabilityResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 404, description = "Equipment not found", body = ErrorSchema)
    ),
    tags = ["bookings"],
    operation_id = "checkAvailability"
)]
#[get("/equipment/{id}/availability")]
pub async fn check_availability(
    state: web::Data<HttpState>,
    _identity: Identity,
    path: web::Path<Uuid>,
    params: web::Query<AvailabilityParams>,
) -> ApiResult<web::Json<AvailabilityResponseBody>> {
    let params = params.into_inner();
    let start = params
        .start
        .ok_or_else(|| missing_field_error(FieldName::new("start")))?;
    let end = params
        .end
        .ok_or_else(|| missing_field_error(FieldName::new("end")))?;
    let request = CheckAvailabilityRequest {
        equipment_id: path.into_inner(),
        start: parse_rfc3339_timestamp(&start, FieldName::new("start"))?,
        end: parse_rfc3339_timestamp(&end, FieldName::new("end"))?,
    };
    match state.bookings.check_availability(request).await {
        Ok(()) => Ok(web::Json(AvailabilityResponseBody {
            available: true,
            reason: None,
            details: None,
        })),
        Err(err) if err.code() == ErrorCode::Conflict => Ok(web::Json(AvailabilityResponseBody {
            available: false,
            reason: Some(err.message().to_owned()),
            details: err.details().cloned(),
        })),
        Err(err) => Err(err),
    }
}

#[cfg(test)]
#[path = "bookings_tests.rs"]
mod tests;
