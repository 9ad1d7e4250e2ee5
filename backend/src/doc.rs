//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct which generates the OpenAPI specification
//! for the REST API: every HTTP endpoint from the inbound layer, the domain
//! error wrappers, and the gateway header security scheme. Swagger UI serves
//! the document in debug builds only.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::bookings::{
    AvailabilityResponseBody, BookingListResponseBody, BookingResponseBody,
    CreateBookingRequestBody,
};
use crate::inbound::http::catalogue::{
    CategoryResponseBody, CreateCategoryRequestBody, CreateEquipmentRequestBody,
    EquipmentResponseBody, MaintenanceResponseBody,
};
use crate::inbound::http::favorites::{FavoriteResponseBody, ToggleFavoriteResponseBody};
use crate::inbound::http::reports::{OverviewResponseBody, UserReportResponseBody};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};

/// Enrich the generated document with the gateway identity header scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "GatewayIdentity",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                "x-user-id",
                "User identity asserted by the upstream gateway, paired with x-user-role.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Equipment booking API",
        description = "HTTP interface for equipment reservations, catalogue management, \
                       favorites, reports, and health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("GatewayIdentity" = [])),
    paths(
        crate::inbound::http::bookings::create_booking,
        crate::inbound::http::bookings::list_bookings,
        crate::inbound::http::bookings::list_own_bookings,
        crate::inbound::http::bookings::confirm_booking,
        crate::inbound::http::bookings::reject_booking,
        crate::inbound::http::bookings::cancel_booking,
        crate::inbound::http::bookings::complete_booking,
        crate::inbound::http::bookings::check_availability,
        crate::inbound::http::catalogue::list_categories,
        crate::inbound::http::catalogue::create_category,
        crate::inbound::http::catalogue::list_equipment,
        crate::inbound::http::catalogue::get_equipment,
        crate::inbound::http::catalogue::create_equipment,
        crate::inbound::http::catalogue::toggle_maintenance,
        crate::inbound::http::catalogue::delete_equipment,
        crate::inbound::http::favorites::toggle_favorite,
        crate::inbound::http::favorites::list_favorites,
        crate::inbound::http::reports::user_report,
        crate::inbound::http::reports::overview_report,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        CreateBookingRequestBody,
        BookingResponseBody,
        BookingListResponseBody,
        AvailabilityResponseBody,
        CategoryResponseBody,
        CreateCategoryRequestBody,
        EquipmentResponseBody,
        CreateEquipmentRequestBody,
        MaintenanceResponseBody,
        FavoriteResponseBody,
        ToggleFavoriteResponseBody,
        UserReportResponseBody,
        OverviewResponseBody,
    )),
    tags(
        (name = "bookings", description = "Placing bookings and walking their lifecycle"),
        (name = "catalogue", description = "Equipment categories and items"),
        (name = "favorites", description = "Per-user equipment bookmarks"),
        (name = "reports", description = "Booking and catalogue aggregations"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
