//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, HttpServer};
use mockable::DefaultClock;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::{BookingCommandService, BookingQueryService};
use crate::inbound::http::bookings::{
    cancel_booking, check_availability, complete_booking, confirm_booking, create_booking,
    list_bookings, list_own_bookings, reject_booking,
};
use crate::inbound::http::catalogue::{
    create_category, create_equipment, delete_equipment, get_equipment, list_categories,
    list_equipment, toggle_maintenance,
};
use crate::inbound::http::favorites::{list_favorites, toggle_favorite};
use crate::inbound::http::health::{live, ready, HealthState};
use crate::inbound::http::reports::{overview_report, user_report};
use crate::inbound::http::state::HttpState;
use crate::middleware::trace::Trace;
use crate::outbound::persistence::{
    DieselBookingRepository, DieselCatalogueRepository, DieselFavoriteRepository,
};

/// Build the HTTP handler state from configuration.
///
/// With a pool, Diesel repositories back every port and the booking
/// command/query services run over them. Without one, fixture ports serve
/// every request, which is what the handler tests and local smoke runs use.
fn build_http_state(config: &ServerConfig) -> HttpState {
    match &config.db_pool {
        Some(pool) => {
            let booking_repo = Arc::new(DieselBookingRepository::new(pool.clone()));
            let catalogue = Arc::new(DieselCatalogueRepository::new(pool.clone()));
            let favorites = Arc::new(DieselFavoriteRepository::new(pool.clone()));
            let clock = Arc::new(DefaultClock);
            HttpState {
                bookings: Arc::new(BookingCommandService::new(
                    booking_repo.clone(),
                    catalogue.clone(),
                    clock.clone(),
                )),
                bookings_query: Arc::new(BookingQueryService::new(booking_repo.clone())),
                booking_repo,
                catalogue,
                favorites,
                clock,
            }
        }
        None => HttpState::fixture(),
    }
}

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let api = web::scope("/api/v1")
        .service(create_booking)
        .service(list_bookings)
        .service(list_own_bookings)
        .service(confirm_booking)
        .service(reject_booking)
        .service(cancel_booking)
        .service(complete_booking)
        .service(check_availability)
        .service(list_categories)
        .service(create_category)
        .service(list_equipment)
        .service(get_equipment)
        .service(create_equipment)
        .service(toggle_maintenance)
        .service(delete_equipment)
        .service(toggle_favorite)
        .service(list_favorites)
        .service(user_report)
        .service(overview_report);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(build_http_state(&config));

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        })
    })
    .bind(config.bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_state_is_used_without_a_pool() {
        let config = ServerConfig::new(([127, 0, 0, 1], 0).into());
        assert!(config.db_pool.is_none());
        // Wiring must not require a database.
        let _ = build_http_state(&config);
    }
}
