//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend on
//! domain ports only and remain testable without I/O. Simple CRUD surfaces
//! (catalogue, favorites) sit directly on repository ports; bookings go
//! through the command/query driving ports.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};

use crate::domain::ports::{
    BookingCommand, BookingQuery, BookingRepository, CatalogueRepository, FavoriteRepository,
    FixtureBookingCommand, FixtureBookingQuery, FixtureBookingRepository,
    FixtureCatalogueRepository, FixtureFavoriteRepository,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub bookings: Arc<dyn BookingCommand>,
    pub bookings_query: Arc<dyn BookingQuery>,
    pub booking_repo: Arc<dyn BookingRepository>,
    pub catalogue: Arc<dyn CatalogueRepository>,
    pub favorites: Arc<dyn FavoriteRepository>,
    pub clock: Arc<dyn Clock>,
}

impl HttpState {
    /// State backed entirely by fixture ports.
    ///
    /// Used when the server starts without a database and by handler tests
    /// that override only the ports they exercise.
    pub fn fixture() -> Self {
        Self {
            bookings: Arc::new(FixtureBookingCommand),
            bookings_query: Arc::new(FixtureBookingQuery),
            booking_repo: Arc::new(FixtureBookingRepository),
            catalogue: Arc::new(FixtureCatalogueRepository),
            favorites: Arc::new(FixtureFavoriteRepository),
            clock: Arc::new(DefaultClock),
        }
    }
}
