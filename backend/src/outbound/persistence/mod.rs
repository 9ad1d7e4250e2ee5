//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repository implementations here only translate between Diesel rows and
//! domain types; the availability and lifecycle rules live in the domain.
//! Row structs (`models.rs`) and table definitions (`schema.rs`) are internal
//! and never cross the port boundary. Connections come from a `bb8` pool over
//! `diesel-async`, and every database failure is mapped onto the port's error
//! type.

mod diesel_booking_repository;
mod diesel_catalogue_repository;
mod diesel_error_mapping;
mod diesel_favorite_repository;
mod models;
mod pool;
mod schema;

pub use diesel_booking_repository::DieselBookingRepository;
pub use diesel_catalogue_repository::DieselCatalogueRepository;
pub use diesel_favorite_repository::DieselFavoriteRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
