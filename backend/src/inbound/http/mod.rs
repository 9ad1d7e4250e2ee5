//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod bookings;
pub mod catalogue;
pub mod error;
pub mod favorites;
pub mod health;
pub mod reports;
pub mod schemas;
pub mod state;
pub mod validation;

pub use error::ApiResult;
