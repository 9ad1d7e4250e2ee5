//! Domain layer: entities, the availability and lifecycle engine, and the
//! ports it is driven through.

pub mod auth;
pub mod availability;
mod booking_service;
pub mod bookings;
pub mod catalogue;
mod error;
pub mod favorites;
pub mod ports;
pub mod reports;

pub use auth::{AuthContext, ParseRoleError, Role};
pub use availability::{
    check_availability, find_conflict, recheck_for_confirmation, ActiveBooking, AvailabilityError,
};
pub use booking_service::{BookingCommandService, BookingQueryService};
pub use bookings::{
    Booking, BookingDraft, BookingInterval, BookingStatus, BookingValidationError,
    EndNotAfterStart, IllegalTransition, ParseBookingStatusError,
};
pub use catalogue::{
    CatalogueValidationError, EquipmentCategory, EquipmentDraft, EquipmentItem,
};
pub use error::{Error, ErrorCode};
pub use favorites::Favorite;
pub use reports::{
    booking_status_breakdown, catalogue_overview, BookingStatusBreakdown, CatalogueOverview,
};
