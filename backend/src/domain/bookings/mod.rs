//! Booking entity, interval arithmetic and the status lifecycle.

mod booking;
mod interval;
mod status;

pub use booking::{Booking, BookingDraft, BookingValidationError};
pub use interval::{BookingInterval, EndNotAfterStart};
pub use status::{BookingStatus, IllegalTransition, ParseBookingStatusError};

#[cfg(test)]
mod tests;
