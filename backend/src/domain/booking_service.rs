//! Booking domain services.
//!
//! These services implement the booking driving ports: placing bookings
//! through the availability checker, walking the status lifecycle, and
//! reading bookings back. All clock reads go through the injected
//! [`mockable::Clock`] so tests control time.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use uuid::Uuid;

use crate::domain::auth::AuthContext;
use crate::domain::availability::{
    check_availability, recheck_for_confirmation, ActiveBooking, AvailabilityError,
};
use crate::domain::bookings::{
    Booking, BookingDraft, BookingInterval, BookingStatus, IllegalTransition,
};
use crate::domain::ports::{
    BookingCommand, BookingPayload, BookingQuery, BookingRepository, BookingRepositoryError,
    CatalogueRepository, CatalogueRepositoryError, CheckAvailabilityRequest, CreateBookingRequest,
    GetBookingRequest, TransitionBookingRequest,
};
use crate::domain::Error;

fn map_booking_repository_error(error: BookingRepositoryError) -> Error {
    match error {
        BookingRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("booking repository unavailable: {message}"))
        }
        BookingRepositoryError::Query { message } => {
            Error::internal(format!("booking repository error: {message}"))
        }
        BookingRepositoryError::Conflict { booking_id } => conflict_error(booking_id),
    }
}

fn map_catalogue_repository_error(error: CatalogueRepositoryError) -> Error {
    match error {
        CatalogueRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("catalogue repository unavailable: {message}"))
        }
        CatalogueRepositoryError::Query { message } => {
            Error::internal(format!("catalogue repository error: {message}"))
        }
    }
}

fn conflict_error(booking_id: Uuid) -> Error {
    Error::conflict("equipment is already booked for the requested interval").with_details(json!({
        "code": "booking_conflict",
        "conflictingBookingId": booking_id,
    }))
}

fn map_availability_error(error: AvailabilityError) -> Error {
    match error {
        AvailabilityError::EquipmentNotFound { equipment_id } => {
            Error::not_found(format!("equipment {equipment_id} not found"))
        }
        AvailabilityError::UnderMaintenance { equipment_id } => {
            Error::conflict("equipment is under maintenance").with_details(json!({
                "code": "equipment_unavailable",
                "equipmentId": equipment_id,
            }))
        }
        AvailabilityError::StartInPast => {
            Error::invalid_request("booking start must not lie in the past")
                .with_details(json!({ "code": "start_in_past" }))
        }
        AvailabilityError::Conflict { booking_id } => conflict_error(booking_id),
    }
}

fn map_illegal_transition(error: IllegalTransition) -> Error {
    Error::conflict(error.to_string()).with_details(json!({
        "code": "illegal_transition",
        "from": error.from.as_str(),
        "to": error.to.as_str(),
    }))
}

fn parse_interval(
    start: chrono::DateTime<chrono::Utc>,
    end: chrono::DateTime<chrono::Utc>,
) -> Result<BookingInterval, Error> {
    BookingInterval::try_new(start, end).map_err(|err| {
        Error::invalid_request(err.to_string()).with_details(json!({ "code": "invalid_interval" }))
    })
}

/// Booking service implementing the command driving port.
#[derive(Clone)]
pub struct BookingCommandService<B, C> {
    booking_repo: Arc<B>,
    catalogue_repo: Arc<C>,
    clock: Arc<dyn Clock>,
}

impl<B, C> BookingCommandService<B, C> {
    /// Create a new command service over the booking and catalogue
    /// repositories and a clock.
    pub fn new(booking_repo: Arc<B>, catalogue_repo: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        Self {
            booking_repo,
            catalogue_repo,
            clock,
        }
    }
}

impl<B, C> BookingCommandService<B, C>
where
    B: BookingRepository,
    C: CatalogueRepository,
{
    async fn load_booking(&self, booking_id: Uuid) -> Result<Booking, Error> {
        self.booking_repo
            .find_by_id(booking_id)
            .await
            .map_err(map_booking_repository_error)?
            .ok_or_else(|| Error::not_found(format!("booking {booking_id} not found")))
    }

    async fn availability_inputs(
        &self,
        equipment_id: Uuid,
    ) -> Result<(Option<crate::domain::catalogue::EquipmentItem>, Vec<ActiveBooking>), Error> {
        let equipment = self
            .catalogue_repo
            .find_equipment(equipment_id)
            .await
            .map_err(map_catalogue_repository_error)?;
        let active = self
            .booking_repo
            .list_active_for_equipment(equipment_id)
            .await
            .map_err(map_booking_repository_error)?;
        let active = active.iter().map(ActiveBooking::from).collect();
        Ok((equipment, active))
    }

    /// Validate the transition, apply it with a guarded write, and return
    /// the updated booking.
    async fn apply_transition(
        &self,
        booking: Booking,
        to: BookingStatus,
    ) -> Result<BookingPayload, Error> {
        let from = booking.status();
        let updated = booking.with_status(to).map_err(map_illegal_transition)?;
        let written = self
            .booking_repo
            .update_status(updated.id(), from, to)
            .await
            .map_err(map_booking_repository_error)?;
        if !written {
            return Err(
                Error::conflict("booking status changed concurrently").with_details(json!({
                    "code": "illegal_transition",
                    "from": from.as_str(),
                    "to": to.as_str(),
                })),
            );
        }
        Ok(updated.into())
    }
}

#[async_trait]
impl<B, C> BookingCommand for BookingCommandService<B, C>
where
    B: BookingRepository,
    C: CatalogueRepository,
{
    async fn create_booking(
        &self,
        request: CreateBookingRequest,
    ) -> Result<BookingPayload, Error> {
        if !request.acting.role().can_place_bookings() {
            return Err(Error::forbidden("administrators cannot place bookings"));
        }
        let interval = parse_interval(request.start, request.end)?;
        let (equipment, active) = self.availability_inputs(request.equipment_id).await?;
        check_availability(
            request.equipment_id,
            equipment.as_ref(),
            interval,
            self.clock.utc(),
            &active,
            None,
        )
        .map_err(map_availability_error)?;

        let booking = Booking::new(BookingDraft {
            id: Uuid::new_v4(),
            user_id: request.acting.user_id(),
            equipment_id: request.equipment_id,
            interval,
            purpose: request.purpose,
            created_at: self.clock.utc(),
        })
        .map_err(|err| Error::invalid_request(err.to_string()))?;

        // The adapter re-checks the conflict invariant inside its insert
        // transaction; a lost race surfaces as a Conflict error here.
        self.booking_repo
            .insert(&booking)
            .await
            .map_err(map_booking_repository_error)?;

        Ok(booking.into())
    }

    async fn confirm_booking(
        &self,
        request: TransitionBookingRequest,
    ) -> Result<BookingPayload, Error> {
        if !request.acting.role().can_manage_bookings() {
            return Err(Error::forbidden("confirming bookings requires admin"));
        }
        let booking = self.load_booking(request.booking_id).await?;
        if !booking.status().can_transition_to(BookingStatus::Confirmed) {
            return Err(map_illegal_transition(IllegalTransition {
                from: booking.status(),
                to: BookingStatus::Confirmed,
            }));
        }
        let (equipment, active) = self.availability_inputs(booking.equipment_id()).await?;
        recheck_for_confirmation(
            booking.equipment_id(),
            equipment.as_ref(),
            booking.interval(),
            &active,
            Some(booking.id()),
        )
        .map_err(map_availability_error)?;
        self.apply_transition(booking, BookingStatus::Confirmed)
            .await
    }

    async fn reject_booking(
        &self,
        request: TransitionBookingRequest,
    ) -> Result<BookingPayload, Error> {
        if !request.acting.role().can_manage_bookings() {
            return Err(Error::forbidden("rejecting bookings requires admin"));
        }
        let booking = self.load_booking(request.booking_id).await?;
        self.apply_transition(booking, BookingStatus::Rejected)
            .await
    }

    async fn cancel_booking(
        &self,
        request: TransitionBookingRequest,
    ) -> Result<BookingPayload, Error> {
        let booking = self.load_booking(request.booking_id).await?;
        if !request.acting.acts_for(booking.user_id()) {
            return Err(Error::forbidden(
                "only the booking owner or an admin may cancel",
            ));
        }
        self.apply_transition(booking, BookingStatus::Cancelled)
            .await
    }

    async fn complete_booking(
        &self,
        request: TransitionBookingRequest,
    ) -> Result<BookingPayload, Error> {
        if !request.acting.role().can_manage_bookings() {
            return Err(Error::forbidden("completing bookings requires admin"));
        }
        let booking = self.load_booking(request.booking_id).await?;
        self.apply_transition(booking, BookingStatus::Completed)
            .await
    }

    async fn check_availability(&self, request: CheckAvailabilityRequest) -> Result<(), Error> {
        let interval = parse_interval(request.start, request.end)?;
        let (equipment, active) = self.availability_inputs(request.equipment_id).await?;
        check_availability(
            request.equipment_id,
            equipment.as_ref(),
            interval,
            self.clock.utc(),
            &active,
            None,
        )
        .map_err(map_availability_error)
    }
}

/// Booking service implementing the query driving port.
#[derive(Clone)]
pub struct BookingQueryService<B> {
    booking_repo: Arc<B>,
}

impl<B> BookingQueryService<B> {
    /// Create a new query service over the booking repository.
    pub fn new(booking_repo: Arc<B>) -> Self {
        Self { booking_repo }
    }
}

#[async_trait]
impl<B> BookingQuery for BookingQueryService<B>
where
    B: BookingRepository,
{
    async fn get_booking(&self, request: GetBookingRequest) -> Result<BookingPayload, Error> {
        let booking = self
            .booking_repo
            .find_by_id(request.booking_id)
            .await
            .map_err(map_booking_repository_error)?
            .ok_or_else(|| Error::not_found(format!("booking {} not found", request.booking_id)))?;
        if !request.acting.acts_for(booking.user_id()) {
            return Err(Error::forbidden("bookings are visible to their owner"));
        }
        Ok(booking.into())
    }

    async fn list_own_bookings(&self, acting: AuthContext) -> Result<Vec<BookingPayload>, Error> {
        let bookings = self
            .booking_repo
            .list_for_user(acting.user_id())
            .await
            .map_err(map_booking_repository_error)?;
        Ok(bookings.into_iter().map(Into::into).collect())
    }

    async fn list_all_bookings(&self, acting: AuthContext) -> Result<Vec<BookingPayload>, Error> {
        if !acting.role().can_manage_bookings() {
            return Err(Error::forbidden("listing all bookings requires admin"));
        }
        let bookings = self
            .booking_repo
            .list_all()
            .await
            .map_err(map_booking_repository_error)?;
        Ok(bookings.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
#[path = "booking_service_tests.rs"]
mod tests;
