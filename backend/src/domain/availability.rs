//! The availability checker.
//!
//! A single authoritative predicate decides whether a requested interval can
//! be granted for an equipment item. It is written over plain snapshots so
//! services, adapters and tests all evaluate exactly the same rules; the
//! Diesel adapter re-runs the conflict portion inside its insert transaction
//! to keep the decision atomic under concurrency.
//!
//! Preconditions are checked in a fixed order and the first failure wins:
//! the equipment must exist, must be in service, the start must not lie in
//! the past, and no active booking may overlap the requested interval.
//! Overlap is inclusive: intervals that merely touch at an endpoint
//! conflict.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::bookings::{Booking, BookingInterval};
use super::catalogue::EquipmentItem;

/// Reasons an availability check can fail, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AvailabilityError {
    /// No equipment item exists under the requested identifier.
    #[error("equipment {equipment_id} not found")]
    EquipmentNotFound {
        /// The identifier that matched nothing.
        equipment_id: Uuid,
    },
    /// The item is flagged out of service for maintenance.
    #[error("equipment {equipment_id} is under maintenance")]
    UnderMaintenance {
        /// The out-of-service item.
        equipment_id: Uuid,
    },
    /// The requested start lies before `now`.
    #[error("booking start must not lie in the past")]
    StartInPast,
    /// An active booking already claims an overlapping interval.
    #[error("interval conflicts with booking {booking_id}")]
    Conflict {
        /// The first active booking found to overlap.
        booking_id: Uuid,
    },
}

/// Snapshot of an active booking considered during conflict search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveBooking {
    /// Identifier of the competing booking.
    pub id: Uuid,
    /// Interval the competing booking claims.
    pub interval: BookingInterval,
}

impl From<&Booking> for ActiveBooking {
    fn from(booking: &Booking) -> Self {
        Self {
            id: booking.id(),
            interval: booking.interval(),
        }
    }
}

/// Scan `active` for the first booking whose interval overlaps `interval`,
/// skipping `exclude` (the booking being re-checked, if any).
pub fn find_conflict(
    interval: BookingInterval,
    active: &[ActiveBooking],
    exclude: Option<Uuid>,
) -> Option<Uuid> {
    active
        .iter()
        .filter(|booking| exclude != Some(booking.id))
        .find(|booking| booking.interval.overlaps(&interval))
        .map(|booking| booking.id)
}

/// Full availability check for a new booking request.
///
/// `equipment` is the looked-up item (`None` when the identifier matched
/// nothing) and `active` the item's currently active bookings. Returns the
/// first failing precondition, or `Ok(())` when the interval can be granted.
pub fn check_availability(
    equipment_id: Uuid,
    equipment: Option<&EquipmentItem>,
    interval: BookingInterval,
    now: DateTime<Utc>,
    active: &[ActiveBooking],
    exclude: Option<Uuid>,
) -> Result<(), AvailabilityError> {
    let equipment = equipment.ok_or(AvailabilityError::EquipmentNotFound { equipment_id })?;
    if !equipment.is_available() {
        return Err(AvailabilityError::UnderMaintenance {
            equipment_id: equipment.id(),
        });
    }
    if interval.start() < now {
        return Err(AvailabilityError::StartInPast);
    }
    match find_conflict(interval, active, exclude) {
        Some(booking_id) => Err(AvailabilityError::Conflict { booking_id }),
        None => Ok(()),
    }
}

/// Confirmation-time re-check: maintenance and conflicts only.
///
/// The past-start rule is deliberately not re-applied, so a pending booking
/// whose start has already arrived can still be confirmed.
pub fn recheck_for_confirmation(
    equipment_id: Uuid,
    equipment: Option<&EquipmentItem>,
    interval: BookingInterval,
    active: &[ActiveBooking],
    exclude: Option<Uuid>,
) -> Result<(), AvailabilityError> {
    let equipment = equipment.ok_or(AvailabilityError::EquipmentNotFound { equipment_id })?;
    if !equipment.is_available() {
        return Err(AvailabilityError::UnderMaintenance {
            equipment_id: equipment.id(),
        });
    }
    match find_conflict(interval, active, exclude) {
        Some(booking_id) => Err(AvailabilityError::Conflict { booking_id }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::catalogue::EquipmentDraft;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, hour, minute, 0)
            .single()
            .expect("valid timestamp")
    }

    fn interval(start: (u32, u32), end: (u32, u32)) -> BookingInterval {
        BookingInterval::try_new(at(start.0, start.1), at(end.0, end.1))
            .expect("ordered endpoints")
    }

    fn equipment(is_available: bool) -> EquipmentItem {
        EquipmentItem::from_parts(
            EquipmentDraft {
                id: Uuid::new_v4(),
                category_id: Uuid::new_v4(),
                name: "Bench oscilloscope".to_owned(),
                description: None,
                specifications: None,
                image_url: None,
            },
            is_available,
        )
    }

    #[fixture]
    fn now() -> DateTime<Utc> {
        at(8, 0)
    }

    #[rstest]
    fn grants_free_interval(now: DateTime<Utc>) {
        let item = equipment(true);
        let result = check_availability(
            item.id(),
            Some(&item),
            interval((10, 0), (12, 0)),
            now,
            &[],
            None,
        );
        assert_eq!(result, Ok(()));
    }

    #[rstest]
    fn missing_equipment_wins_over_everything(now: DateTime<Utc>) {
        let equipment_id = Uuid::new_v4();
        // Past start and a conflicting booking are both present; not-found
        // must still be reported first.
        let competing = ActiveBooking {
            id: Uuid::new_v4(),
            interval: interval((6, 0), (23, 0)),
        };
        let result = check_availability(
            equipment_id,
            None,
            interval((6, 30), (7, 0)),
            now,
            &[competing],
            None,
        );
        assert_eq!(result, Err(AvailabilityError::EquipmentNotFound { equipment_id }));
    }

    #[rstest]
    fn maintenance_wins_over_past_start(now: DateTime<Utc>) {
        let item = equipment(false);
        let result = check_availability(
            item.id(),
            Some(&item),
            interval((6, 0), (7, 0)),
            now,
            &[],
            None,
        );
        assert_eq!(
            result,
            Err(AvailabilityError::UnderMaintenance {
                equipment_id: item.id()
            })
        );
    }

    #[rstest]
    fn past_start_wins_over_conflict(now: DateTime<Utc>) {
        let item = equipment(true);
        let competing = ActiveBooking {
            id: Uuid::new_v4(),
            interval: interval((6, 0), (23, 0)),
        };
        let result = check_availability(
            item.id(),
            Some(&item),
            interval((7, 0), (9, 0)),
            now,
            &[competing],
            None,
        );
        assert_eq!(result, Err(AvailabilityError::StartInPast));
    }

    #[rstest]
    fn start_exactly_at_now_is_granted(now: DateTime<Utc>) {
        let item = equipment(true);
        let result = check_availability(
            item.id(),
            Some(&item),
            interval((8, 0), (9, 0)),
            now,
            &[],
            None,
        );
        assert_eq!(result, Ok(()));
    }

    #[rstest]
    #[case(interval((12, 0), (14, 0)), true)] // touching endpoint conflicts
    #[case(interval((12, 1), (14, 0)), false)] // one minute of separation does not
    #[case(interval((9, 0), (10, 0)), true)]
    #[case(interval((10, 30), (11, 30)), true)]
    fn conflict_search_uses_inclusive_overlap(
        now: DateTime<Utc>,
        #[case] requested: BookingInterval,
        #[case] conflicts: bool,
    ) {
        let item = equipment(true);
        let competing = ActiveBooking {
            id: Uuid::new_v4(),
            interval: interval((10, 0), (12, 0)),
        };
        let result = check_availability(item.id(), Some(&item), requested, now, &[competing], None);
        if conflicts {
            assert_eq!(
                result,
                Err(AvailabilityError::Conflict {
                    booking_id: competing.id
                })
            );
        } else {
            assert_eq!(result, Ok(()));
        }
    }

    #[rstest]
    fn excluded_booking_does_not_conflict_with_itself(now: DateTime<Utc>) {
        let item = equipment(true);
        let own = ActiveBooking {
            id: Uuid::new_v4(),
            interval: interval((10, 0), (12, 0)),
        };
        let result = check_availability(
            item.id(),
            Some(&item),
            own.interval,
            now,
            &[own],
            Some(own.id),
        );
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn confirmation_recheck_skips_past_start() {
        let item = equipment(true);
        // Start already behind us; the re-check still grants it.
        let result =
            recheck_for_confirmation(item.id(), Some(&item), interval((6, 0), (7, 0)), &[], None);
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn confirmation_recheck_still_sees_conflicts() {
        let item = equipment(true);
        let own = Uuid::new_v4();
        let competing = ActiveBooking {
            id: Uuid::new_v4(),
            interval: interval((10, 0), (12, 0)),
        };
        let result = recheck_for_confirmation(
            item.id(),
            Some(&item),
            interval((11, 0), (13, 0)),
            &[competing],
            Some(own),
        );
        assert_eq!(
            result,
            Err(AvailabilityError::Conflict {
                booking_id: competing.id
            })
        );
    }

    #[test]
    fn confirmation_recheck_respects_maintenance() {
        let item = equipment(false);
        let result =
            recheck_for_confirmation(item.id(), Some(&item), interval((10, 0), (12, 0)), &[], None);
        assert_eq!(
            result,
            Err(AvailabilityError::UnderMaintenance {
                equipment_id: item.id()
            })
        );
    }
}
