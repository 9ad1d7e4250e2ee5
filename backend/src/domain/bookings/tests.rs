//! Unit tests for booking entities, intervals and the lifecycle graph.

use chrono::{DateTime, TimeZone, Utc};
use rstest::rstest;
use uuid::Uuid;

use super::*;

fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, hour, minute, 0)
        .single()
        .expect("valid timestamp")
}

fn interval(start_hour: u32, start_minute: u32, end_hour: u32, end_minute: u32) -> BookingInterval {
    BookingInterval::try_new(at(start_hour, start_minute), at(end_hour, end_minute))
        .expect("ordered endpoints")
}

fn draft(interval: BookingInterval) -> BookingDraft {
    BookingDraft {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        equipment_id: Uuid::new_v4(),
        interval,
        purpose: "microcontroller soldering".to_owned(),
        created_at: at(9, 0),
    }
}

#[test]
fn interval_rejects_end_before_start() {
    assert_eq!(
        BookingInterval::try_new(at(12, 0), at(10, 0)),
        Err(EndNotAfterStart)
    );
}

#[test]
fn interval_rejects_zero_length() {
    assert_eq!(
        BookingInterval::try_new(at(12, 0), at(12, 0)),
        Err(EndNotAfterStart)
    );
}

#[rstest]
// Touching endpoints overlap under the inclusive predicate.
#[case(interval(10, 0, 12, 0), interval(12, 0, 14, 0), true)]
// A minute of separation does not.
#[case(interval(10, 0, 12, 0), interval(12, 1, 14, 0), false)]
#[case(interval(10, 0, 14, 0), interval(11, 0, 12, 0), true)]
#[case(interval(11, 0, 12, 0), interval(10, 0, 14, 0), true)]
#[case(interval(10, 0, 11, 0), interval(13, 0, 14, 0), false)]
fn overlap_is_inclusive_and_symmetric(
    #[case] a: BookingInterval,
    #[case] b: BookingInterval,
    #[case] expected: bool,
) {
    assert_eq!(a.overlaps(&b), expected);
    assert_eq!(b.overlaps(&a), expected);
}

#[rstest]
#[case(BookingStatus::Pending, BookingStatus::Confirmed, true)]
#[case(BookingStatus::Pending, BookingStatus::Rejected, true)]
#[case(BookingStatus::Pending, BookingStatus::Cancelled, true)]
#[case(BookingStatus::Pending, BookingStatus::Completed, false)]
#[case(BookingStatus::Confirmed, BookingStatus::Completed, true)]
#[case(BookingStatus::Confirmed, BookingStatus::Cancelled, true)]
#[case(BookingStatus::Confirmed, BookingStatus::Confirmed, false)]
#[case(BookingStatus::Confirmed, BookingStatus::Rejected, false)]
#[case(BookingStatus::Rejected, BookingStatus::Confirmed, false)]
#[case(BookingStatus::Completed, BookingStatus::Cancelled, false)]
#[case(BookingStatus::Cancelled, BookingStatus::Pending, false)]
fn transition_graph_is_closed(
    #[case] from: BookingStatus,
    #[case] to: BookingStatus,
    #[case] allowed: bool,
) {
    assert_eq!(from.can_transition_to(to), allowed);
}

#[rstest]
#[case(BookingStatus::Pending, true, false)]
#[case(BookingStatus::Confirmed, true, false)]
#[case(BookingStatus::Rejected, false, true)]
#[case(BookingStatus::Completed, false, true)]
#[case(BookingStatus::Cancelled, false, true)]
fn activity_and_terminality(
    #[case] status: BookingStatus,
    #[case] active: bool,
    #[case] terminal: bool,
) {
    assert_eq!(status.is_active(), active);
    assert_eq!(status.is_terminal(), terminal);
}

#[rstest]
#[case(BookingStatus::Pending)]
#[case(BookingStatus::Confirmed)]
#[case(BookingStatus::Rejected)]
#[case(BookingStatus::Completed)]
#[case(BookingStatus::Cancelled)]
fn status_round_trips_through_str(#[case] status: BookingStatus) {
    assert_eq!(status.as_str().parse::<BookingStatus>().ok(), Some(status));
}

#[test]
fn status_rejects_unknown_input() {
    let err = "archived"
        .parse::<BookingStatus>()
        .expect_err("unknown status");
    assert_eq!(err.value, "archived");
}

#[test]
fn new_booking_is_pending_with_trimmed_purpose() {
    let mut draft = draft(interval(10, 0, 12, 0));
    draft.purpose = "  laser cutting  ".to_owned();
    let booking = Booking::new(draft).expect("valid draft");
    assert_eq!(booking.status(), BookingStatus::Pending);
    assert_eq!(booking.purpose(), "laser cutting");
}

#[test]
fn new_booking_rejects_blank_purpose() {
    let mut draft = draft(interval(10, 0, 12, 0));
    draft.purpose = "   ".to_owned();
    assert_eq!(
        Booking::new(draft).err(),
        Some(BookingValidationError::EmptyPurpose)
    );
}

#[test]
fn with_status_walks_the_graph() {
    let booking = Booking::new(draft(interval(10, 0, 12, 0))).expect("valid draft");
    let confirmed = booking
        .with_status(BookingStatus::Confirmed)
        .expect("pending to confirmed");
    let completed = confirmed
        .clone()
        .with_status(BookingStatus::Completed)
        .expect("confirmed to completed");
    assert_eq!(completed.status(), BookingStatus::Completed);
    let err = completed
        .with_status(BookingStatus::Cancelled)
        .expect_err("terminal status absorbs");
    assert_eq!(err.from, BookingStatus::Completed);
    assert_eq!(err.to, BookingStatus::Cancelled);
}

#[test]
fn repeated_confirm_is_illegal() {
    let booking = Booking::new(draft(interval(10, 0, 12, 0))).expect("valid draft");
    let confirmed = booking
        .with_status(BookingStatus::Confirmed)
        .expect("pending to confirmed");
    let err = confirmed
        .with_status(BookingStatus::Confirmed)
        .expect_err("confirm is not idempotent");
    assert_eq!(err.from, BookingStatus::Confirmed);
    assert_eq!(err.to, BookingStatus::Confirmed);
}
