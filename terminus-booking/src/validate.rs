use terminus_core::error::DomainError;
use terminus_core::order::TicketSpec;
use terminus_core::trip::TripSeating;

/// Booking rule violations. Checked fail-fast: bounds before uniqueness,
/// so the first failing rule determines the reported error.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum BookingError {
    #[error("cargo: must be within [1, {max}], got {got}")]
    CargoOutOfRange { got: i32, max: i32 },

    #[error("seat: must be within [1, {max}], got {got}")]
    SeatOutOfRange { got: i32, max: i32 },

    #[error("seat {seat} in cargo {cargo} is already taken on this trip")]
    SeatTaken { cargo: i32, seat: i32 },

    #[error("an order must contain at least one ticket")]
    EmptyOrder,
}

impl From<BookingError> for DomainError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::SeatTaken { .. } => DomainError::Conflict(err.to_string()),
            _ => DomainError::Validation(err.to_string()),
        }
    }
}

/// Check one requested ticket against the trip's physical bounds and its
/// already-sold seats.
pub fn validate_ticket(spec: &TicketSpec, seating: &TripSeating) -> Result<(), BookingError> {
    if spec.cargo < 1 || spec.cargo > seating.cargo_count {
        return Err(BookingError::CargoOutOfRange {
            got: spec.cargo,
            max: seating.cargo_count,
        });
    }
    if spec.seat < 1 || spec.seat > seating.seats_per_cargo {
        return Err(BookingError::SeatOutOfRange {
            got: spec.seat,
            max: seating.seats_per_cargo,
        });
    }
    if seating.is_taken(spec.cargo, spec.seat) {
        return Err(BookingError::SeatTaken {
            cargo: spec.cargo,
            seat: spec.seat,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use terminus_core::trip::SeatRef;
    use uuid::Uuid;

    fn seating(cargo_count: i32, seats_per_cargo: i32, taken: Vec<SeatRef>) -> TripSeating {
        TripSeating {
            trip_id: Uuid::new_v4(),
            cargo_count,
            seats_per_cargo,
            taken,
        }
    }

    fn spec(trip_id: Uuid, cargo: i32, seat: i32) -> TicketSpec {
        TicketSpec {
            trip_id,
            cargo,
            seat,
        }
    }

    #[test]
    fn accepts_a_free_in_bounds_seat() {
        let s = seating(9, 45, vec![]);
        assert_eq!(validate_ticket(&spec(s.trip_id, 1, 1), &s), Ok(()));
        assert_eq!(validate_ticket(&spec(s.trip_id, 9, 45), &s), Ok(()));
    }

    #[test]
    fn cargo_zero_is_out_of_range() {
        let s = seating(9, 45, vec![]);
        assert_eq!(
            validate_ticket(&spec(s.trip_id, 0, 1), &s),
            Err(BookingError::CargoOutOfRange { got: 0, max: 9 })
        );
    }

    #[test]
    fn cargo_above_count_is_out_of_range() {
        let s = seating(9, 45, vec![]);
        assert_eq!(
            validate_ticket(&spec(s.trip_id, 10, 1), &s),
            Err(BookingError::CargoOutOfRange { got: 10, max: 9 })
        );
    }

    #[test]
    fn seat_out_of_range_names_the_bound() {
        let s = seating(9, 45, vec![]);
        let err = validate_ticket(&spec(s.trip_id, 1, 46), &s).unwrap_err();
        assert_eq!(err, BookingError::SeatOutOfRange { got: 46, max: 45 });
        assert!(err.to_string().contains("[1, 45]"));
    }

    #[test]
    fn taken_seat_is_a_conflict() {
        let s = seating(2, 2, vec![SeatRef { cargo: 1, seat: 1 }]);
        assert_eq!(
            validate_ticket(&spec(s.trip_id, 1, 1), &s),
            Err(BookingError::SeatTaken { cargo: 1, seat: 1 })
        );
    }

    #[test]
    fn bounds_are_checked_before_uniqueness() {
        // Out-of-range *and* nominally taken: the bounds error wins.
        let s = seating(2, 2, vec![SeatRef { cargo: 3, seat: 1 }]);
        assert_eq!(
            validate_ticket(&spec(s.trip_id, 3, 1), &s),
            Err(BookingError::CargoOutOfRange { got: 3, max: 2 })
        );
    }

    #[test]
    fn seat_taken_maps_to_conflict_error() {
        let err: DomainError = BookingError::SeatTaken { cargo: 1, seat: 1 }.into();
        assert!(matches!(err, DomainError::Conflict(_)));

        let err: DomainError = BookingError::EmptyOrder.into();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
