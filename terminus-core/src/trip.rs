use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::crew::Crew;
use crate::route::Route;
use crate::train::Train;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trip {
    pub id: Uuid,
    pub route_id: Uuid,
    pub train_id: Uuid,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    pub crew_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTrip {
    pub route_id: Uuid,
    pub train_id: Uuid,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    #[serde(default)]
    pub crew_ids: Vec<Uuid>,
}

/// List-view row: station/train names flattened, remaining capacity annotated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripSummary {
    pub id: Uuid,
    pub route_source: String,
    pub route_destination: String,
    pub train: String,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    pub tickets_available: i64,
}

/// Detail view: fully joined route and train, crew names, sold seats.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripDetail {
    pub id: Uuid,
    pub route: Route,
    pub train: Train,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    pub crews: Vec<Crew>,
    pub taken_seats: Vec<SeatRef>,
}

/// A physical seat on a trip: 1-based cargo and seat indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeatRef {
    pub cargo: i32,
    pub seat: i32,
}

/// Conjunctive trip-list filters; `None` imposes no constraint.
#[derive(Debug, Clone, Default)]
pub struct TripFilter {
    pub source: Option<String>,
    pub destination: Option<String>,
    pub departure_date: Option<NaiveDate>,
    pub arrival_date: Option<NaiveDate>,
}

impl TripFilter {
    pub fn is_empty(&self) -> bool {
        self.source.is_none()
            && self.destination.is_none()
            && self.departure_date.is_none()
            && self.arrival_date.is_none()
    }
}

/// Snapshot of a trip's train dimensions and sold seats, consumed by the
/// booking validator.
#[derive(Debug, Clone)]
pub struct TripSeating {
    pub trip_id: Uuid,
    pub cargo_count: i32,
    pub seats_per_cargo: i32,
    pub taken: Vec<SeatRef>,
}

impl TripSeating {
    pub fn is_taken(&self, cargo: i32, seat: i32) -> bool {
        self.taken.iter().any(|s| s.cargo == cargo && s.seat == seat)
    }
}

/// Remaining capacity for a trip. Deliberately unclamped: a negative value
/// means the validator was bypassed and must surface in consistency checks.
pub fn tickets_available(capacity: i32, sold_count: i64) -> i64 {
    i64::from(capacity) - sold_count
}
