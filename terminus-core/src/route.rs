use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::station::Station;

/// A route with both endpoint stations joined in.
///
/// Source and destination are allowed to coincide; the model has never
/// enforced distinctness.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    pub id: Uuid,
    pub source: Station,
    pub destination: Station,
    pub distance_km: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRoute {
    pub source_station_id: Uuid,
    pub destination_station_id: Uuid,
    pub distance_km: i32,
}
