use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use terminus_core::context::UserContext;
use terminus_core::trip::{NewTrip, SeatRef, Trip, TripDetail, TripFilter, TripSummary};

use crate::error::ApiError;
use crate::middleware::require_admin;
use crate::routes::RouteResponse;
use crate::state::AppState;
use crate::trains::TrainResponse;

#[derive(Debug, Deserialize)]
struct TripListQuery {
    source: Option<String>,
    destination: Option<String>,
    departure_time: Option<String>,
    arrival_time: Option<String>,
}

impl TripListQuery {
    fn into_filter(self) -> Result<TripFilter, ApiError> {
        Ok(TripFilter {
            source: self.source,
            destination: self.destination,
            departure_date: self
                .departure_time
                .map(|s| parse_date("departure_time", &s))
                .transpose()?,
            arrival_date: self
                .arrival_time
                .map(|s| parse_date("arrival_time", &s))
                .transpose()?,
        })
    }
}

fn parse_date(field: &str, raw: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| ApiError::Validation(format!("{field}: expected YYYY-MM-DD, got {raw:?}")))
}

/// Detail projection: joined route and train, crew full names, sold seats.
#[derive(Debug, Serialize)]
pub struct TripDetailResponse {
    pub id: Uuid,
    pub route: RouteResponse,
    pub train: TrainResponse,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    pub crews: Vec<String>,
    pub taken_seats: Vec<SeatRef>,
}

impl From<TripDetail> for TripDetailResponse {
    fn from(detail: TripDetail) -> Self {
        Self {
            id: detail.id,
            route: detail.route.into(),
            train: detail.train.into(),
            departure_time: detail.departure_time,
            arrival_time: detail.arrival_time,
            crews: detail.crews.iter().map(|c| c.full_name()).collect(),
            taken_seats: detail.taken_seats,
        }
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/trips", get(list_trips).post(create_trip))
        .route(
            "/v1/trips/{id}",
            get(get_trip).put(update_trip).delete(delete_trip),
        )
}

async fn list_trips(
    State(state): State<AppState>,
    Extension(_ctx): Extension<UserContext>,
    Query(query): Query<TripListQuery>,
) -> Result<Json<Vec<TripSummary>>, ApiError> {
    let filter = query.into_filter()?;
    Ok(Json(state.trips.list_trips(&filter).await?))
}

async fn get_trip(
    State(state): State<AppState>,
    Extension(_ctx): Extension<UserContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<TripDetailResponse>, ApiError> {
    let detail = state
        .trips
        .get_trip(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("trip {id} not found")))?;
    Ok(Json(detail.into()))
}

async fn create_trip(
    State(state): State<AppState>,
    Extension(ctx): Extension<UserContext>,
    Json(req): Json<NewTrip>,
) -> Result<(StatusCode, Json<Trip>), ApiError> {
    require_admin(&ctx)?;
    let created = state.trips.create_trip(&req).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_trip(
    State(state): State<AppState>,
    Extension(ctx): Extension<UserContext>,
    Path(id): Path<Uuid>,
    Json(req): Json<NewTrip>,
) -> Result<Json<Trip>, ApiError> {
    require_admin(&ctx)?;
    Ok(Json(state.trips.update_trip(id, &req).await?))
}

async fn delete_trip(
    State(state): State<AppState>,
    Extension(ctx): Extension<UserContext>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    require_admin(&ctx)?;
    state.trips.delete_trip(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
