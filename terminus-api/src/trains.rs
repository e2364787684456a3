use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use serde::Serialize;
use uuid::Uuid;

use terminus_core::context::UserContext;
use terminus_core::train::{NewTrain, Train};

use crate::error::ApiError;
use crate::middleware::require_admin;
use crate::state::AppState;

/// Train projection: type flattened to its name, capacity derived.
#[derive(Debug, Serialize)]
pub struct TrainResponse {
    pub id: Uuid,
    pub name: String,
    pub cargo_count: i32,
    pub seats_per_cargo: i32,
    pub train_type: String,
    pub capacity: i32,
}

impl From<Train> for TrainResponse {
    fn from(train: Train) -> Self {
        Self {
            id: train.id,
            capacity: train.capacity(),
            name: train.name,
            cargo_count: train.cargo_count,
            seats_per_cargo: train.seats_per_cargo,
            train_type: train.train_type.name,
        }
    }
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/trains", get(list_trains).post(create_train))
}

async fn list_trains(
    State(state): State<AppState>,
    Extension(_ctx): Extension<UserContext>,
) -> Result<Json<Vec<TrainResponse>>, ApiError> {
    let trains = state.catalog.list_trains().await?;
    Ok(Json(trains.into_iter().map(Into::into).collect()))
}

async fn create_train(
    State(state): State<AppState>,
    Extension(ctx): Extension<UserContext>,
    Json(req): Json<NewTrain>,
) -> Result<(StatusCode, Json<TrainResponse>), ApiError> {
    require_admin(&ctx)?;
    req.validate()?;
    let created = state.catalog.create_train(&req).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}
