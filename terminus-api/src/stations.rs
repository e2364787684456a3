use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};

use terminus_core::context::UserContext;
use terminus_core::station::{NewStation, Station};

use crate::error::ApiError;
use crate::middleware::require_admin;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/stations", get(list_stations).post(create_station))
}

async fn list_stations(
    State(state): State<AppState>,
    Extension(_ctx): Extension<UserContext>,
) -> Result<Json<Vec<Station>>, ApiError> {
    Ok(Json(state.catalog.list_stations().await?))
}

async fn create_station(
    State(state): State<AppState>,
    Extension(ctx): Extension<UserContext>,
    Json(req): Json<NewStation>,
) -> Result<(StatusCode, Json<Station>), ApiError> {
    require_admin(&ctx)?;
    // Coordinate bounds are checked before anything reaches the store.
    req.validate()?;
    let created = state.catalog.create_station(&req).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
