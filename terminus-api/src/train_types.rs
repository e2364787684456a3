use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};

use terminus_core::context::UserContext;
use terminus_core::train::{NewTrainType, TrainType};

use crate::error::ApiError;
use crate::middleware::require_admin;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/train_types", get(list_train_types).post(create_train_type))
}

async fn list_train_types(
    State(state): State<AppState>,
    Extension(_ctx): Extension<UserContext>,
) -> Result<Json<Vec<TrainType>>, ApiError> {
    Ok(Json(state.catalog.list_train_types().await?))
}

async fn create_train_type(
    State(state): State<AppState>,
    Extension(ctx): Extension<UserContext>,
    Json(req): Json<NewTrainType>,
) -> Result<(StatusCode, Json<TrainType>), ApiError> {
    require_admin(&ctx)?;
    let created = state.catalog.create_train_type(&req).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
