use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use serde::Serialize;
use uuid::Uuid;

use terminus_core::context::UserContext;
use terminus_core::crew::{Crew, NewCrew};

use crate::error::ApiError;
use crate::middleware::require_admin;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CrewResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
}

impl From<Crew> for CrewResponse {
    fn from(crew: Crew) -> Self {
        Self {
            id: crew.id,
            full_name: crew.full_name(),
            first_name: crew.first_name,
            last_name: crew.last_name,
        }
    }
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/crews", get(list_crews).post(create_crew))
}

async fn list_crews(
    State(state): State<AppState>,
    Extension(_ctx): Extension<UserContext>,
) -> Result<Json<Vec<CrewResponse>>, ApiError> {
    let crews = state.catalog.list_crews().await?;
    Ok(Json(crews.into_iter().map(Into::into).collect()))
}

async fn create_crew(
    State(state): State<AppState>,
    Extension(ctx): Extension<UserContext>,
    Json(req): Json<NewCrew>,
) -> Result<(StatusCode, Json<CrewResponse>), ApiError> {
    require_admin(&ctx)?;
    let created = state.catalog.create_crew(&req).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}
