use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use serde::Serialize;
use uuid::Uuid;

use terminus_core::context::UserContext;
use terminus_core::route::{NewRoute, Route};

use crate::error::ApiError;
use crate::middleware::require_admin;
use crate::state::AppState;

/// List projection: endpoint stations flattened to their names.
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub id: Uuid,
    pub source: String,
    pub destination: String,
    pub distance_km: i32,
}

impl From<Route> for RouteResponse {
    fn from(route: Route) -> Self {
        Self {
            id: route.id,
            source: route.source.name,
            destination: route.destination.name,
            distance_km: route.distance_km,
        }
    }
}

/// Detail projection: adds the coordinate display strings.
#[derive(Debug, Serialize)]
pub struct RouteDetailResponse {
    pub id: Uuid,
    pub source: String,
    pub coordinates_source: String,
    pub destination: String,
    pub coordinates_destination: String,
    pub distance_km: i32,
}

impl From<Route> for RouteDetailResponse {
    fn from(route: Route) -> Self {
        Self {
            id: route.id,
            coordinates_source: route.source.coordinates(),
            coordinates_destination: route.destination.coordinates(),
            source: route.source.name,
            destination: route.destination.name,
            distance_km: route.distance_km,
        }
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/routes", get(list_routes).post(create_route))
        .route("/v1/routes/{id}", get(get_route))
}

async fn list_routes(
    State(state): State<AppState>,
    Extension(_ctx): Extension<UserContext>,
) -> Result<Json<Vec<RouteResponse>>, ApiError> {
    let routes = state.catalog.list_routes().await?;
    Ok(Json(routes.into_iter().map(Into::into).collect()))
}

async fn get_route(
    State(state): State<AppState>,
    Extension(_ctx): Extension<UserContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<RouteDetailResponse>, ApiError> {
    let route = state
        .catalog
        .get_route(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("route {id} not found")))?;
    Ok(Json(route.into()))
}

async fn create_route(
    State(state): State<AppState>,
    Extension(ctx): Extension<UserContext>,
    Json(req): Json<NewRoute>,
) -> Result<(StatusCode, Json<RouteResponse>), ApiError> {
    require_admin(&ctx)?;
    let created = state.catalog.create_route(&req).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}
