use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use terminus_core::context::UserContext;
use terminus_core::order::{Order, PageRequest, Ticket, TicketSpec};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub tickets: Vec<TicketSpec>,
}

#[derive(Debug, Serialize)]
pub struct TicketResponse {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub cargo: i32,
    pub seat: i32,
}

impl From<Ticket> for TicketResponse {
    fn from(ticket: Ticket) -> Self {
        Self {
            id: ticket.id,
            trip_id: ticket.trip_id,
            cargo: ticket.cargo,
            seat: ticket.seat,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub tickets: Vec<TicketResponse>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            created_at: order.created_at,
            tickets: order.tickets.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OrderPageResponse {
    pub count: i64,
    pub results: Vec<OrderResponse>,
}

#[derive(Debug, Deserialize)]
struct OrderListQuery {
    page: Option<u32>,
    page_size: Option<u32>,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/orders", get(list_orders).post(create_order))
}

/// Orders are always scoped to the caller, admins included.
async fn list_orders(
    State(state): State<AppState>,
    Extension(ctx): Extension<UserContext>,
    Query(query): Query<OrderListQuery>,
) -> Result<Json<OrderPageResponse>, ApiError> {
    let page_size = query
        .page_size
        .unwrap_or(state.pagination.order_page_size)
        .clamp(1, state.pagination.order_page_size_max);
    let page = PageRequest {
        page: query.page.unwrap_or(1),
        page_size,
    };

    let orders = state.orders.list_orders(&ctx.user_id, &page).await?;
    Ok(Json(OrderPageResponse {
        count: orders.count,
        results: orders.results.into_iter().map(Into::into).collect(),
    }))
}

async fn create_order(
    State(state): State<AppState>,
    Extension(ctx): Extension<UserContext>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderResponse>), ApiError> {
    let order = state.placement.place(&ctx, &req.tickets).await?;
    Ok((StatusCode::CREATED, Json(order.into())))
}
