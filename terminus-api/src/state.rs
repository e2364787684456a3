use std::sync::Arc;

use terminus_booking::OrderPlacementService;
use terminus_core::repository::{CatalogRepository, OrderRepository, TripRepository};
use terminus_store::app_config::PaginationRules;

#[derive(Clone)]
pub struct AuthConfig {
    pub secret: String,
    pub expiration: u64,
}

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogRepository>,
    pub trips: Arc<dyn TripRepository>,
    pub orders: Arc<dyn OrderRepository>,
    pub placement: Arc<OrderPlacementService>,
    pub auth: AuthConfig,
    pub pagination: PaginationRules,
}
