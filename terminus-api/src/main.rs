use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use terminus_api::{app, state::AuthConfig, AppState};
use terminus_booking::OrderPlacementService;
use terminus_core::repository::{OrderRepository, TripRepository};
use terminus_store::{DbClient, PgCatalogRepository, PgOrderRepository, PgTripRepository};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "terminus_api=debug,tower_http=debug,axum::rejection=trace".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = terminus_store::Config::load().context("Failed to load config")?;
    tracing::info!("Starting Terminus API on port {}", config.server.port);

    let db = DbClient::new(&config.database.url)
        .await
        .context("Failed to connect to Postgres")?;
    db.migrate().await.context("Failed to run migrations")?;

    let trips: Arc<dyn TripRepository> = Arc::new(PgTripRepository::new(db.pool.clone()));
    let orders: Arc<dyn OrderRepository> = Arc::new(PgOrderRepository::new(db.pool.clone()));

    let app_state = AppState {
        catalog: Arc::new(PgCatalogRepository::new(db.pool.clone())),
        placement: Arc::new(OrderPlacementService::new(trips.clone(), orders.clone())),
        trips,
        orders,
        auth: AuthConfig {
            secret: config.auth.jwt_secret.clone(),
            expiration: config.auth.jwt_expiration_seconds,
        },
        pagination: config.pagination.clone(),
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind listener")?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
