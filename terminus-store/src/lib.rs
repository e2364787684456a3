pub mod app_config;
pub mod catalog_repo;
pub mod database;
pub mod memory;
pub mod order_repo;
pub mod trip_repo;

pub use app_config::Config;
pub use catalog_repo::PgCatalogRepository;
pub use database::DbClient;
pub use memory::MemoryStore;
pub use order_repo::PgOrderRepository;
pub use trip_repo::PgTripRepository;

use terminus_core::error::DomainError;

/// Translate driver errors into the domain taxonomy. The unique index on
/// (trip_id, cargo, seat) is the concurrency backstop: a raced duplicate
/// surfaces here as 23505 and becomes a Conflict, rolling back the caller's
/// transaction.
pub(crate) fn map_db_err(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db) = &err {
        if let Some(code) = db.code() {
            if code == "23505" {
                let message = match db.constraint() {
                    Some("uq_tickets_trip_cargo_seat") => {
                        "seat already taken on this trip".to_string()
                    }
                    _ => "duplicate record".to_string(),
                };
                return DomainError::Conflict(message);
            }
            if code == "23503" {
                return DomainError::NotFound("referenced record".to_string());
            }
        }
    }
    DomainError::Storage(err.to_string())
}
