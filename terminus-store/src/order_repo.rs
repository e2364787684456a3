use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use terminus_core::error::DomainResult;
use terminus_core::order::{Order, OrderPage, PageRequest, Ticket, TicketSpec};
use terminus_core::repository::OrderRepository;

use crate::map_db_err;

pub struct PgOrderRepository {
    pool: PgPool,
}

impl PgOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: Uuid,
    user_id: String,
    created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct TicketRow {
    id: Uuid,
    trip_id: Uuid,
    order_id: Uuid,
    cargo: i32,
    seat: i32,
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn create_order(&self, user_id: &str, tickets: &[TicketSpec]) -> DomainResult<Order> {
        let order_id = Uuid::new_v4();
        let mut tx = self.pool.begin().await.map_err(map_db_err)?;

        let created_at: DateTime<Utc> = sqlx::query_scalar(
            "INSERT INTO orders (id, user_id) VALUES ($1, $2) RETURNING created_at",
        )
        .bind(order_id)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_err)?;

        let mut created = Vec::with_capacity(tickets.len());
        for spec in tickets {
            let ticket_id = Uuid::new_v4();
            // The unique index on (trip_id, cargo, seat) rejects a raced
            // duplicate here; dropping the transaction rolls back the order
            // and every ticket inserted before the failure.
            sqlx::query(
                "INSERT INTO tickets (id, trip_id, order_id, cargo, seat) \
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(ticket_id)
            .bind(spec.trip_id)
            .bind(order_id)
            .bind(spec.cargo)
            .bind(spec.seat)
            .execute(&mut *tx)
            .await
            .map_err(map_db_err)?;

            created.push(Ticket {
                id: ticket_id,
                trip_id: spec.trip_id,
                order_id,
                cargo: spec.cargo,
                seat: spec.seat,
            });
        }

        tx.commit().await.map_err(map_db_err)?;

        Ok(Order {
            id: order_id,
            user_id: user_id.to_string(),
            created_at,
            tickets: created,
        })
    }

    async fn list_orders(&self, user_id: &str, page: &PageRequest) -> DomainResult<OrderPage> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_err)?;

        let rows = sqlx::query_as::<_, OrderRow>(
            "SELECT id, user_id, created_at FROM orders \
             WHERE user_id = $1 \
             ORDER BY created_at DESC \
             LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(i64::from(page.page_size))
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_err)?;

        let mut results = Vec::with_capacity(rows.len());
        for row in rows {
            let tickets = sqlx::query_as::<_, TicketRow>(
                "SELECT id, trip_id, order_id, cargo, seat FROM tickets \
                 WHERE order_id = $1 \
                 ORDER BY cargo, seat",
            )
            .bind(row.id)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_err)?;

            results.push(Order {
                id: row.id,
                user_id: row.user_id,
                created_at: row.created_at,
                tickets: tickets
                    .into_iter()
                    .map(|t| Ticket {
                        id: t.id,
                        trip_id: t.trip_id,
                        order_id: t.order_id,
                        cargo: t.cargo,
                        seat: t.seat,
                    })
                    .collect(),
            });
        }

        Ok(OrderPage { count, results })
    }
}
