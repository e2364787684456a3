use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use terminus_core::crew::Crew;
use terminus_core::error::{DomainError, DomainResult};
use terminus_core::repository::TripRepository;
use terminus_core::route::Route;
use terminus_core::station::Station;
use terminus_core::train::{Train, TrainType};
use terminus_core::trip::{NewTrip, SeatRef, Trip, TripDetail, TripFilter, TripSeating, TripSummary};

use crate::map_db_err;

pub struct PgTripRepository {
    pool: PgPool,
}

impl PgTripRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Verify every entity the trip references before touching the trips
    /// table, so a bad id surfaces as NotFound instead of a driver error.
    async fn check_references(&self, new: &NewTrip) -> DomainResult<()> {
        let route: Option<Uuid> = sqlx::query_scalar("SELECT id FROM routes WHERE id = $1")
            .bind(new.route_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_err)?;
        if route.is_none() {
            return Err(DomainError::NotFound(format!("route {}", new.route_id)));
        }

        let train: Option<Uuid> = sqlx::query_scalar("SELECT id FROM trains WHERE id = $1")
            .bind(new.train_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_err)?;
        if train.is_none() {
            return Err(DomainError::NotFound(format!("train {}", new.train_id)));
        }

        for crew_id in &new.crew_ids {
            let crew: Option<Uuid> = sqlx::query_scalar("SELECT id FROM crews WHERE id = $1")
                .bind(crew_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(map_db_err)?;
            if crew.is_none() {
                return Err(DomainError::NotFound(format!("crew {crew_id}")));
            }
        }

        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct TripSummaryRow {
    id: Uuid,
    route_source: String,
    route_destination: String,
    train: String,
    departure_time: DateTime<Utc>,
    arrival_time: DateTime<Utc>,
    tickets_available: i64,
}

#[derive(sqlx::FromRow)]
struct TripRow {
    id: Uuid,
    route_id: Uuid,
    train_id: Uuid,
    departure_time: DateTime<Utc>,
    arrival_time: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct TripTrainRow {
    id: Uuid,
    name: String,
    cargo_count: i32,
    seats_per_cargo: i32,
    train_type_id: Uuid,
    train_type_name: String,
}

#[derive(sqlx::FromRow)]
struct TripRouteRow {
    id: Uuid,
    distance_km: i32,
    source_id: Uuid,
    source_name: String,
    source_latitude: f64,
    source_longitude: f64,
    destination_id: Uuid,
    destination_name: String,
    destination_latitude: f64,
    destination_longitude: f64,
}

#[async_trait]
impl TripRepository for PgTripRepository {
    async fn create_trip(&self, new: &NewTrip) -> DomainResult<Trip> {
        self.check_references(new).await?;

        let id = Uuid::new_v4();
        let mut tx = self.pool.begin().await.map_err(map_db_err)?;

        sqlx::query(
            "INSERT INTO trips (id, route_id, train_id, departure_time, arrival_time) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(id)
        .bind(new.route_id)
        .bind(new.train_id)
        .bind(new.departure_time)
        .bind(new.arrival_time)
        .execute(&mut *tx)
        .await
        .map_err(map_db_err)?;

        for crew_id in &new.crew_ids {
            sqlx::query("INSERT INTO trip_crews (trip_id, crew_id) VALUES ($1, $2)")
                .bind(id)
                .bind(crew_id)
                .execute(&mut *tx)
                .await
                .map_err(map_db_err)?;
        }

        tx.commit().await.map_err(map_db_err)?;

        Ok(Trip {
            id,
            route_id: new.route_id,
            train_id: new.train_id,
            departure_time: new.departure_time,
            arrival_time: new.arrival_time,
            crew_ids: new.crew_ids.clone(),
        })
    }

    async fn list_trips(&self, filter: &TripFilter) -> DomainResult<Vec<TripSummary>> {
        // Same shape as the list annotation in the original system: remaining
        // capacity is computed inside the query, not cached anywhere.
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT t.id, ss.name AS route_source, ds.name AS route_destination, \
             tr.name AS train, t.departure_time, t.arrival_time, \
             (CAST(tr.cargo_count AS BIGINT) * tr.seats_per_cargo) - COUNT(tk.id) AS tickets_available \
             FROM trips t \
             JOIN routes r ON t.route_id = r.id \
             JOIN stations ss ON r.source_station_id = ss.id \
             JOIN stations ds ON r.destination_station_id = ds.id \
             JOIN trains tr ON t.train_id = tr.id \
             LEFT JOIN tickets tk ON tk.trip_id = t.id \
             WHERE TRUE",
        );

        if let Some(source) = &filter.source {
            qb.push(" AND ss.name ILIKE ");
            qb.push_bind(format!("%{source}%"));
        }
        if let Some(destination) = &filter.destination {
            qb.push(" AND ds.name ILIKE ");
            qb.push_bind(format!("%{destination}%"));
        }
        if let Some(date) = filter.departure_date {
            qb.push(" AND CAST(t.departure_time AS DATE) = ");
            qb.push_bind(date);
        }
        if let Some(date) = filter.arrival_date {
            qb.push(" AND CAST(t.arrival_time AS DATE) = ");
            qb.push_bind(date);
        }

        qb.push(
            " GROUP BY t.id, ss.name, ds.name, tr.name, tr.cargo_count, tr.seats_per_cargo, \
             t.departure_time, t.arrival_time ORDER BY t.departure_time DESC",
        );

        let rows = qb
            .build_query_as::<TripSummaryRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_err)?;

        Ok(rows
            .into_iter()
            .map(|row| TripSummary {
                id: row.id,
                route_source: row.route_source,
                route_destination: row.route_destination,
                train: row.train,
                departure_time: row.departure_time,
                arrival_time: row.arrival_time,
                tickets_available: row.tickets_available,
            })
            .collect())
    }

    async fn get_trip(&self, id: Uuid) -> DomainResult<Option<TripDetail>> {
        let trip = sqlx::query_as::<_, TripRow>(
            "SELECT id, route_id, train_id, departure_time, arrival_time FROM trips WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_err)?;

        let Some(trip) = trip else {
            return Ok(None);
        };

        let route = sqlx::query_as::<_, TripRouteRow>(
            "SELECT r.id, r.distance_km, \
             ss.id AS source_id, ss.name AS source_name, \
             ss.latitude AS source_latitude, ss.longitude AS source_longitude, \
             ds.id AS destination_id, ds.name AS destination_name, \
             ds.latitude AS destination_latitude, ds.longitude AS destination_longitude \
             FROM routes r \
             JOIN stations ss ON r.source_station_id = ss.id \
             JOIN stations ds ON r.destination_station_id = ds.id \
             WHERE r.id = $1",
        )
        .bind(trip.route_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_err)?;

        let train = sqlx::query_as::<_, TripTrainRow>(
            "SELECT t.id, t.name, t.cargo_count, t.seats_per_cargo, \
             tt.id AS train_type_id, tt.name AS train_type_name \
             FROM trains t \
             JOIN train_types tt ON t.train_type_id = tt.id \
             WHERE t.id = $1",
        )
        .bind(trip.train_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_err)?;

        let crews = sqlx::query_as::<_, (Uuid, String, String)>(
            "SELECT c.id, c.first_name, c.last_name FROM crews c \
             JOIN trip_crews tc ON tc.crew_id = c.id \
             WHERE tc.trip_id = $1 \
             ORDER BY c.last_name, c.first_name",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_err)?;

        let taken = sqlx::query_as::<_, (i32, i32)>(
            "SELECT cargo, seat FROM tickets WHERE trip_id = $1 ORDER BY cargo, seat",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_err)?;

        Ok(Some(TripDetail {
            id: trip.id,
            route: Route {
                id: route.id,
                source: Station {
                    id: route.source_id,
                    name: route.source_name,
                    latitude: route.source_latitude,
                    longitude: route.source_longitude,
                },
                destination: Station {
                    id: route.destination_id,
                    name: route.destination_name,
                    latitude: route.destination_latitude,
                    longitude: route.destination_longitude,
                },
                distance_km: route.distance_km,
            },
            train: Train {
                id: train.id,
                name: train.name,
                cargo_count: train.cargo_count,
                seats_per_cargo: train.seats_per_cargo,
                train_type: TrainType {
                    id: train.train_type_id,
                    name: train.train_type_name,
                },
            },
            departure_time: trip.departure_time,
            arrival_time: trip.arrival_time,
            crews: crews
                .into_iter()
                .map(|(id, first_name, last_name)| Crew {
                    id,
                    first_name,
                    last_name,
                })
                .collect(),
            taken_seats: taken
                .into_iter()
                .map(|(cargo, seat)| SeatRef { cargo, seat })
                .collect(),
        }))
    }

    async fn update_trip(&self, id: Uuid, new: &NewTrip) -> DomainResult<Trip> {
        self.check_references(new).await?;

        let mut tx = self.pool.begin().await.map_err(map_db_err)?;

        let updated = sqlx::query(
            "UPDATE trips SET route_id = $1, train_id = $2, departure_time = $3, arrival_time = $4 \
             WHERE id = $5",
        )
        .bind(new.route_id)
        .bind(new.train_id)
        .bind(new.departure_time)
        .bind(new.arrival_time)
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(map_db_err)?;

        if updated.rows_affected() == 0 {
            return Err(DomainError::NotFound(format!("trip {id}")));
        }

        sqlx::query("DELETE FROM trip_crews WHERE trip_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(map_db_err)?;

        for crew_id in &new.crew_ids {
            sqlx::query("INSERT INTO trip_crews (trip_id, crew_id) VALUES ($1, $2)")
                .bind(id)
                .bind(crew_id)
                .execute(&mut *tx)
                .await
                .map_err(map_db_err)?;
        }

        tx.commit().await.map_err(map_db_err)?;

        Ok(Trip {
            id,
            route_id: new.route_id,
            train_id: new.train_id,
            departure_time: new.departure_time,
            arrival_time: new.arrival_time,
            crew_ids: new.crew_ids.clone(),
        })
    }

    async fn delete_trip(&self, id: Uuid) -> DomainResult<()> {
        // Tickets and crew links go with the trip via ON DELETE CASCADE.
        let deleted = sqlx::query("DELETE FROM trips WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_err)?;

        if deleted.rows_affected() == 0 {
            return Err(DomainError::NotFound(format!("trip {id}")));
        }
        Ok(())
    }

    async fn seating(&self, trip_id: Uuid) -> DomainResult<Option<TripSeating>> {
        let dims = sqlx::query_as::<_, (i32, i32)>(
            "SELECT tr.cargo_count, tr.seats_per_cargo FROM trips t \
             JOIN trains tr ON t.train_id = tr.id \
             WHERE t.id = $1",
        )
        .bind(trip_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_err)?;

        let Some((cargo_count, seats_per_cargo)) = dims else {
            return Ok(None);
        };

        let taken = sqlx::query_as::<_, (i32, i32)>(
            "SELECT cargo, seat FROM tickets WHERE trip_id = $1",
        )
        .bind(trip_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_err)?;

        Ok(Some(TripSeating {
            trip_id,
            cargo_count,
            seats_per_cargo,
            taken: taken
                .into_iter()
                .map(|(cargo, seat)| SeatRef { cargo, seat })
                .collect(),
        }))
    }
}
