use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use terminus_core::crew::{Crew, NewCrew};
use terminus_core::error::{DomainError, DomainResult};
use terminus_core::repository::CatalogRepository;
use terminus_core::route::{NewRoute, Route};
use terminus_core::station::{NewStation, Station};
use terminus_core::train::{NewTrain, NewTrainType, Train, TrainType};

use crate::map_db_err;

pub struct PgCatalogRepository {
    pool: PgPool,
}

impl PgCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_station(&self, id: Uuid) -> DomainResult<Station> {
        sqlx::query_as::<_, StationRow>(
            "SELECT id, name, latitude, longitude FROM stations WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_err)?
        .map(StationRow::into_station)
        .ok_or_else(|| DomainError::NotFound(format!("station {id}")))
    }
}

// Internal structs for type-safe querying
#[derive(sqlx::FromRow)]
struct StationRow {
    id: Uuid,
    name: String,
    latitude: f64,
    longitude: f64,
}

impl StationRow {
    fn into_station(self) -> Station {
        Station {
            id: self.id,
            name: self.name,
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

#[derive(sqlx::FromRow)]
struct TrainRow {
    id: Uuid,
    name: String,
    cargo_count: i32,
    seats_per_cargo: i32,
    train_type_id: Uuid,
    train_type_name: String,
}

impl TrainRow {
    fn into_train(self) -> Train {
        Train {
            id: self.id,
            name: self.name,
            cargo_count: self.cargo_count,
            seats_per_cargo: self.seats_per_cargo,
            train_type: TrainType {
                id: self.train_type_id,
                name: self.train_type_name,
            },
        }
    }
}

#[derive(sqlx::FromRow)]
struct RouteRow {
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

impl RouteRow {
    fn into_route(self) -> Route {
        Route {
            id: self.id,
            source: Station {
                id: self.source_id,
                name: self.source_name,
                latitude: self.source_latitude,
                longitude: self.source_longitude,
            },
            destination: Station {
                id: self.destination_id,
                name: self.destination_name,
                latitude: self.destination_latitude,
                longitude: self.destination_longitude,
            },
            distance_km: self.distance_km,
        }
    }
}

const ROUTE_SELECT: &str = "SELECT r.id, r.distance_km, \
     ss.id AS source_id, ss.name AS source_name, \
     ss.latitude AS source_latitude, ss.longitude AS source_longitude, \
     ds.id AS destination_id, ds.name AS destination_name, \
     ds.latitude AS destination_latitude, ds.longitude AS destination_longitude \
     FROM routes r \
     JOIN stations ss ON r.source_station_id = ss.id \
     JOIN stations ds ON r.destination_station_id = ds.id";

#[async_trait]
impl CatalogRepository for PgCatalogRepository {
    async fn create_train_type(&self, new: &NewTrainType) -> DomainResult<TrainType> {
        let id = Uuid::new_v4();
        sqlx::query("INSERT INTO train_types (id, name) VALUES ($1, $2)")
            .bind(id)
            .bind(&new.name)
            .execute(&self.pool)
            .await
            .map_err(map_db_err)?;

        Ok(TrainType {
            id,
            name: new.name.clone(),
        })
    }

    async fn list_train_types(&self) -> DomainResult<Vec<TrainType>> {
        let rows = sqlx::query_as::<_, (Uuid, String)>(
            "SELECT id, name FROM train_types ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_err)?;

        Ok(rows
            .into_iter()
            .map(|(id, name)| TrainType { id, name })
            .collect())
    }

    async fn create_train(&self, new: &NewTrain) -> DomainResult<Train> {
        let train_type = sqlx::query_as::<_, (Uuid, String)>(
            "SELECT id, name FROM train_types WHERE id = $1",
        )
        .bind(new.train_type_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_err)?
        .map(|(id, name)| TrainType { id, name })
        .ok_or_else(|| DomainError::NotFound(format!("train type {}", new.train_type_id)))?;

        let id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO trains (id, name, cargo_count, seats_per_cargo, train_type_id) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(id)
        .bind(&new.name)
        .bind(new.cargo_count)
        .bind(new.seats_per_cargo)
        .bind(new.train_type_id)
        .execute(&self.pool)
        .await
        .map_err(map_db_err)?;

        Ok(Train {
            id,
            name: new.name.clone(),
            cargo_count: new.cargo_count,
            seats_per_cargo: new.seats_per_cargo,
            train_type,
        })
    }

    async fn list_trains(&self) -> DomainResult<Vec<Train>> {
        let rows = sqlx::query_as::<_, TrainRow>(
            "SELECT t.id, t.name, t.cargo_count, t.seats_per_cargo, \
             tt.id AS train_type_id, tt.name AS train_type_name \
             FROM trains t \
             JOIN train_types tt ON t.train_type_id = tt.id \
             ORDER BY t.name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_err)?;

        Ok(rows.into_iter().map(TrainRow::into_train).collect())
    }

    async fn create_station(&self, new: &NewStation) -> DomainResult<Station> {
        let id = Uuid::new_v4();
        sqlx::query("INSERT INTO stations (id, name, latitude, longitude) VALUES ($1, $2, $3, $4)")
            .bind(id)
            .bind(&new.name)
            .bind(new.latitude)
            .bind(new.longitude)
            .execute(&self.pool)
            .await
            .map_err(map_db_err)?;

        Ok(Station {
            id,
            name: new.name.clone(),
            latitude: new.latitude,
            longitude: new.longitude,
        })
    }

    async fn list_stations(&self) -> DomainResult<Vec<Station>> {
        let rows = sqlx::query_as::<_, StationRow>(
            "SELECT id, name, latitude, longitude FROM stations ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_err)?;

        Ok(rows.into_iter().map(StationRow::into_station).collect())
    }

    async fn create_route(&self, new: &NewRoute) -> DomainResult<Route> {
        let source = self.fetch_station(new.source_station_id).await?;
        let destination = self.fetch_station(new.destination_station_id).await?;

        let id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO routes (id, source_station_id, destination_station_id, distance_km) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(id)
        .bind(new.source_station_id)
        .bind(new.destination_station_id)
        .bind(new.distance_km)
        .execute(&self.pool)
        .await
        .map_err(map_db_err)?;

        Ok(Route {
            id,
            source,
            destination,
            distance_km: new.distance_km,
        })
    }

    async fn list_routes(&self) -> DomainResult<Vec<Route>> {
        let rows = sqlx::query_as::<_, RouteRow>(&format!("{ROUTE_SELECT} ORDER BY r.id"))
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_err)?;

        Ok(rows.into_iter().map(RouteRow::into_route).collect())
    }

    async fn get_route(&self, id: Uuid) -> DomainResult<Option<Route>> {
        let row = sqlx::query_as::<_, RouteRow>(&format!("{ROUTE_SELECT} WHERE r.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_err)?;

        Ok(row.map(RouteRow::into_route))
    }

    async fn create_crew(&self, new: &NewCrew) -> DomainResult<Crew> {
        let id = Uuid::new_v4();
        sqlx::query("INSERT INTO crews (id, first_name, last_name) VALUES ($1, $2, $3)")
            .bind(id)
            .bind(&new.first_name)
            .bind(&new.last_name)
            .execute(&self.pool)
            .await
            .map_err(map_db_err)?;

        Ok(Crew {
            id,
            first_name: new.first_name.clone(),
            last_name: new.last_name.clone(),
        })
    }

    async fn list_crews(&self) -> DomainResult<Vec<Crew>> {
        let rows = sqlx::query_as::<_, (Uuid, String, String)>(
            "SELECT id, first_name, last_name FROM crews ORDER BY last_name, first_name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_err)?;

        Ok(rows
            .into_iter()
            .map(|(id, first_name, last_name)| Crew {
                id,
                first_name,
                last_name,
            })
            .collect())
    }
}
