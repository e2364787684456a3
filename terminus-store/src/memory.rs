use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use terminus_core::crew::{Crew, NewCrew};
use terminus_core::error::{DomainError, DomainResult};
use terminus_core::order::{Order, OrderPage, PageRequest, Ticket, TicketSpec};
use terminus_core::repository::{CatalogRepository, OrderRepository, TripRepository};
use terminus_core::route::{NewRoute, Route};
use terminus_core::station::{NewStation, Station};
use terminus_core::train::{NewTrain, NewTrainType, Train, TrainType};
use terminus_core::trip::{
    self, NewTrip, SeatRef, Trip, TripDetail, TripFilter, TripSeating, TripSummary,
};

/// In-process implementation of the repository traits with the same
/// observable semantics as the Postgres store: uniqueness enforced at
/// commit, cascade on trip deletion, conjunctive filters, newest-first
/// ordering. Every test in the workspace runs against this.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Clone)]
struct StoredTrain {
    id: Uuid,
    name: String,
    cargo_count: i32,
    seats_per_cargo: i32,
    train_type_id: Uuid,
}

#[derive(Debug, Clone)]
struct StoredRoute {
    id: Uuid,
    source_station_id: Uuid,
    destination_station_id: Uuid,
    distance_km: i32,
}

#[derive(Debug, Clone)]
struct StoredOrder {
    id: Uuid,
    user_id: String,
    created_at: chrono::DateTime<Utc>,
}

#[derive(Default)]
struct Inner {
    train_types: Vec<TrainType>,
    trains: Vec<StoredTrain>,
    stations: Vec<Station>,
    routes: Vec<StoredRoute>,
    crews: Vec<Crew>,
    trips: Vec<Trip>,
    orders: Vec<StoredOrder>,
    tickets: Vec<Ticket>,
}

impl Inner {
    fn station(&self, id: Uuid) -> Option<&Station> {
        self.stations.iter().find(|s| s.id == id)
    }

    fn route(&self, id: Uuid) -> Option<&StoredRoute> {
        self.routes.iter().find(|r| r.id == id)
    }

    fn train(&self, id: Uuid) -> Option<&StoredTrain> {
        self.trains.iter().find(|t| t.id == id)
    }

    fn train_type(&self, id: Uuid) -> Option<&TrainType> {
        self.train_types.iter().find(|t| t.id == id)
    }

    fn joined_train(&self, train: &StoredTrain) -> Train {
        let train_type = self
            .train_type(train.train_type_id)
            .cloned()
            .unwrap_or_else(|| TrainType {
                id: train.train_type_id,
                name: String::new(),
            });
        Train {
            id: train.id,
            name: train.name.clone(),
            cargo_count: train.cargo_count,
            seats_per_cargo: train.seats_per_cargo,
            train_type,
        }
    }

    fn joined_route(&self, route: &StoredRoute) -> DomainResult<Route> {
        let source = self
            .station(route.source_station_id)
            .cloned()
            .ok_or_else(|| DomainError::NotFound(format!("station {}", route.source_station_id)))?;
        let destination = self
            .station(route.destination_station_id)
            .cloned()
            .ok_or_else(|| {
                DomainError::NotFound(format!("station {}", route.destination_station_id))
            })?;
        Ok(Route {
            id: route.id,
            source,
            destination,
            distance_km: route.distance_km,
        })
    }

    fn check_trip_references(&self, new: &NewTrip) -> DomainResult<()> {
        if self.route(new.route_id).is_none() {
            return Err(DomainError::NotFound(format!("route {}", new.route_id)));
        }
        if self.train(new.train_id).is_none() {
            return Err(DomainError::NotFound(format!("train {}", new.train_id)));
        }
        for crew_id in &new.crew_ids {
            if !self.crews.iter().any(|c| c.id == *crew_id) {
                return Err(DomainError::NotFound(format!("crew {crew_id}")));
            }
        }
        Ok(())
    }

    fn sold_count(&self, trip_id: Uuid) -> i64 {
        self.tickets.iter().filter(|t| t.trip_id == trip_id).count() as i64
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> DomainResult<RwLockReadGuard<'_, Inner>> {
        self.inner
            .read()
            .map_err(|_| DomainError::Storage("store lock poisoned".to_string()))
    }

    fn write(&self) -> DomainResult<RwLockWriteGuard<'_, Inner>> {
        self.inner
            .write()
            .map_err(|_| DomainError::Storage("store lock poisoned".to_string()))
    }
}

#[async_trait]
impl CatalogRepository for MemoryStore {
    async fn create_train_type(&self, new: &NewTrainType) -> DomainResult<TrainType> {
        let mut inner = self.write()?;
        let train_type = TrainType {
            id: Uuid::new_v4(),
            name: new.name.clone(),
        };
        inner.train_types.push(train_type.clone());
        Ok(train_type)
    }

    async fn list_train_types(&self) -> DomainResult<Vec<TrainType>> {
        let inner = self.read()?;
        let mut types = inner.train_types.clone();
        types.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(types)
    }

    async fn create_train(&self, new: &NewTrain) -> DomainResult<Train> {
        let mut inner = self.write()?;
        if inner.train_type(new.train_type_id).is_none() {
            return Err(DomainError::NotFound(format!(
                "train type {}",
                new.train_type_id
            )));
        }
        let stored = StoredTrain {
            id: Uuid::new_v4(),
            name: new.name.clone(),
            cargo_count: new.cargo_count,
            seats_per_cargo: new.seats_per_cargo,
            train_type_id: new.train_type_id,
        };
        let train = inner.joined_train(&stored);
        inner.trains.push(stored);
        Ok(train)
    }

    async fn list_trains(&self) -> DomainResult<Vec<Train>> {
        let inner = self.read()?;
        let mut trains: Vec<Train> = inner
            .trains
            .iter()
            .map(|t| inner.joined_train(t))
            .collect();
        trains.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(trains)
    }

    async fn create_station(&self, new: &NewStation) -> DomainResult<Station> {
        let mut inner = self.write()?;
        let station = Station {
            id: Uuid::new_v4(),
            name: new.name.clone(),
            latitude: new.latitude,
            longitude: new.longitude,
        };
        inner.stations.push(station.clone());
        Ok(station)
    }

    async fn list_stations(&self) -> DomainResult<Vec<Station>> {
        let inner = self.read()?;
        let mut stations = inner.stations.clone();
        stations.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(stations)
    }

    async fn create_route(&self, new: &NewRoute) -> DomainResult<Route> {
        let mut inner = self.write()?;
        if inner.station(new.source_station_id).is_none() {
            return Err(DomainError::NotFound(format!(
                "station {}",
                new.source_station_id
            )));
        }
        if inner.station(new.destination_station_id).is_none() {
            return Err(DomainError::NotFound(format!(
                "station {}",
                new.destination_station_id
            )));
        }
        let stored = StoredRoute {
            id: Uuid::new_v4(),
            source_station_id: new.source_station_id,
            destination_station_id: new.destination_station_id,
            distance_km: new.distance_km,
        };
        let route = inner.joined_route(&stored)?;
        inner.routes.push(stored);
        Ok(route)
    }

    async fn list_routes(&self) -> DomainResult<Vec<Route>> {
        let inner = self.read()?;
        inner
            .routes
            .iter()
            .map(|r| inner.joined_route(r))
            .collect()
    }

    async fn get_route(&self, id: Uuid) -> DomainResult<Option<Route>> {
        let inner = self.read()?;
        match inner.route(id) {
            Some(route) => Ok(Some(inner.joined_route(route)?)),
            None => Ok(None),
        }
    }

    async fn create_crew(&self, new: &NewCrew) -> DomainResult<Crew> {
        let mut inner = self.write()?;
        let crew = Crew {
            id: Uuid::new_v4(),
            first_name: new.first_name.clone(),
            last_name: new.last_name.clone(),
        };
        inner.crews.push(crew.clone());
        Ok(crew)
    }

    async fn list_crews(&self) -> DomainResult<Vec<Crew>> {
        let inner = self.read()?;
        let mut crews = inner.crews.clone();
        crews.sort_by(|a, b| (&a.last_name, &a.first_name).cmp(&(&b.last_name, &b.first_name)));
        Ok(crews)
    }
}

#[async_trait]
impl TripRepository for MemoryStore {
    async fn create_trip(&self, new: &NewTrip) -> DomainResult<Trip> {
        let mut inner = self.write()?;
        inner.check_trip_references(new)?;
        let trip = Trip {
            id: Uuid::new_v4(),
            route_id: new.route_id,
            train_id: new.train_id,
            departure_time: new.departure_time,
            arrival_time: new.arrival_time,
            crew_ids: new.crew_ids.clone(),
        };
        inner.trips.push(trip.clone());
        Ok(trip)
    }

    async fn list_trips(&self, filter: &TripFilter) -> DomainResult<Vec<TripSummary>> {
        let inner = self.read()?;
        let mut summaries = Vec::new();

        for t in &inner.trips {
            let Some(route) = inner.route(t.route_id) else {
                continue;
            };
            let Some(source) = inner.station(route.source_station_id) else {
                continue;
            };
            let Some(destination) = inner.station(route.destination_station_id) else {
                continue;
            };
            let Some(train) = inner.train(t.train_id) else {
                continue;
            };

            if let Some(wanted) = &filter.source {
                if !source.name.to_lowercase().contains(&wanted.to_lowercase()) {
                    continue;
                }
            }
            if let Some(wanted) = &filter.destination {
                if !destination
                    .name
                    .to_lowercase()
                    .contains(&wanted.to_lowercase())
                {
                    continue;
                }
            }
            if let Some(date) = filter.departure_date {
                if t.departure_time.date_naive() != date {
                    continue;
                }
            }
            if let Some(date) = filter.arrival_date {
                if t.arrival_time.date_naive() != date {
                    continue;
                }
            }

            let capacity = train.cargo_count * train.seats_per_cargo;
            summaries.push(TripSummary {
                id: t.id,
                route_source: source.name.clone(),
                route_destination: destination.name.clone(),
                train: train.name.clone(),
                departure_time: t.departure_time,
                arrival_time: t.arrival_time,
                tickets_available: trip::tickets_available(capacity, inner.sold_count(t.id)),
            });
        }

        summaries.sort_by(|a, b| b.departure_time.cmp(&a.departure_time));
        Ok(summaries)
    }

    async fn get_trip(&self, id: Uuid) -> DomainResult<Option<TripDetail>> {
        let inner = self.read()?;
        let Some(t) = inner.trips.iter().find(|t| t.id == id) else {
            return Ok(None);
        };

        let route = inner
            .route(t.route_id)
            .ok_or_else(|| DomainError::NotFound(format!("route {}", t.route_id)))?;
        let route = inner.joined_route(route)?;
        let train = inner
            .train(t.train_id)
            .ok_or_else(|| DomainError::NotFound(format!("train {}", t.train_id)))?;
        let train = inner.joined_train(train);

        let mut crews: Vec<Crew> = t
            .crew_ids
            .iter()
            .filter_map(|id| inner.crews.iter().find(|c| c.id == *id).cloned())
            .collect();
        crews.sort_by(|a, b| (&a.last_name, &a.first_name).cmp(&(&b.last_name, &b.first_name)));

        let mut taken_seats: Vec<SeatRef> = inner
            .tickets
            .iter()
            .filter(|ticket| ticket.trip_id == id)
            .map(|ticket| SeatRef {
                cargo: ticket.cargo,
                seat: ticket.seat,
            })
            .collect();
        taken_seats.sort_by_key(|s| (s.cargo, s.seat));

        Ok(Some(TripDetail {
            id: t.id,
            route,
            train,
            departure_time: t.departure_time,
            arrival_time: t.arrival_time,
            crews,
            taken_seats,
        }))
    }

    async fn update_trip(&self, id: Uuid, new: &NewTrip) -> DomainResult<Trip> {
        let mut inner = self.write()?;
        inner.check_trip_references(new)?;
        let Some(existing) = inner.trips.iter_mut().find(|t| t.id == id) else {
            return Err(DomainError::NotFound(format!("trip {id}")));
        };
        existing.route_id = new.route_id;
        existing.train_id = new.train_id;
        existing.departure_time = new.departure_time;
        existing.arrival_time = new.arrival_time;
        existing.crew_ids = new.crew_ids.clone();
        Ok(existing.clone())
    }

    async fn delete_trip(&self, id: Uuid) -> DomainResult<()> {
        let mut inner = self.write()?;
        let before = inner.trips.len();
        inner.trips.retain(|t| t.id != id);
        if inner.trips.len() == before {
            return Err(DomainError::NotFound(format!("trip {id}")));
        }
        // Cascade: the trip's tickets go with it.
        inner.tickets.retain(|t| t.trip_id != id);
        Ok(())
    }

    async fn seating(&self, trip_id: Uuid) -> DomainResult<Option<TripSeating>> {
        let inner = self.read()?;
        let Some(t) = inner.trips.iter().find(|t| t.id == trip_id) else {
            return Ok(None);
        };
        let train = inner
            .train(t.train_id)
            .ok_or_else(|| DomainError::NotFound(format!("train {}", t.train_id)))?;

        Ok(Some(TripSeating {
            trip_id,
            cargo_count: train.cargo_count,
            seats_per_cargo: train.seats_per_cargo,
            taken: inner
                .tickets
                .iter()
                .filter(|ticket| ticket.trip_id == trip_id)
                .map(|ticket| SeatRef {
                    cargo: ticket.cargo,
                    seat: ticket.seat,
                })
                .collect(),
        }))
    }
}

#[async_trait]
impl OrderRepository for MemoryStore {
    async fn create_order(&self, user_id: &str, tickets: &[TicketSpec]) -> DomainResult<Order> {
        let mut inner = self.write()?;

        // Commit-time checks, mirroring the database constraints: foreign
        // keys first, then the unique seat index. Nothing is written until
        // every ticket has passed.
        for spec in tickets {
            if !inner.trips.iter().any(|t| t.id == spec.trip_id) {
                return Err(DomainError::NotFound(format!("trip {}", spec.trip_id)));
            }
        }
        for (i, spec) in tickets.iter().enumerate() {
            let sold = inner.tickets.iter().any(|t| {
                t.trip_id == spec.trip_id && t.cargo == spec.cargo && t.seat == spec.seat
            });
            let dup_in_batch = tickets[..i].iter().any(|other| {
                other.trip_id == spec.trip_id
                    && other.cargo == spec.cargo
                    && other.seat == spec.seat
            });
            if sold || dup_in_batch {
                return Err(DomainError::Conflict(
                    "seat already taken on this trip".to_string(),
                ));
            }
        }

        let order = StoredOrder {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            created_at: Utc::now(),
        };
        let created: Vec<Ticket> = tickets
            .iter()
            .map(|spec| Ticket {
                id: Uuid::new_v4(),
                trip_id: spec.trip_id,
                order_id: order.id,
                cargo: spec.cargo,
                seat: spec.seat,
            })
            .collect();

        inner.tickets.extend(created.iter().cloned());
        inner.orders.push(order.clone());

        Ok(Order {
            id: order.id,
            user_id: order.user_id,
            created_at: order.created_at,
            tickets: created,
        })
    }

    async fn list_orders(&self, user_id: &str, page: &PageRequest) -> DomainResult<OrderPage> {
        let inner = self.read()?;
        let mine: Vec<&StoredOrder> = inner
            .orders
            .iter()
            .rev()
            .filter(|o| o.user_id == user_id)
            .collect();

        let count = mine.len() as i64;
        let offset = page.offset() as usize;
        let results = mine
            .into_iter()
            .skip(offset)
            .take(page.page_size as usize)
            .map(|o| Order {
                id: o.id,
                user_id: o.user_id.clone(),
                created_at: o.created_at,
                tickets: inner
                    .tickets
                    .iter()
                    .filter(|t| t.order_id == o.id)
                    .cloned()
                    .collect(),
            })
            .collect();

        Ok(OrderPage { count, results })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    struct Seeded {
        trip_id: Uuid,
        route_id: Uuid,
        train_id: Uuid,
    }

    async fn seed(store: &MemoryStore, source_name: &str, destination_name: &str) -> Seeded {
        let train_type = store
            .create_train_type(&NewTrainType {
                name: "Express".to_string(),
            })
            .await
            .unwrap();
        let train = store
            .create_train(&NewTrain {
                name: "IC-101".to_string(),
                cargo_count: 2,
                seats_per_cargo: 2,
                train_type_id: train_type.id,
            })
            .await
            .unwrap();
        let source = store
            .create_station(&NewStation {
                name: source_name.to_string(),
                latitude: 50.45,
                longitude: 30.52,
            })
            .await
            .unwrap();
        let destination = store
            .create_station(&NewStation {
                name: destination_name.to_string(),
                latitude: 49.84,
                longitude: 24.03,
            })
            .await
            .unwrap();
        let route = store
            .create_route(&NewRoute {
                source_station_id: source.id,
                destination_station_id: destination.id,
                distance_km: 540,
            })
            .await
            .unwrap();
        let trip = store
            .create_trip(&NewTrip {
                route_id: route.id,
                train_id: train.id,
                departure_time: Utc.with_ymd_and_hms(2024, 6, 2, 14, 0, 0).unwrap(),
                arrival_time: Utc.with_ymd_and_hms(2024, 6, 3, 7, 30, 0).unwrap(),
                crew_ids: vec![],
            })
            .await
            .unwrap();
        Seeded {
            trip_id: trip.id,
            route_id: route.id,
            train_id: train.id,
        }
    }

    fn spec(trip_id: Uuid, cargo: i32, seat: i32) -> TicketSpec {
        TicketSpec {
            trip_id,
            cargo,
            seat,
        }
    }

    #[tokio::test]
    async fn source_filter_is_case_insensitive_substring() {
        let store = MemoryStore::new();
        seed(&store, "Kyiv-Pasazhyrskyi", "Lviv").await;
        seed(&store, "Odesa", "Kharkiv").await;

        let filter = TripFilter {
            source: Some("kyiv".to_string()),
            ..TripFilter::default()
        };
        let trips = store.list_trips(&filter).await.unwrap();
        assert_eq!(trips.len(), 1);
        assert_eq!(trips[0].route_source, "Kyiv-Pasazhyrskyi");
    }

    #[tokio::test]
    async fn filters_compose_conjunctively() {
        let store = MemoryStore::new();
        seed(&store, "Kyiv", "Lviv").await;

        let filter = TripFilter {
            source: Some("Kyiv".to_string()),
            destination: Some("Odesa".to_string()),
            ..TripFilter::default()
        };
        assert!(store.list_trips(&filter).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn date_filters_match_the_calendar_date() {
        let store = MemoryStore::new();
        seed(&store, "Kyiv", "Lviv").await;

        let hit = TripFilter {
            departure_date: chrono::NaiveDate::from_ymd_opt(2024, 6, 2),
            ..TripFilter::default()
        };
        assert_eq!(store.list_trips(&hit).await.unwrap().len(), 1);

        let miss = TripFilter {
            departure_date: chrono::NaiveDate::from_ymd_opt(2024, 6, 3),
            ..TripFilter::default()
        };
        assert!(store.list_trips(&miss).await.unwrap().is_empty());

        // Arrival is on the 3rd.
        let arrival = TripFilter {
            arrival_date: chrono::NaiveDate::from_ymd_opt(2024, 6, 3),
            ..TripFilter::default()
        };
        assert_eq!(store.list_trips(&arrival).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn commit_time_uniqueness_rejects_a_raced_duplicate() {
        let store = MemoryStore::new();
        let seeded = seed(&store, "Kyiv", "Lviv").await;

        // Two orders claim the same seat; the pre-check has been bypassed,
        // as happens when both pass validation before either commits.
        store
            .create_order("user-a", &[spec(seeded.trip_id, 1, 1)])
            .await
            .unwrap();
        let err = store
            .create_order("user-b", &[spec(seeded.trip_id, 1, 1)])
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Conflict(_)));
        let page = store
            .list_orders(
                "user-b",
                &PageRequest {
                    page: 1,
                    page_size: 10,
                },
            )
            .await
            .unwrap();
        assert_eq!(page.count, 0);
    }

    #[tokio::test]
    async fn deleting_a_trip_cascades_to_its_tickets() {
        let store = MemoryStore::new();
        let seeded = seed(&store, "Kyiv", "Lviv").await;
        store
            .create_order("user-a", &[spec(seeded.trip_id, 1, 1)])
            .await
            .unwrap();

        store.delete_trip(seeded.trip_id).await.unwrap();

        assert!(store.seating(seeded.trip_id).await.unwrap().is_none());
        let page = store
            .list_orders(
                "user-a",
                &PageRequest {
                    page: 1,
                    page_size: 10,
                },
            )
            .await
            .unwrap();
        // The order record survives; its tickets do not.
        assert_eq!(page.count, 1);
        assert!(page.results[0].tickets.is_empty());
    }

    #[tokio::test]
    async fn order_listing_is_scoped_and_paginated() {
        let store = MemoryStore::new();
        let seeded = seed(&store, "Kyiv", "Lviv").await;

        // 2x2 train: only 4 seats, so spread across seats for one user.
        for (cargo, seat) in [(1, 1), (1, 2), (2, 1)] {
            store
                .create_order("user-a", &[spec(seeded.trip_id, cargo, seat)])
                .await
                .unwrap();
        }
        store
            .create_order("user-b", &[spec(seeded.trip_id, 2, 2)])
            .await
            .unwrap();

        let page = store
            .list_orders(
                "user-a",
                &PageRequest {
                    page: 1,
                    page_size: 2,
                },
            )
            .await
            .unwrap();
        assert_eq!(page.count, 3);
        assert_eq!(page.results.len(), 2);

        let page2 = store
            .list_orders(
                "user-a",
                &PageRequest {
                    page: 2,
                    page_size: 2,
                },
            )
            .await
            .unwrap();
        assert_eq!(page2.results.len(), 1);
    }

    #[tokio::test]
    async fn trip_detail_reports_taken_seats() {
        let store = MemoryStore::new();
        let seeded = seed(&store, "Kyiv", "Lviv").await;
        store
            .create_order(
                "user-a",
                &[spec(seeded.trip_id, 2, 1), spec(seeded.trip_id, 1, 1)],
            )
            .await
            .unwrap();

        let detail = store.get_trip(seeded.trip_id).await.unwrap().unwrap();
        assert_eq!(
            detail.taken_seats,
            vec![SeatRef { cargo: 1, seat: 1 }, SeatRef { cargo: 2, seat: 1 }]
        );
        assert_eq!(detail.route.source.name, "Kyiv");
        assert_eq!(detail.train.capacity(), 4);
    }

    #[tokio::test]
    async fn update_trip_replaces_the_crew_set() {
        let store = MemoryStore::new();
        let seeded = seed(&store, "Kyiv", "Lviv").await;
        let crew = store
            .create_crew(&NewCrew {
                first_name: "John".to_string(),
                last_name: "Doe".to_string(),
            })
            .await
            .unwrap();

        let updated = store
            .update_trip(
                seeded.trip_id,
                &NewTrip {
                    route_id: seeded.route_id,
                    train_id: seeded.train_id,
                    departure_time: Utc.with_ymd_and_hms(2024, 6, 2, 15, 0, 0).unwrap(),
                    arrival_time: Utc.with_ymd_and_hms(2024, 6, 3, 8, 30, 0).unwrap(),
                    crew_ids: vec![crew.id],
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.crew_ids, vec![crew.id]);

        let detail = store.get_trip(seeded.trip_id).await.unwrap().unwrap();
        assert_eq!(detail.crews.len(), 1);
        assert_eq!(detail.crews[0].full_name(), "John Doe");
    }

    #[tokio::test]
    async fn unknown_references_are_not_found() {
        let store = MemoryStore::new();
        let err = store
            .create_train(&NewTrain {
                name: "Ghost".to_string(),
                cargo_count: 1,
                seats_per_cargo: 1,
                train_type_id: Uuid::new_v4(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));

        let err = store.delete_trip(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }
}
