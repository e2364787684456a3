use async_trait::async_trait;
use uuid::Uuid;

use crate::crew::{Crew, NewCrew};
use crate::error::DomainResult;
use crate::order::{Order, OrderPage, PageRequest, TicketSpec};
use crate::route::{NewRoute, Route};
use crate::station::{NewStation, Station};
use crate::train::{NewTrain, NewTrainType, Train, TrainType};
use crate::trip::{NewTrip, Trip, TripDetail, TripFilter, TripSeating, TripSummary};

/// Repository for the reference entities: train types, trains, stations,
/// routes and crews. Reads return fully joined value objects.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn create_train_type(&self, new: &NewTrainType) -> DomainResult<TrainType>;
    async fn list_train_types(&self) -> DomainResult<Vec<TrainType>>;

    async fn create_train(&self, new: &NewTrain) -> DomainResult<Train>;
    async fn list_trains(&self) -> DomainResult<Vec<Train>>;

    async fn create_station(&self, new: &NewStation) -> DomainResult<Station>;
    async fn list_stations(&self) -> DomainResult<Vec<Station>>;

    async fn create_route(&self, new: &NewRoute) -> DomainResult<Route>;
    async fn list_routes(&self) -> DomainResult<Vec<Route>>;
    async fn get_route(&self, id: Uuid) -> DomainResult<Option<Route>>;

    async fn create_crew(&self, new: &NewCrew) -> DomainResult<Crew>;
    async fn list_crews(&self) -> DomainResult<Vec<Crew>>;
}

/// Repository for trips. Deleting a trip cascades to its tickets.
#[async_trait]
pub trait TripRepository: Send + Sync {
    async fn create_trip(&self, new: &NewTrip) -> DomainResult<Trip>;
    async fn list_trips(&self, filter: &TripFilter) -> DomainResult<Vec<TripSummary>>;
    async fn get_trip(&self, id: Uuid) -> DomainResult<Option<TripDetail>>;
    async fn update_trip(&self, id: Uuid, new: &NewTrip) -> DomainResult<Trip>;
    async fn delete_trip(&self, id: Uuid) -> DomainResult<()>;

    /// Train dimensions plus sold seats for one trip, for booking validation.
    async fn seating(&self, trip_id: Uuid) -> DomainResult<Option<TripSeating>>;
}

/// Repository for orders and their tickets.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Persist an order and all of its tickets in one atomic unit.
    ///
    /// The storage layer enforces the `(trip, cargo, seat)` uniqueness
    /// constraint at commit; a raced duplicate fails the whole order with
    /// a Conflict and leaves nothing behind.
    async fn create_order(&self, user_id: &str, tickets: &[TicketSpec]) -> DomainResult<Order>;

    /// Orders belonging to one user, newest first.
    async fn list_orders(&self, user_id: &str, page: &PageRequest) -> DomainResult<OrderPage>;
}
