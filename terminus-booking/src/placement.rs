use std::collections::HashSet;
use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use terminus_core::context::UserContext;
use terminus_core::error::{DomainError, DomainResult};
use terminus_core::order::{Order, TicketSpec};
use terminus_core::repository::{OrderRepository, TripRepository};

use crate::validate::{validate_ticket, BookingError};

/// Places a batch of ticket requests as one all-or-nothing order.
///
/// Every requested ticket is validated against the trip's seating before
/// anything is written; the store then persists the order and its tickets
/// in a single transaction. The storage uniqueness constraint remains the
/// backstop for requests racing past the pre-check.
pub struct OrderPlacementService {
    trips: Arc<dyn TripRepository>,
    orders: Arc<dyn OrderRepository>,
}

impl OrderPlacementService {
    pub fn new(trips: Arc<dyn TripRepository>, orders: Arc<dyn OrderRepository>) -> Self {
        Self { trips, orders }
    }

    pub async fn place(&self, ctx: &UserContext, requests: &[TicketSpec]) -> DomainResult<Order> {
        if requests.is_empty() {
            return Err(BookingError::EmptyOrder.into());
        }

        let mut claimed: HashSet<(Uuid, i32, i32)> = HashSet::new();
        for spec in requests {
            let seating = self
                .trips
                .seating(spec.trip_id)
                .await?
                .ok_or_else(|| DomainError::NotFound(format!("trip {}", spec.trip_id)))?;

            validate_ticket(spec, &seating)?;

            // Duplicates inside the batch would only surface at commit;
            // reject them here with the same conflict error.
            if !claimed.insert((spec.trip_id, spec.cargo, spec.seat)) {
                return Err(BookingError::SeatTaken {
                    cargo: spec.cargo,
                    seat: spec.seat,
                }
                .into());
            }
        }

        let order = self.orders.create_order(&ctx.user_id, requests).await?;
        info!(
            "Order committed: {} ({} tickets) for user {}",
            order.id,
            order.tickets.len(),
            ctx.user_id
        );
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono::Utc;
    use terminus_core::context::Role;
    use terminus_core::repository::CatalogRepository;
    use terminus_core::route::NewRoute;
    use terminus_core::station::NewStation;
    use terminus_core::train::{NewTrain, NewTrainType};
    use terminus_core::trip::{NewTrip, TripFilter};
    use terminus_core::PageRequest;
    use terminus_store::MemoryStore;

    fn ctx() -> UserContext {
        UserContext::new("user-1", Role::User)
    }

    fn spec(trip_id: Uuid, cargo: i32, seat: i32) -> TicketSpec {
        TicketSpec {
            trip_id,
            cargo,
            seat,
        }
    }

    async fn seed_trip(store: &MemoryStore, cargo_count: i32, seats_per_cargo: i32) -> Uuid {
        let train_type = store
            .create_train_type(&NewTrainType {
                name: "Express".to_string(),
            })
            .await
            .unwrap();
        let train = store
            .create_train(&NewTrain {
                name: "IC-101".to_string(),
                cargo_count,
                seats_per_cargo,
                train_type_id: train_type.id,
            })
            .await
            .unwrap();
        let source = store
            .create_station(&NewStation {
                name: "Kyiv".to_string(),
                latitude: 50.4501,
                longitude: 30.5234,
            })
            .await
            .unwrap();
        let destination = store
            .create_station(&NewStation {
                name: "Lviv".to_string(),
                latitude: 49.8397,
                longitude: 24.0297,
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
                arrival_time: Utc.with_ymd_and_hms(2024, 6, 2, 19, 0, 0).unwrap(),
                crew_ids: vec![],
            })
            .await
            .unwrap();
        trip.id
    }

    async fn availability(store: &MemoryStore, trip_id: Uuid) -> i64 {
        store
            .list_trips(&TripFilter::default())
            .await
            .unwrap()
            .into_iter()
            .find(|t| t.id == trip_id)
            .unwrap()
            .tickets_available
    }

    async fn order_count(store: &MemoryStore, user_id: &str) -> i64 {
        store
            .list_orders(
                user_id,
                &PageRequest {
                    page: 1,
                    page_size: 100,
                },
            )
            .await
            .unwrap()
            .count
    }

    fn service(store: &Arc<MemoryStore>) -> OrderPlacementService {
        OrderPlacementService::new(store.clone(), store.clone())
    }

    #[tokio::test]
    async fn empty_order_is_rejected_and_persists_nothing() {
        let store = Arc::new(MemoryStore::new());
        let svc = service(&store);

        let err = svc.place(&ctx(), &[]).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(order_count(&store, "user-1").await, 0);
    }

    #[tokio::test]
    async fn booking_a_seat_drops_availability() {
        let store = Arc::new(MemoryStore::new());
        let trip_id = seed_trip(&store, 2, 2).await;
        let svc = service(&store);

        assert_eq!(availability(&store, trip_id).await, 4);

        let order = svc.place(&ctx(), &[spec(trip_id, 1, 1)]).await.unwrap();
        assert_eq!(order.tickets.len(), 1);
        assert_eq!(order.tickets[0].cargo, 1);
        assert_eq!(order.tickets[0].seat, 1);
        assert_eq!(availability(&store, trip_id).await, 3);
    }

    #[tokio::test]
    async fn rebooking_the_same_seat_conflicts_and_availability_holds() {
        let store = Arc::new(MemoryStore::new());
        let trip_id = seed_trip(&store, 2, 2).await;
        let svc = service(&store);

        svc.place(&ctx(), &[spec(trip_id, 1, 1)]).await.unwrap();
        let err = svc.place(&ctx(), &[spec(trip_id, 1, 1)]).await.unwrap_err();

        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(availability(&store, trip_id).await, 3);
    }

    #[tokio::test]
    async fn out_of_range_cargo_fails_regardless_of_trip_state() {
        let store = Arc::new(MemoryStore::new());
        let trip_id = seed_trip(&store, 2, 2).await;
        let svc = service(&store);

        for cargo in [0, 3] {
            let err = svc.place(&ctx(), &[spec(trip_id, cargo, 1)]).await.unwrap_err();
            match err {
                DomainError::Validation(msg) => assert!(msg.contains("[1, 2]"), "{msg}"),
                other => panic!("expected validation error, got {other:?}"),
            }
        }
        assert_eq!(availability(&store, trip_id).await, 4);
    }

    #[tokio::test]
    async fn mid_batch_conflict_rolls_back_the_whole_order() {
        let store = Arc::new(MemoryStore::new());
        let trip_id = seed_trip(&store, 2, 2).await;
        let svc = service(&store);

        svc.place(&ctx(), &[spec(trip_id, 1, 2)]).await.unwrap();
        assert_eq!(availability(&store, trip_id).await, 3);

        // Ticket #2 of 3 collides with the already-sold seat.
        let err = svc
            .place(
                &ctx(),
                &[
                    spec(trip_id, 1, 1),
                    spec(trip_id, 1, 2),
                    spec(trip_id, 2, 1),
                ],
            )
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(availability(&store, trip_id).await, 3);
        assert_eq!(order_count(&store, "user-1").await, 1);
    }

    #[tokio::test]
    async fn duplicate_seats_within_one_batch_conflict() {
        let store = Arc::new(MemoryStore::new());
        let trip_id = seed_trip(&store, 2, 2).await;
        let svc = service(&store);

        let err = svc
            .place(&ctx(), &[spec(trip_id, 1, 1), spec(trip_id, 1, 1)])
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(availability(&store, trip_id).await, 4);
        assert_eq!(order_count(&store, "user-1").await, 0);
    }

    #[tokio::test]
    async fn unknown_trip_is_not_found() {
        let store = Arc::new(MemoryStore::new());
        let svc = service(&store);

        let err = svc
            .place(&ctx(), &[spec(Uuid::new_v4(), 1, 1)])
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn tickets_come_back_in_request_order() {
        let store = Arc::new(MemoryStore::new());
        let trip_id = seed_trip(&store, 2, 2).await;
        let svc = service(&store);

        let order = svc
            .place(
                &ctx(),
                &[
                    spec(trip_id, 2, 2),
                    spec(trip_id, 1, 1),
                    spec(trip_id, 2, 1),
                ],
            )
            .await
            .unwrap();

        let seats: Vec<(i32, i32)> = order.tickets.iter().map(|t| (t.cargo, t.seat)).collect();
        assert_eq!(seats, vec![(2, 2), (1, 1), (2, 1)]);
        assert_eq!(availability(&store, trip_id).await, 1);
    }
}
