pub mod context;
pub mod crew;
pub mod error;
pub mod order;
pub mod repository;
pub mod route;
pub mod station;
pub mod train;
pub mod trip;

pub use context::{Role, UserContext};
pub use crew::{Crew, NewCrew};
pub use error::{DomainError, DomainResult};
pub use order::{Order, OrderPage, PageRequest, Ticket, TicketSpec};
pub use route::{NewRoute, Route};
pub use station::{NewStation, Station};
pub use train::{NewTrain, NewTrainType, Train, TrainType};
pub use trip::{NewTrip, SeatRef, Trip, TripDetail, TripFilter, TripSeating, TripSummary};
