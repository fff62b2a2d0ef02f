//! Domain types for the trip planner.
//!
//! This module contains the core domain model types that represent
//! validated itinerary data. Types enforce their invariants at construction
//! or normalization time, so code that receives these types can trust them.

mod currency;
mod destination;
mod flight;
mod transport;

pub use currency::Currency;
pub use destination::{Destination, DestinationId};
pub use flight::FlightNumber;
pub use transport::TransportMode;
