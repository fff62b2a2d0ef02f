//! Web layer: JSON API over the itinerary engine.

mod dto;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
