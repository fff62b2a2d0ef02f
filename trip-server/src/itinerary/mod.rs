//! Itinerary model and the pure derivations over it.

mod model;
pub mod schedule;
pub mod summary;

pub use model::{DestinationPatch, Itinerary, SettingsPatch, TripSettings};
pub use schedule::{StaySpan, derive};
pub use summary::{BudgetStatus, TripSummary, autofill, summarize};
