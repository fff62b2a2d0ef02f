//! Remote place-name suggestions for destination entry.

mod client;
mod suggest;

pub use client::{PlaceClient, PlaceClientConfig, PlaceDto, PlaceError};
pub use suggest::{SuggestConfig, Suggestions};
