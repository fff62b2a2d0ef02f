//! The live planning session.
//!
//! An explicit owned object, constructed at startup from decoded input or
//! defaults and mutated only through the operations below; there is no
//! ambient singleton. Derived dates and totals are recomputed from the
//! model on demand, never stored as independent mutable state.

use crate::codec::{self, TokenError, TripState};
use crate::domain::DestinationId;
use crate::itinerary::{
    DestinationPatch, Itinerary, SettingsPatch, StaySpan, TripSettings, TripSummary,
};

/// Settings plus the ordered itinerary: the single source of truth for the
/// active session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub settings: TripSettings,
    pub itinerary: Itinerary,
}

impl Session {
    /// A fresh session with default settings and an empty itinerary.
    pub fn new() -> Self {
        Session::default()
    }

    /// Build a session from decoded state, defaulting whatever the state
    /// does not carry.
    pub fn from_state(state: TripState) -> Self {
        let mut session = Session::new();
        session.apply_state(state);
        session
    }

    /// Overwrite the fields a decoded state carries; a loaded snapshot is
    /// a full replace of the session, not a merge, because snapshots always
    /// carry every field.
    pub fn apply_state(&mut self, state: TripState) {
        if let Some(date) = state.start_date {
            self.settings.start_date = date;
        }
        if let Some(days) = state.total_days {
            self.settings.total_days_budget = days.max(1);
        }
        if let Some(currency) = state.currency {
            self.settings.currency = currency;
        }
        if let Some(destinations) = state.destinations {
            self.itinerary = Itinerary::from_destinations(destinations);
        }
    }

    /// Restore defaults in place: empty itinerary, today's date, default
    /// budget and currency.
    pub fn reset(&mut self) {
        self.settings.reset();
        self.itinerary = Itinerary::new();
    }

    /// Snapshot the full session for encoding.
    pub fn to_state(&self) -> TripState {
        TripState::snapshot(
            self.settings.start_date,
            self.settings.total_days_budget,
            self.settings.currency,
            self.itinerary.destinations().to_vec(),
        )
    }

    /// The current v2 share token.
    pub fn share_token(&self) -> Result<String, TokenError> {
        codec::encode_token(&self.to_state())
    }

    /// Absolute dates for each stay, derived on demand.
    pub fn schedule(&self) -> Vec<StaySpan> {
        crate::itinerary::derive(self.settings.start_date, self.itinerary.destinations())
    }

    /// Aggregate totals, derived on demand.
    pub fn summary(&self) -> TripSummary {
        crate::itinerary::summarize(
            self.settings.total_days_budget,
            self.itinerary.destinations(),
        )
    }

    /// Redistribute the day budget evenly across destinations.
    pub fn autofill(&mut self) {
        crate::itinerary::autofill(
            self.settings.total_days_budget,
            self.itinerary.destinations_mut(),
        );
    }

    pub fn add_destination(&mut self, name: impl Into<String>) -> DestinationId {
        self.itinerary.add(name)
    }

    pub fn remove_destination(&mut self, id: DestinationId) {
        self.itinerary.remove(id);
    }

    pub fn move_destination(&mut self, from: usize, to: usize) {
        self.itinerary.move_item(from, to);
    }

    pub fn patch_destination(&mut self, id: DestinationId, patch: &DestinationPatch) -> bool {
        self.itinerary.apply(id, patch)
    }

    pub fn patch_settings(&mut self, patch: &SettingsPatch) {
        self.settings.apply(patch);
    }
}
