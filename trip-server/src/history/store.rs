//! Named history of saved itineraries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use super::kv::KvStore;
use super::seed::{self, SeedError};
use crate::codec::TokenError;

/// Key holding the serialized saved-trip list.
const TRIPS_KEY: &str = "trip_planner.saved_trips";

/// Key holding the active trip id.
const ACTIVE_KEY: &str = "trip_planner.active_trip";

/// One immutable history snapshot.
///
/// The token is fully self-contained; the entry never changes after
/// creation except through overwrite (which replaces token and timestamp)
/// and rename.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedTrip {
    pub id: String,
    pub name: String,
    /// Encoded snapshot of settings + itinerary.
    #[serde(alias = "url")]
    pub token: String,
    #[serde(default = "Utc::now")]
    pub saved_at: DateTime<Utc>,
}

/// Ordered history of saved trips plus the active-trip pointer, backed by
/// a key-value store.
///
/// The list is most-recently-saved first. Invariants maintained here:
/// at most one entry per id, and the active pointer always references an
/// existing entry (deleting that entry clears the pointer).
#[derive(Debug)]
pub struct HistoryStore<S: KvStore> {
    kv: S,
}

impl<S: KvStore> HistoryStore<S> {
    pub fn new(kv: S) -> Self {
        HistoryStore { kv }
    }

    /// The saved trips, most recent first.
    pub fn list(&self) -> Vec<SavedTrip> {
        let Some(json) = self.kv.get(TRIPS_KEY) else {
            return Vec::new();
        };
        serde_json::from_str(&json).unwrap_or_else(|e| {
            warn!(error = %e, "saved-trip list is corrupt, treating as empty");
            Vec::new()
        })
    }

    /// Id of the trip currently being edited, if the session is attached.
    pub fn active_id(&self) -> Option<String> {
        self.kv.get(ACTIVE_KEY).filter(|id| !id.is_empty())
    }

    /// Save the current state under a new name and make it active.
    pub fn save_new(&mut self, name: &str, token: &str) -> SavedTrip {
        let trip = SavedTrip {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            token: token.to_string(),
            saved_at: Utc::now(),
        };

        let mut trips = self.list();
        trips.insert(0, trip.clone());
        self.persist(&trips);
        self.set_active(Some(&trip.id));
        trip
    }

    /// Overwrite the active trip in place and move it to the front.
    ///
    /// When there is no active trip, or the entry it referenced was
    /// deleted, this degrades to [`HistoryStore::save_new`] under
    /// `fallback_name` rather than silently failing.
    pub fn save_over_active(&mut self, fallback_name: &str, token: &str) -> SavedTrip {
        let Some(active) = self.active_id() else {
            return self.save_new(fallback_name, token);
        };

        let mut trips = self.list();
        let Some(pos) = trips.iter().position(|t| t.id == active) else {
            return self.save_new(fallback_name, token);
        };

        let mut trip = trips.remove(pos);
        trip.token = token.to_string();
        trip.saved_at = Utc::now();
        trips.insert(0, trip.clone());
        self.persist(&trips);
        trip
    }

    /// Rename an entry. No-op when the id is absent.
    pub fn rename(&mut self, id: &str, name: &str) {
        let mut trips = self.list();
        if let Some(trip) = trips.iter_mut().find(|t| t.id == id) {
            trip.name = name.to_string();
            self.persist(&trips);
        }
    }

    /// Delete an entry. Clears the active pointer if it referenced it;
    /// no-op when the id is absent.
    pub fn delete(&mut self, id: &str) {
        let mut trips = self.list();
        let before = trips.len();
        trips.retain(|t| t.id != id);
        if trips.len() != before {
            self.persist(&trips);
        }
        if self.active_id().as_deref() == Some(id) {
            self.set_active(None);
        }
    }

    /// Fetch an entry's token and mark it active.
    ///
    /// Returns `None` (a no-op) when the id is absent; the caller keeps
    /// its current session.
    pub fn load(&mut self, id: &str) -> Option<String> {
        let trips = self.list();
        let trip = trips.iter().find(|t| t.id == id)?;
        let token = trip.token.clone();
        self.set_active(Some(id));
        Some(token)
    }

    /// Export the whole list (without the active pointer) as a seed.
    pub fn export_seed(&self) -> Result<String, TokenError> {
        seed::encode_seed(&self.list())
    }

    /// Replace the whole list from a seed.
    ///
    /// Returns the number of entries imported. The active pointer is
    /// cleared unless the entry it references survives the import.
    pub fn import_seed(&mut self, seed_str: &str) -> Result<usize, SeedError> {
        let trips = seed::parse_seed(seed_str)?;
        self.persist(&trips);

        if let Some(active) = self.active_id()
            && !trips.iter().any(|t| t.id == active)
        {
            self.set_active(None);
        }
        Ok(trips.len())
    }

    fn persist(&mut self, trips: &[SavedTrip]) {
        match serde_json::to_string(trips) {
            Ok(json) => self.kv.set(TRIPS_KEY, &json),
            Err(e) => warn!(error = %e, "failed to serialize saved-trip list"),
        }
    }

    fn set_active(&mut self, id: Option<&str>) {
        match id {
            Some(id) => self.kv.set(ACTIVE_KEY, id),
            None => self.kv.remove(ACTIVE_KEY),
        }
    }
}
