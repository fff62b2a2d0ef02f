//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::Destination;
use crate::history::SavedTrip;
use crate::itinerary::{TripSettings, TripSummary};
use crate::places::PlaceDto;
use crate::session::Session;

/// The full itinerary view: destinations with their derived dates, the
/// trip settings, aggregate totals, and the current share token.
#[derive(Debug, Serialize)]
pub struct ItineraryView {
    pub settings: SettingsView,
    pub destinations: Vec<DestinationView>,
    pub summary: TripSummary,
    /// Current v2 share token; absent only if encoding failed.
    pub share_token: Option<String>,
}

impl ItineraryView {
    pub fn from_session(session: &Session) -> Self {
        let spans = session.schedule();
        let destinations = session
            .itinerary
            .destinations()
            .iter()
            .zip(&spans)
            .map(|(dest, span)| DestinationView {
                destination: dest.clone(),
                start_date: span.start.to_string(),
                end_date: span.end.to_string(),
                nights: span.nights(),
            })
            .collect();

        ItineraryView {
            settings: SettingsView::from_settings(&session.settings),
            destinations,
            summary: session.summary(),
            share_token: session.share_token().ok(),
        }
    }
}

/// One destination plus its derived stay dates.
#[derive(Debug, Serialize)]
pub struct DestinationView {
    #[serde(flatten)]
    pub destination: Destination,

    /// First day of the stay (ISO date)
    pub start_date: String,

    /// Day after the last day of the stay (ISO date, exclusive)
    pub end_date: String,

    pub nights: i64,
}

/// Trip-level settings as shown to the client.
#[derive(Debug, Serialize)]
pub struct SettingsView {
    pub start_date: String,
    pub total_days: u32,
    pub currency_code: String,
    pub currency_symbol: String,
}

impl SettingsView {
    pub fn from_settings(settings: &TripSettings) -> Self {
        SettingsView {
            start_date: settings.start_date.to_string(),
            total_days: settings.total_days_budget,
            currency_code: settings.currency.code().to_string(),
            currency_symbol: settings.currency.symbol().to_string(),
        }
    }
}

/// Request to add a destination.
#[derive(Debug, Deserialize)]
pub struct AddDestinationRequest {
    pub name: String,
}

/// Request to move a destination between positions.
#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub from: usize,
    pub to: usize,
}

/// The current share token and the query string embedding it.
#[derive(Debug, Serialize)]
pub struct ShareResponse {
    pub token: String,
    pub query: String,
}

/// Request to load state from a shared link's query string.
#[derive(Debug, Deserialize)]
pub struct LoadRequest {
    /// Raw query string, e.g. `v2=...` or `plan=...`
    pub query: String,
}

/// Whether a load/import replaced the session.
///
/// `loaded: false` is the recoverable-failure shape: the previous session
/// is untouched and the client shows a dismissible notice.
#[derive(Debug, Serialize)]
pub struct LoadResponse {
    pub loaded: bool,
}

/// Request to import an exported document.
#[derive(Debug, Deserialize)]
pub struct ImportRequest {
    /// Raw JSON text of a previously exported file
    pub document: String,
}

/// History list plus the active-trip pointer.
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub trips: Vec<SavedTrip>,
    pub active_id: Option<String>,
}

/// Request to save the current state under a name.
#[derive(Debug, Deserialize)]
pub struct SaveRequest {
    pub name: Option<String>,
}

/// Request to rename a saved trip.
#[derive(Debug, Deserialize)]
pub struct RenameRequest {
    pub name: String,
}

/// Exported history seed.
#[derive(Debug, Serialize)]
pub struct SeedResponse {
    pub seed: String,
}

/// Request to import a history seed.
#[derive(Debug, Deserialize)]
pub struct SeedImportRequest {
    pub seed: String,
}

/// Number of entries a seed import brought in.
#[derive(Debug, Serialize)]
pub struct SeedImportResponse {
    pub imported: usize,
}

/// Request for place suggestions.
#[derive(Debug, Deserialize)]
pub struct PlaceSearchRequest {
    pub q: String,
}

/// Place suggestions. `superseded` means a newer query arrived while this
/// one was pending; the client should ignore the (empty) result.
#[derive(Debug, Serialize)]
pub struct PlaceSearchResponse {
    pub places: Vec<PlaceDto>,
    pub superseded: bool,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
