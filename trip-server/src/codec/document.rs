//! Human-readable trip document export and import.
//!
//! The exported file is pretty-printed JSON under the long field names
//! (`startDate`, `totalDays`, `currencyCode`, `destinations`), named after
//! the trip's start date. Import accepts the same shape check as URL
//! decode: a document must carry at least one recognisable state field.

use chrono::NaiveDate;

use super::{TokenError, TripState};

/// Render a state snapshot as a pretty-printed document.
pub fn to_document(state: &TripState) -> Result<String, TokenError> {
    Ok(state.to_long_json_pretty()?)
}

/// File name for an exported document, e.g. `trip-2024-03-01.json`.
pub fn document_file_name(start_date: NaiveDate) -> String {
    format!("trip-{start_date}.json")
}

/// Parse an imported document.
///
/// Returns `None` for invalid JSON or for JSON that carries none of the
/// recognised state fields; the caller reports "invalid document" and keeps
/// its current state.
pub fn from_document(text: &str) -> Option<TripState> {
    let state = TripState::from_json(text.as_bytes()).ok()?;
    state.is_meaningful().then_some(state)
}
