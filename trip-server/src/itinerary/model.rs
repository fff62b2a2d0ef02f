//! The itinerary model: trip-level settings and the ordered destination list.
//!
//! This is the single mutable source of truth for a planning session.
//! Every mutation is synchronous, leaves the structure valid, and treats
//! missing-id lookups as no-ops (the caller may race with a delete).

use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use crate::domain::{Currency, Destination, DestinationId, FlightNumber, TransportMode};

/// Trip-level configuration.
///
/// Always exists; reset replaces the values in place rather than destroying
/// the object.
#[derive(Debug, Clone, PartialEq)]
pub struct TripSettings {
    /// First day of the trip (calendar date, no time component).
    pub start_date: NaiveDate,

    /// The user's target trip length in days.
    pub total_days_budget: u32,

    /// Currency for all costs; the symbol is derived from the code.
    pub currency: Currency,
}

impl Default for TripSettings {
    fn default() -> Self {
        TripSettings {
            start_date: Utc::now().date_naive(),
            total_days_budget: 14,
            currency: Currency::default(),
        }
    }
}

/// A partial update to the trip settings, raw values as entered.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    pub start_date: Option<String>,
    pub total_days: Option<String>,
    pub currency_code: Option<String>,
}

impl TripSettings {
    /// Apply a patch, normalizing each field. Unparseable values keep the
    /// previous setting; a day budget below 1 clamps to 1; an unknown
    /// currency code keeps the previous currency.
    pub fn apply(&mut self, patch: &SettingsPatch) {
        if let Some(raw) = &patch.start_date
            && let Ok(date) = raw.trim().parse::<NaiveDate>()
        {
            self.start_date = date;
        }
        if let Some(raw) = &patch.total_days {
            self.total_days_budget = normalize_days(raw, self.total_days_budget);
        }
        if let Some(raw) = &patch.currency_code
            && let Some(currency) = Currency::from_code(raw)
        {
            self.currency = currency;
        }
    }

    /// Restore the defaults in place.
    pub fn reset(&mut self) {
        *self = TripSettings::default();
    }
}

/// A partial update to one destination, raw values as entered.
///
/// Field writes are total replacements. Every field goes through the same
/// normalizer on every entry point: day counts clamp to >= 1, costs clamp
/// to >= 0 (non-numeric means unset), empty strings mean unset.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationPatch {
    pub name: Option<String>,
    pub days: Option<String>,
    pub accommodation_cost: Option<String>,
    pub transport: Option<String>,
    pub transport_cost: Option<String>,
    pub departure_time: Option<String>,
    pub arrival_time: Option<String>,
    pub arrival_day_offset: Option<String>,
    pub flight_number: Option<String>,
}

/// Clamp a raw day count into `1..=u32::MAX`, falling back on parse failure.
fn normalize_days(raw: &str, fallback: u32) -> u32 {
    match raw.trim().parse::<i64>() {
        Ok(v) => v.clamp(1, i64::from(u32::MAX)) as u32,
        Err(_) => fallback.max(1),
    }
}

/// Parse a raw cost; non-numeric or empty means unset, negatives clamp to 0.
fn normalize_cost(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().map(|v| v.max(0.0))
}

/// Clamp a raw transit offset into `0..=u32::MAX`, falling back on parse
/// failure.
fn normalize_offset(raw: &str, fallback: u32) -> u32 {
    match raw.trim().parse::<i64>() {
        Ok(v) => v.clamp(0, i64::from(u32::MAX)) as u32,
        Err(_) => fallback,
    }
}

/// Empty or whitespace-only raw text means unset.
fn normalize_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// The ordered sequence of destinations. Order is the travel order and is
/// the unit of reordering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Itinerary {
    destinations: Vec<Destination>,
}

impl Itinerary {
    /// Create an empty itinerary.
    pub fn new() -> Self {
        Itinerary::default()
    }

    /// Build an itinerary from an already-validated destination list
    /// (decoded state load).
    pub fn from_destinations(destinations: Vec<Destination>) -> Self {
        Itinerary { destinations }
    }

    /// Append a destination with defaults and return its id.
    pub fn add(&mut self, name: impl Into<String>) -> DestinationId {
        let dest = Destination::new(name);
        let id = dest.id;
        self.destinations.push(dest);
        id
    }

    /// Remove a destination by id. No-op when the id is absent.
    pub fn remove(&mut self, id: DestinationId) {
        self.destinations.retain(|d| d.id != id);
    }

    /// Move the entry at `from` to position `to`, preserving the relative
    /// order of everything else. Out-of-range indices clamp to the ends.
    pub fn move_item(&mut self, from: usize, to: usize) {
        if self.destinations.is_empty() {
            return;
        }
        let last = self.destinations.len() - 1;
        let from = from.min(last);
        let to = to.min(last);
        if from == to {
            return;
        }
        let dest = self.destinations.remove(from);
        self.destinations.insert(to, dest);
    }

    /// Apply a patch to the destination with the given id.
    ///
    /// Returns `false` (a silent no-op) when the id is absent.
    pub fn apply(&mut self, id: DestinationId, patch: &DestinationPatch) -> bool {
        let Some(dest) = self.destinations.iter_mut().find(|d| d.id == id) else {
            return false;
        };

        if let Some(raw) = &patch.name {
            dest.name = raw.clone();
        }
        if let Some(raw) = &patch.days {
            dest.days = normalize_days(raw, dest.days);
        }
        if let Some(raw) = &patch.accommodation_cost {
            dest.accommodation_cost = normalize_cost(raw);
        }
        if let Some(raw) = &patch.transport
            && let Some(mode) = TransportMode::parse(raw.trim())
        {
            dest.transport = mode;
        }
        if let Some(raw) = &patch.transport_cost {
            dest.transport_cost = normalize_cost(raw);
        }
        if let Some(raw) = &patch.departure_time {
            dest.departure_time = normalize_text(raw);
        }
        if let Some(raw) = &patch.arrival_time {
            dest.arrival_time = normalize_text(raw);
        }
        if let Some(raw) = &patch.arrival_day_offset {
            dest.arrival_day_offset = normalize_offset(raw, dest.arrival_day_offset);
        }
        if let Some(raw) = &patch.flight_number {
            // Well-formed flight numbers get their canonical (uppercased)
            // form; anything else is kept as entered.
            dest.flight_number = match FlightNumber::parse(raw) {
                Some(flight) => Some(flight.as_str().to_string()),
                None => normalize_text(raw),
            };
        }
        true
    }

    /// Look up a destination by id.
    pub fn get(&self, id: DestinationId) -> Option<&Destination> {
        self.destinations.iter().find(|d| d.id == id)
    }

    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    /// Mutable access for whole-list operations (autofill).
    pub(crate) fn destinations_mut(&mut self) -> &mut [Destination] {
        &mut self.destinations
    }

    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patch(f: impl FnOnce(&mut DestinationPatch)) -> DestinationPatch {
        let mut p = DestinationPatch::default();
        f(&mut p);
        p
    }

    #[test]
    fn settings_defaults() {
        let s = TripSettings::default();
        assert_eq!(s.total_days_budget, 14);
        assert_eq!(s.currency.code(), "USD");
    }

    #[test]
    fn settings_patch_normalizes() {
        let mut s = TripSettings::default();
        s.apply(&SettingsPatch {
            start_date: Some("2024-03-01".into()),
            total_days: Some("0".into()),
            currency_code: Some("EUR".into()),
        });
        assert_eq!(s.start_date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(s.total_days_budget, 1); // clamped up from 0
        assert_eq!(s.currency.code(), "EUR");
    }

    #[test]
    fn settings_patch_keeps_previous_on_garbage() {
        let mut s = TripSettings::default();
        let before = s.clone();
        s.apply(&SettingsPatch {
            start_date: Some("yesterday".into()),
            total_days: Some("a lot".into()),
            currency_code: Some("DBL".into()),
        });
        assert_eq!(s, before);
    }

    #[test]
    fn add_appends_in_order() {
        let mut it = Itinerary::new();
        it.add("Lisbon");
        it.add("Porto");
        let names: Vec<_> = it.destinations().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["Lisbon", "Porto"]);
    }

    #[test]
    fn remove_missing_id_is_noop() {
        let mut it = Itinerary::new();
        it.add("Lisbon");
        it.remove(DestinationId::new());
        assert_eq!(it.len(), 1);
    }

    #[test]
    fn remove_by_id() {
        let mut it = Itinerary::new();
        let id = it.add("Lisbon");
        it.add("Porto");
        it.remove(id);
        assert_eq!(it.len(), 1);
        assert_eq!(it.destinations()[0].name, "Porto");
    }

    #[test]
    fn move_item_is_stable() {
        let mut it = Itinerary::new();
        it.add("A");
        it.add("B");
        it.add("C");
        it.add("D");
        it.move_item(0, 2);
        let names: Vec<_> = it.destinations().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["B", "C", "A", "D"]);
    }

    #[test]
    fn move_item_clamps_out_of_range() {
        let mut it = Itinerary::new();
        it.add("A");
        it.add("B");
        it.move_item(7, 0);
        let names: Vec<_> = it.destinations().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["B", "A"]);
    }

    #[test]
    fn move_item_on_empty_is_noop() {
        let mut it = Itinerary::new();
        it.move_item(0, 3);
        assert!(it.is_empty());
    }

    #[test]
    fn patch_days_clamps_to_one() {
        let mut it = Itinerary::new();
        let id = it.add("Rome");
        it.apply(id, &patch(|p| p.days = Some("-5".into())));
        assert_eq!(it.get(id).unwrap().days, 1);
    }

    #[test]
    fn patch_oversized_counts_saturate() {
        let mut it = Itinerary::new();
        let id = it.add("Rome");
        it.apply(id, &patch(|p| p.days = Some("4294967296".into())));
        assert_eq!(it.get(id).unwrap().days, u32::MAX);
        it.apply(id, &patch(|p| p.arrival_day_offset = Some("4294967296".into())));
        assert_eq!(it.get(id).unwrap().arrival_day_offset, u32::MAX);
    }

    #[test]
    fn patch_non_numeric_days_keeps_previous() {
        let mut it = Itinerary::new();
        let id = it.add("Rome");
        it.apply(id, &patch(|p| p.days = Some("4".into())));
        it.apply(id, &patch(|p| p.days = Some("many".into())));
        assert_eq!(it.get(id).unwrap().days, 4);
    }

    #[test]
    fn patch_cost_normalization() {
        let mut it = Itinerary::new();
        let id = it.add("Rome");
        it.apply(id, &patch(|p| p.accommodation_cost = Some("120.5".into())));
        assert_eq!(it.get(id).unwrap().accommodation_cost, Some(120.5));

        it.apply(id, &patch(|p| p.accommodation_cost = Some("-3".into())));
        assert_eq!(it.get(id).unwrap().accommodation_cost, Some(0.0));

        it.apply(id, &patch(|p| p.accommodation_cost = Some("".into())));
        assert_eq!(it.get(id).unwrap().accommodation_cost, None);
    }

    #[test]
    fn patch_unknown_transport_keeps_previous() {
        let mut it = Itinerary::new();
        let id = it.add("Rome");
        it.apply(id, &patch(|p| p.transport = Some("train".into())));
        it.apply(id, &patch(|p| p.transport = Some("zeppelin".into())));
        assert_eq!(it.get(id).unwrap().transport, TransportMode::Train);
    }

    #[test]
    fn patch_offset_clamps_to_zero() {
        let mut it = Itinerary::new();
        let id = it.add("Rome");
        it.apply(id, &patch(|p| p.arrival_day_offset = Some("-2".into())));
        assert_eq!(it.get(id).unwrap().arrival_day_offset, 0);
        it.apply(id, &patch(|p| p.arrival_day_offset = Some("1".into())));
        assert_eq!(it.get(id).unwrap().arrival_day_offset, 1);
    }

    #[test]
    fn patch_non_numeric_offset_keeps_previous() {
        let mut it = Itinerary::new();
        let id = it.add("Rome");
        it.apply(id, &patch(|p| p.arrival_day_offset = Some("2".into())));
        it.apply(id, &patch(|p| p.arrival_day_offset = Some("soon".into())));
        assert_eq!(it.get(id).unwrap().arrival_day_offset, 2);
    }

    #[test]
    fn patch_missing_id_is_noop() {
        let mut it = Itinerary::new();
        it.add("Rome");
        let before = it.clone();
        let applied = it.apply(DestinationId::new(), &patch(|p| p.name = Some("X".into())));
        assert!(!applied);
        assert_eq!(it, before);
    }

    #[test]
    fn patch_flight_number_canonicalizes() {
        let mut it = Itinerary::new();
        let id = it.add("Rome");
        it.apply(id, &patch(|p| p.flight_number = Some(" ba123 ".into())));
        assert_eq!(it.get(id).unwrap().flight_number.as_deref(), Some("BA123"));

        // free text that is not a flight number is kept as entered
        it.apply(id, &patch(|p| p.flight_number = Some("charter".into())));
        assert_eq!(
            it.get(id).unwrap().flight_number.as_deref(),
            Some("charter")
        );
    }

    #[test]
    fn patch_empty_time_clears() {
        let mut it = Itinerary::new();
        let id = it.add("Rome");
        it.apply(id, &patch(|p| p.departure_time = Some("08:30".into())));
        assert_eq!(it.get(id).unwrap().departure_time.as_deref(), Some("08:30"));
        it.apply(id, &patch(|p| p.departure_time = Some("  ".into())));
        assert_eq!(it.get(id).unwrap().departure_time, None);
    }
}
