//! Destination (one stay) and its identifier.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use super::TransportMode;

/// Opaque, stable identifier for a destination.
///
/// The id is the join key between the model and anything derived from it.
/// It is assigned at creation and never reused after deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DestinationId(Uuid);

impl DestinationId {
    /// Generate a fresh id.
    pub fn new() -> Self {
        DestinationId(Uuid::new_v4())
    }

    /// Parse an id from its string form.
    pub fn parse(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(DestinationId)
    }
}

impl Default for DestinationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DestinationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One stay in the itinerary.
///
/// The leg fields (`transport`, `transport_cost`, times, offset, flight
/// number) describe the leg *departing* this destination. The last entry in
/// an itinerary carries them too; they are semantically inert there but are
/// kept, not deleted, so reordering never loses data.
///
/// Wire names match the historical JSON shape (camelCase, long names).
/// Decoding is deliberately forgiving: costs arrive as numbers or numeric
/// strings, empty strings mean "unset", and an unknown transport mode falls
/// back to the default instead of poisoning the whole document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: DestinationId,

    /// Free-text place name.
    #[serde(default)]
    pub name: String,

    /// Length of stay in whole days, always >= 1.
    #[serde(default = "default_days", deserialize_with = "lenient_days")]
    pub days: u32,

    /// Accommodation cost for the stay, unset when unknown.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_cost"
    )]
    pub accommodation_cost: Option<f64>,

    /// Mode of the departing leg.
    #[serde(default, deserialize_with = "lenient_transport")]
    pub transport: TransportMode,

    /// Cost of the departing leg, unset when unknown.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_cost"
    )]
    pub transport_cost: Option<f64>,

    /// Local time-of-day of departure, free-standing (not tied to a date).
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "empty_as_none"
    )]
    pub departure_time: Option<String>,

    /// Local time-of-day of arrival at the next stay.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "empty_as_none"
    )]
    pub arrival_time: Option<String>,

    /// Extra whole days consumed by transit before the next stay begins.
    #[serde(default, deserialize_with = "lenient_offset")]
    pub arrival_day_offset: u32,

    /// Flight number of the departing leg, validated only at search time.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "empty_as_none"
    )]
    pub flight_number: Option<String>,
}

impl Destination {
    /// Create a destination with default leg values: one day, costs unset,
    /// plane, no transit offset.
    pub fn new(name: impl Into<String>) -> Self {
        Destination {
            id: DestinationId::new(),
            name: name.into(),
            days: 1,
            accommodation_cost: None,
            transport: TransportMode::default(),
            transport_cost: None,
            departure_time: None,
            arrival_time: None,
            arrival_day_offset: 0,
            flight_number: None,
        }
    }
}

fn default_days() -> u32 {
    1
}

/// Clamp a day count into `1..=u32::MAX`; numeric strings are accepted.
/// max/min rather than clamp so a NaN from a junk string hits the floor.
fn lenient_days<'de, D: Deserializer<'de>>(de: D) -> Result<u32, D::Error> {
    let raw = LenientNumber::deserialize(de)?;
    Ok(raw
        .as_f64()
        .map_or(1, |v| v.max(1.0).min(u32::MAX as f64) as u32))
}

/// Clamp a transit offset into `0..=u32::MAX`; numeric strings are accepted.
fn lenient_offset<'de, D: Deserializer<'de>>(de: D) -> Result<u32, D::Error> {
    let raw = LenientNumber::deserialize(de)?;
    Ok(raw
        .as_f64()
        .map_or(0, |v| v.max(0.0).min(u32::MAX as f64) as u32))
}

/// Costs arrive as numbers, numeric strings, empty strings, or null.
/// Anything non-numeric means "unset"; negatives clamp to zero.
fn lenient_cost<'de, D: Deserializer<'de>>(de: D) -> Result<Option<f64>, D::Error> {
    let raw = LenientNumber::deserialize(de)?;
    Ok(raw.as_f64().map(|v| v.max(0.0)))
}

/// Treat empty or whitespace-only strings as absent.
fn empty_as_none<'de, D: Deserializer<'de>>(de: D) -> Result<Option<String>, D::Error> {
    let raw = Option::<String>::deserialize(de)?;
    Ok(raw.filter(|s| !s.trim().is_empty()))
}

/// Ids from foreign documents may not be UUIDs; assign a fresh one rather
/// than failing the whole decode. Ids we wrote always parse back.
fn lenient_id<'de, D: Deserializer<'de>>(de: D) -> Result<DestinationId, D::Error> {
    let raw = Option::<serde_json::Value>::deserialize(de)?;
    Ok(raw
        .as_ref()
        .and_then(|v| v.as_str())
        .and_then(DestinationId::parse)
        .unwrap_or_default())
}

/// Unknown transport modes fall back to the default rather than failing
/// the surrounding document.
fn lenient_transport<'de, D: Deserializer<'de>>(de: D) -> Result<TransportMode, D::Error> {
    let raw = Option::<String>::deserialize(de)?;
    Ok(raw
        .as_deref()
        .and_then(TransportMode::parse)
        .unwrap_or_default())
}

/// A JSON value that may be a number, a numeric string, or nothing.
#[derive(Deserialize)]
#[serde(untagged)]
enum LenientNumber {
    Num(f64),
    Text(String),
    Null(Option<()>),
}

impl LenientNumber {
    fn as_f64(&self) -> Option<f64> {
        match self {
            LenientNumber::Num(v) => Some(*v),
            LenientNumber::Text(s) => s.trim().parse::<f64>().ok(),
            LenientNumber::Null(_) => None,
        }
    }
}
