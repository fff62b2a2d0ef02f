//! The wire representation of itinerary state.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{Currency, Destination};

/// A decoded (or to-be-encoded) snapshot of trip state.
///
/// Every field is optional: a decoded token overwrites only what it carries,
/// leaving the rest of the session untouched. Tokens produced by
/// [`TripState::snapshot`] always carry everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripState {
    pub start_date: Option<NaiveDate>,
    pub total_days: Option<u32>,
    /// Already resolved: an unknown code on the wire becomes the default
    /// currency, never a decode failure.
    pub currency: Option<Currency>,
    pub destinations: Option<Vec<Destination>>,
}

impl TripState {
    /// A full snapshot, as written into share tokens and exports.
    pub fn snapshot(
        start_date: NaiveDate,
        total_days: u32,
        currency: Currency,
        destinations: Vec<Destination>,
    ) -> Self {
        TripState {
            start_date: Some(start_date),
            total_days: Some(total_days),
            currency: Some(currency),
            destinations: Some(destinations),
        }
    }

    /// Whether the state carries anything worth loading.
    ///
    /// Mirrors the historical import check: at least one of
    /// `destinations`/`d`/`s`/`t` must be present, otherwise the document
    /// is reported as invalid rather than silently loading nothing.
    pub fn is_meaningful(&self) -> bool {
        self.start_date.is_some() || self.total_days.is_some() || self.destinations.is_some()
    }
}

/// Compact wire form: short keys, written by the current format.
#[derive(Serialize)]
struct ShortKeys<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    s: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    t: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    c: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    d: Option<&'a [Destination]>,
}

/// Long-key wire form, used by the pretty-printed document export.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LongKeys<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    total_days: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    currency_code: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    destinations: Option<&'a [Destination]>,
}

/// Both key generations, as they may appear on decode. Short keys win when
/// a document carries both.
#[derive(Deserialize)]
struct RawState {
    #[serde(default)]
    s: Option<serde_json::Value>,
    #[serde(default, rename = "startDate")]
    start_date: Option<serde_json::Value>,
    #[serde(default)]
    t: Option<serde_json::Value>,
    #[serde(default, rename = "totalDays")]
    total_days: Option<serde_json::Value>,
    #[serde(default)]
    c: Option<String>,
    #[serde(default, rename = "currencyCode")]
    currency_code: Option<String>,
    #[serde(default)]
    d: Option<Vec<Destination>>,
    #[serde(default)]
    destinations: Option<Vec<Destination>>,
}

impl TripState {
    /// Serialize to the compact short-key JSON carried inside tokens.
    pub(crate) fn to_short_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(&ShortKeys {
            s: self.start_date,
            t: self.total_days,
            c: self.currency.map(|c| c.code()),
            d: self.destinations.as_deref(),
        })
    }

    /// Serialize to the pretty-printed long-key JSON document.
    pub(crate) fn to_long_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&LongKeys {
            start_date: self.start_date,
            total_days: self.total_days,
            currency_code: self.currency.map(|c| c.code()),
            destinations: self.destinations.as_deref(),
        })
    }

    /// Deserialize from JSON in either key generation.
    pub(crate) fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        let raw: RawState = serde_json::from_slice(bytes)?;
        Ok(TripState::from(raw))
    }
}

impl From<RawState> for TripState {
    fn from(raw: RawState) -> Self {
        let start_date = raw
            .s
            .or(raw.start_date)
            .as_ref()
            .and_then(|v| v.as_str())
            .and_then(|s| s.trim().parse::<NaiveDate>().ok());

        let total_days = raw
            .t
            .or(raw.total_days)
            .as_ref()
            .and_then(value_as_days)
            .map(|v| v.max(1));

        // An unknown currency is substituted with the default, not an error.
        let currency = raw
            .c
            .or(raw.currency_code)
            .map(|code| Currency::from_code_or_default(&code));

        let destinations = raw.d.or(raw.destinations);

        TripState {
            start_date,
            total_days,
            currency,
            destinations,
        }
    }
}

/// Day budgets arrive as numbers or numeric strings.
fn value_as_days(v: &serde_json::Value) -> Option<u32> {
    match v {
        serde_json::Value::Number(n) => n.as_f64().map(|f| f as u32),
        serde_json::Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    }
}
