//! Transport mode for the leg departing a destination.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How the traveller leaves a destination for the next one.
///
/// The mode describes the leg *departing* a destination; the last entry in
/// an itinerary carries one but it is semantically unused (no leg departs
/// from the final stay).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    #[default]
    Plane,
    Train,
    Bus,
    Car,
}

impl TransportMode {
    /// Parse a mode from its lowercase wire name.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "plane" => Some(TransportMode::Plane),
            "train" => Some(TransportMode::Train),
            "bus" => Some(TransportMode::Bus),
            "car" => Some(TransportMode::Car),
            _ => None,
        }
    }

    /// Returns the lowercase wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Plane => "plane",
            TransportMode::Train => "train",
            TransportMode::Bus => "bus",
            TransportMode::Car => "car",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
