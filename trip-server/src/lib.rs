//! Multi-city trip planner server.
//!
//! A web application for planning multi-city trips: ordered stays connected
//! by transport legs, with calendar dates and cost totals derived from the
//! itinerary, shareable as a compact token.

pub mod calendar;
pub mod codec;
pub mod domain;
pub mod history;
pub mod itinerary;
pub mod places;
pub mod session;
pub mod web;
