//! iCalendar export of the itinerary.
//!
//! One date-only VEVENT per stay, using the derived schedule so event dates
//! match what the rest of the engine reports (including transit offsets
//! between stays).

use chrono::NaiveDate;

use crate::domain::Destination;
use crate::itinerary::{self, TripSettings};

#[derive(Debug, thiserror::Error)]
pub enum CalendarError {
    #[error("no destinations to export")]
    Empty,
}

/// Render the itinerary as an iCalendar document.
pub fn to_ics(settings: &TripSettings, destinations: &[Destination]) -> Result<String, CalendarError> {
    if destinations.is_empty() {
        return Err(CalendarError::Empty);
    }

    let spans = itinerary::derive(settings.start_date, destinations);
    let symbol = settings.currency.symbol();

    let mut lines = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        "PRODID:-//TripPlan//EN".to_string(),
        "CALSCALE:GREGORIAN".to_string(),
    ];

    for (idx, (dest, span)) in destinations.iter().zip(&spans).enumerate() {
        let mut desc = format!("Stay: {} days.", dest.days);
        if let Some(cost) = dest.accommodation_cost.filter(|c| *c > 0.0) {
            desc.push_str(&format!("\\nHotel: {symbol}{}", round_cost(cost)));
        }

        // Leg details belong to the departure from this stay, so the last
        // stay carries none.
        if idx < destinations.len() - 1 {
            if let Some(cost) = dest.transport_cost.filter(|c| *c > 0.0) {
                desc.push_str(&format!(
                    "\\nTransport: {} ({symbol}{})",
                    dest.transport.as_str(),
                    round_cost(cost)
                ));
            }
            if let Some(time) = &dest.departure_time {
                desc.push_str(&format!("\\nDeparture Time: {time}"));
            }
            if let Some(time) = &dest.arrival_time {
                desc.push_str(&format!("\\nArrival Time: {time}"));
            }
            if let Some(flight) = &dest.flight_number {
                desc.push_str(&format!("\\nFlight No: {flight}"));
            }
            if dest.arrival_day_offset > 0 {
                desc.push_str(&format!("\\nTransit: {} day(s)", dest.arrival_day_offset));
            }
        }

        lines.push("BEGIN:VEVENT".to_string());
        lines.push(format!("DTSTART;VALUE=DATE:{}", ics_date(span.start)));
        lines.push(format!("DTEND;VALUE=DATE:{}", ics_date(span.end)));
        lines.push(format!("SUMMARY:Trip to {}", escape_text(&dest.name)));
        lines.push(format!("DESCRIPTION:{}", escape_text(&desc)));
        lines.push("END:VEVENT".to_string());
    }

    lines.push("END:VCALENDAR".to_string());
    Ok(lines.join("\r\n"))
}

fn ics_date(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

fn round_cost(cost: f64) -> i64 {
    cost.round() as i64
}

/// RFC 5545 text escaping. Backslash-n sequences already placed in the
/// description pass through untouched.
fn escape_text(text: &str) -> String {
    text.replace(',', "\\,").replace(';', "\\;")
}
