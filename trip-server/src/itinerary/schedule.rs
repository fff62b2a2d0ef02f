//! Schedule derivation: relative stay/transit durations to absolute dates.

use chrono::{Days, NaiveDate};

use crate::domain::Destination;

/// The absolute dates of one stay, half-open: the traveller is present on
/// `start` and leaves on `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaySpan {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl StaySpan {
    /// Number of nights covered by the span.
    pub fn nights(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

/// Derive absolute `[start, end)` dates for each destination.
///
/// A pure function of the start date and the ordered list of
/// `{days, arrival_day_offset}`: the first stay starts on `start_date`,
/// each stay ends `days` later, and each subsequent stay starts at the
/// previous stay's end plus the previous destination's transit offset.
/// Dates are calendar-day granular with no time zone involved, so the walk
/// is immune to daylight-saving drift, and the derivation is idempotent.
///
/// An empty itinerary yields an empty schedule.
pub fn derive(start_date: NaiveDate, destinations: &[Destination]) -> Vec<StaySpan> {
    let mut spans = Vec::with_capacity(destinations.len());
    let mut current = start_date;

    for dest in destinations {
        let end = current + Days::new(u64::from(dest.days));
        spans.push(StaySpan {
            start: current,
            end,
        });
        current = end + Days::new(u64::from(dest.arrival_day_offset));
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dest(days: u32, offset: u32) -> Destination {
        let mut d = Destination::new("stop");
        d.days = days;
        d.arrival_day_offset = offset;
        d
    }

    #[test]
    fn empty_itinerary_yields_no_spans() {
        assert!(derive(date(2024, 3, 1), &[]).is_empty());
    }

    #[test]
    fn first_stay_starts_on_start_date() {
        let spans = derive(date(2024, 3, 1), &[dest(3, 0)]);
        assert_eq!(spans[0].start, date(2024, 3, 1));
        assert_eq!(spans[0].end, date(2024, 3, 4));
    }

    #[test]
    fn transit_offset_delays_next_stay() {
        // 3 days, then an overnight leg (offset 1), then 2 days
        let spans = derive(date(2024, 3, 1), &[dest(3, 1), dest(2, 0)]);
        assert_eq!(spans[0].start, date(2024, 3, 1));
        assert_eq!(spans[0].end, date(2024, 3, 4));
        assert_eq!(spans[1].start, date(2024, 3, 5));
        assert_eq!(spans[1].end, date(2024, 3, 7));
    }

    #[test]
    fn zero_offset_chains_back_to_back() {
        let spans = derive(date(2024, 3, 1), &[dest(2, 0), dest(4, 0), dest(1, 0)]);
        assert_eq!(spans[0].end, spans[1].start);
        assert_eq!(spans[1].end, spans[2].start);
    }

    #[test]
    fn spans_cross_month_boundaries() {
        let spans = derive(date(2024, 1, 30), &[dest(5, 0)]);
        assert_eq!(spans[0].end, date(2024, 2, 4));
    }

    #[test]
    fn derivation_is_idempotent() {
        let list = [dest(3, 1), dest(2, 2), dest(7, 0)];
        let a = derive(date(2024, 6, 10), &list);
        let b = derive(date(2024, 6, 10), &list);
        assert_eq!(a, b);
    }

    #[test]
    fn nights_equals_days() {
        let spans = derive(date(2024, 3, 1), &[dest(3, 0)]);
        assert_eq!(spans[0].nights(), 3);
    }
}
