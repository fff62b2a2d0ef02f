//! Flight number (flight identity) type.

use std::fmt;

/// A validated flight number.
///
/// Commercial flight numbers follow the format: 2–3 letter airline code
/// followed by digits (e.g. "IB2601", "EZY482"). The model stores the raw
/// string the user typed; this type is only applied at search/export time,
/// which is the one place the format matters.
///
/// `FlightNumber::parse` returns `None` for anything else rather than an
/// error: a half-typed flight number is not invalid state, just not yet
/// searchable.
///
/// # Examples
///
/// ```
/// use trip_server::domain::FlightNumber;
///
/// let f = FlightNumber::parse("ib2601").unwrap();
/// assert_eq!(f.airline(), "IB");
/// assert_eq!(f.number(), "2601");
/// assert_eq!(f.as_str(), "IB2601");
///
/// assert!(FlightNumber::parse("2601").is_none());
/// assert!(FlightNumber::parse("IBER").is_none());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct FlightNumber {
    raw: String,
    // Byte index where the digits start (2 or 3).
    split: usize,
}

impl FlightNumber {
    /// Parse a flight number from a string.
    ///
    /// Input is trimmed and uppercased. Accepts 2–3 ASCII letters followed
    /// by one or more ASCII digits; returns `None` otherwise.
    pub fn parse(s: &str) -> Option<Self> {
        let raw = s.trim().to_ascii_uppercase();
        let bytes = raw.as_bytes();

        let split = bytes.iter().take_while(|b| b.is_ascii_uppercase()).count();
        if !(2..=3).contains(&split) {
            return None;
        }

        let digits = &bytes[split..];
        if digits.is_empty() || !digits.iter().all(|b| b.is_ascii_digit()) {
            return None;
        }

        Some(FlightNumber { raw, split })
    }

    /// Returns the normalized flight number (uppercase, trimmed).
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the airline designator (the leading letters).
    pub fn airline(&self) -> &str {
        &self.raw[..self.split]
    }

    /// Returns the numeric part (the trailing digits).
    pub fn number(&self) -> &str {
        &self.raw[self.split..]
    }
}

impl fmt::Debug for FlightNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FlightNumber({})", self.raw)
    }
}

impl fmt::Display for FlightNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for valid flight numbers: 2-3 letters then 1-4 digits.
    fn valid_flight_string() -> impl Strategy<Value = String> {
        ("[A-Z]{2,3}", "[0-9]{1,4}").prop_map(|(code, num)| format!("{code}{num}"))
    }

    proptest! {
        /// Roundtrip: parse then as_str returns the input (already uppercase).
        #[test]
        fn roundtrip(s in valid_flight_string()) {
            let f = FlightNumber::parse(&s).unwrap();
            prop_assert_eq!(f.as_str(), s.as_str());
        }

        /// airline + number reassemble to the full string.
        #[test]
        fn split_reassembles(s in valid_flight_string()) {
            let f = FlightNumber::parse(&s).unwrap();
            prop_assert_eq!(format!("{}{}", f.airline(), f.number()), s);
        }

        /// Lowercase input parses to the uppercase form.
        #[test]
        fn lowercase_normalized(s in valid_flight_string()) {
            let f = FlightNumber::parse(&s.to_ascii_lowercase()).unwrap();
            prop_assert_eq!(f.as_str(), s.as_str());
        }

        /// Digit-only strings never parse.
        #[test]
        fn digits_only_rejected(s in "[0-9]{1,8}") {
            prop_assert!(FlightNumber::parse(&s).is_none());
        }

        /// Letter-only strings never parse.
        #[test]
        fn letters_only_rejected(s in "[A-Z]{1,8}") {
            prop_assert!(FlightNumber::parse(&s).is_none());
        }
    }
}
