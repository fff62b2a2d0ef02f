//! Currency type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The currencies the planner knows about, as (code, symbol) pairs.
///
/// The display symbol is always derived from the code; it is never an
/// independent source of truth.
const KNOWN: &[(&str, &str)] = &[
    ("USD", "$"),
    ("EUR", "€"),
    ("GBP", "£"),
    ("JPY", "¥"),
    ("CHF", "CHF"),
    ("AUD", "A$"),
    ("CAD", "C$"),
    ("MXN", "MX$"),
    ("BRL", "R$"),
    ("INR", "₹"),
];

/// A currency known to the planner.
///
/// Holds an ISO-4217-like code; the symbol is looked up from a fixed table.
/// Construction goes through [`Currency::from_code`], so any `Currency`
/// value carries a known code. Unknown codes arriving from a decoded token
/// fall back to the default via [`Currency::from_code_or_default`].
///
/// # Examples
///
/// ```
/// use trip_server::domain::Currency;
///
/// let eur = Currency::from_code("EUR").unwrap();
/// assert_eq!(eur.code(), "EUR");
/// assert_eq!(eur.symbol(), "€");
///
/// // Unknown codes are substituted, never an error
/// assert_eq!(Currency::from_code_or_default("XXX").code(), "USD");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Currency {
    idx: usize,
}

impl Currency {
    /// Look up a currency by code (case-insensitive).
    pub fn from_code(code: &str) -> Option<Self> {
        let upper = code.to_ascii_uppercase();
        KNOWN
            .iter()
            .position(|(c, _)| *c == upper)
            .map(|idx| Currency { idx })
    }

    /// Look up a currency by code, substituting the default for unknown codes.
    pub fn from_code_or_default(code: &str) -> Self {
        Self::from_code(code).unwrap_or_default()
    }

    /// Returns the ISO-4217-like code.
    pub fn code(&self) -> &'static str {
        KNOWN[self.idx].0
    }

    /// Returns the display symbol.
    pub fn symbol(&self) -> &'static str {
        KNOWN[self.idx].1
    }

    /// All known currencies, in table order.
    pub fn all() -> impl Iterator<Item = Currency> {
        (0..KNOWN.len()).map(|idx| Currency { idx })
    }
}

impl Default for Currency {
    fn default() -> Self {
        // USD is the first table entry
        Currency { idx: 0 }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<String> for Currency {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Currency::from_code(&value).ok_or_else(|| format!("unknown currency code: {value}"))
    }
}

impl From<Currency> for String {
    fn from(value: Currency) -> Self {
        value.code().to_string()
    }
}
