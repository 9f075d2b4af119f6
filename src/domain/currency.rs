//! Currency tags.

use std::fmt;
use std::str::FromStr;

/// The closed set of currencies positions can be denominated in.
///
/// Carries no behaviour beyond identity; conversion between currencies
/// lives behind the pricing port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Currency {
    Dollars,
    Euros,
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Currency::Dollars => write!(f, "Dollars"),
            Currency::Euros => write!(f, "Euros"),
        }
    }
}

impl FromStr for Currency {
    type Err = String;

    /// Accepts the long names and the short codes used by the CLI and
    /// history files, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "DOL" | "USD" | "DOLLARS" => Ok(Currency::Dollars),
            "EUR" | "EUROS" => Ok(Currency::Euros),
            other => Err(format!("unknown currency: {other}")),
        }
    }
}
