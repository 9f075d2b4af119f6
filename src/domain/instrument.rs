//! Instrument classification tags.

use std::fmt;
use std::str::FromStr;

/// The closed set of instrument kinds a position can hold.
///
/// The kind is a classification label and part of a position's identity;
/// valuation arithmetic is identical across kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstrumentKind {
    Cash,
    Bond,
    Stock,
}

impl fmt::Display for InstrumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstrumentKind::Cash => write!(f, "CASH"),
            InstrumentKind::Bond => write!(f, "BOND"),
            InstrumentKind::Stock => write!(f, "STOCK"),
        }
    }
}

impl FromStr for InstrumentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "CASH" => Ok(InstrumentKind::Cash),
            "BOND" => Ok(InstrumentKind::Bond),
            "STOCK" => Ok(InstrumentKind::Stock),
            other => Err(format!("unknown instrument kind: {other}")),
        }
    }
}
