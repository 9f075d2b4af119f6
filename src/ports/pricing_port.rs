//! Pricing oracle port trait.

use crate::domain::currency::Currency;
use chrono::NaiveDate;

/// Errors originating inside a pricing oracle.
///
/// The domain propagates these unchanged; it never remaps an oracle
/// failure into one of its own categories.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PricingError {
    #[error("no sell price for {id} in {currency}")]
    UnknownInstrument { id: String, currency: Currency },

    #[error("no conversion rate from {from} to {to}")]
    MissingRate { from: Currency, to: Currency },

    #[error("unreadable pricing entry {key}: {value}")]
    InvalidEntry { key: String, value: String },
}

/// External pricing system: unit sell prices and currency conversion.
///
/// `as_of` selects a historical quote where the oracle supports one;
/// `None` means the current quote. Implementations decide how much of
/// that history they actually keep.
pub trait PricingPort {
    /// Re-express `value` from one currency in another. Identity when
    /// the currencies are equal.
    fn convert_value(
        &self,
        value: f64,
        from: Currency,
        to: Currency,
        as_of: Option<NaiveDate>,
    ) -> Result<f64, PricingError>;

    /// Unit sell price of an instrument in the given currency.
    fn sell_price(
        &self,
        instrument_id: &str,
        currency: Currency,
        as_of: Option<NaiveDate>,
    ) -> Result<f64, PricingError>;
}
