//! Position value object and cost-basis arithmetic.
//!
//! A `Position` is an immutable holding of one instrument at a unit cost.
//! Combining and splitting return new values; the only pricing-dependent
//! operations take the oracle explicitly, so the arithmetic is testable
//! with a stub oracle and nothing else.

use chrono::NaiveDate;
use std::fmt;

use crate::domain::currency::Currency;
use crate::domain::error::FolioError;
use crate::domain::instrument::InstrumentKind;
use crate::ports::pricing_port::PricingPort;

#[derive(Debug, Clone)]
pub struct Position {
    kind: InstrumentKind,
    id: String,
    currency: Currency,
    unit_cost: f64,
    quantity: f64,
    acquired: Option<NaiveDate>,
}

impl Position {
    /// Validating constructor. Quantity and unit cost must be
    /// non-negative; zero is fine for both.
    pub fn new(
        kind: InstrumentKind,
        id: String,
        quantity: f64,
        currency: Currency,
        unit_cost: f64,
        acquired: Option<NaiveDate>,
    ) -> Result<Self, FolioError> {
        if quantity < 0.0 {
            return Err(FolioError::InvalidPosition {
                id,
                reason: "quantity must be non-negative".into(),
            });
        }
        if unit_cost < 0.0 {
            return Err(FolioError::InvalidPosition {
                id,
                reason: "unit cost must be non-negative".into(),
            });
        }
        Ok(Position {
            kind,
            id,
            currency,
            unit_cost,
            quantity,
            acquired,
        })
    }

    pub fn cash(
        id: String,
        quantity: f64,
        currency: Currency,
        unit_cost: f64,
        acquired: Option<NaiveDate>,
    ) -> Result<Self, FolioError> {
        Position::new(InstrumentKind::Cash, id, quantity, currency, unit_cost, acquired)
    }

    pub fn bond(
        id: String,
        quantity: f64,
        currency: Currency,
        unit_cost: f64,
        acquired: Option<NaiveDate>,
    ) -> Result<Self, FolioError> {
        Position::new(InstrumentKind::Bond, id, quantity, currency, unit_cost, acquired)
    }

    pub fn stock(
        id: String,
        quantity: f64,
        currency: Currency,
        unit_cost: f64,
        acquired: Option<NaiveDate>,
    ) -> Result<Self, FolioError> {
        Position::new(InstrumentKind::Stock, id, quantity, currency, unit_cost, acquired)
    }

    pub fn kind(&self) -> InstrumentKind {
        self.kind
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn unit_cost(&self) -> f64 {
        self.unit_cost
    }

    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    pub fn acquired(&self) -> Option<NaiveDate> {
        self.acquired
    }

    fn same_instrument(&self, other: &Position) -> bool {
        self.kind == other.kind && self.id == other.id
    }

    /// Merge another holding of the same instrument into this one.
    ///
    /// The result holds the summed quantity at the weighted-average unit
    /// cost, denominated in self's currency: the other side's purchase
    /// value is converted through the oracle at the other side's own
    /// acquisition date. Currency comes from the left operand, the
    /// acquisition date from the right. A zero total quantity fails
    /// instead of dividing.
    pub fn combine(
        &self,
        other: &Position,
        pricing: &dyn PricingPort,
    ) -> Result<Position, FolioError> {
        if !self.same_instrument(other) {
            return Err(FolioError::mismatch(
                self.kind, &self.id, other.kind, &other.id,
            ));
        }

        let total_quantity = self.quantity + other.quantity;
        let total_cost = self.purchase_value(self.currency, pricing)?
            + other.purchase_value(self.currency, pricing)?;
        if total_quantity == 0.0 {
            return Err(FolioError::DivisionByZero {
                id: self.id.clone(),
            });
        }

        Ok(Position {
            kind: self.kind,
            id: self.id.clone(),
            currency: self.currency,
            unit_cost: total_cost / total_quantity,
            quantity: total_quantity,
            acquired: other.acquired,
        })
    }

    /// Subtract another holding of the same instrument from this one.
    ///
    /// Pure arithmetic: unit cost, currency and acquisition date stay
    /// self's, and the resulting quantity is NOT checked against zero.
    /// The ledger, not the position, enforces "no short positions".
    pub fn split(&self, other: &Position) -> Result<Position, FolioError> {
        if !self.same_instrument(other) {
            return Err(FolioError::mismatch(
                self.kind, &self.id, other.kind, &other.id,
            ));
        }

        Ok(Position {
            kind: self.kind,
            id: self.id.clone(),
            currency: self.currency,
            unit_cost: self.unit_cost,
            quantity: self.quantity - other.quantity,
            acquired: self.acquired,
        })
    }

    /// Quantity times unit cost, converted into `currency` when it
    /// differs from the position's own. Equal currencies never touch
    /// the oracle.
    pub fn purchase_value(
        &self,
        currency: Currency,
        pricing: &dyn PricingPort,
    ) -> Result<f64, FolioError> {
        let value = self.quantity * self.unit_cost;
        if currency == self.currency {
            return Ok(value);
        }
        Ok(pricing.convert_value(value, self.currency, currency, self.acquired)?)
    }

    /// Quantity times the oracle's current sell price in `currency`.
    /// The position's own currency and unit cost play no part here.
    pub fn current_value(
        &self,
        currency: Currency,
        pricing: &dyn PricingPort,
    ) -> Result<f64, FolioError> {
        let price = pricing.sell_price(&self.id, currency, None)?;
        Ok(self.quantity * price)
    }

    /// Unrealized profit: current value minus purchase value, both in
    /// the target currency.
    pub fn profit(
        &self,
        currency: Currency,
        pricing: &dyn PricingPort,
    ) -> Result<f64, FolioError> {
        Ok(self.current_value(currency, pricing)? - self.purchase_value(currency, pricing)?)
    }
}

/// Structural equality over kind, id, currency, unit cost and quantity.
/// The acquisition date is deliberately excluded, which is why this is
/// not derived.
impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.id == other.id
            && self.currency == other.currency
            && self.unit_cost == other.unit_cost
            && self.quantity == other.quantity
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: {} @ {:.3} {}",
            self.kind, self.id, self.quantity, self.unit_cost, self.currency
        )
    }
}
