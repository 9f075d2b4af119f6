#![allow(dead_code)]

use chrono::NaiveDate;
use folio::domain::currency::Currency;
use folio::domain::position::Position;
use folio::domain::transaction::Transaction;
use folio::ports::pricing_port::{PricingError, PricingPort};
use std::cell::Cell;
use std::collections::HashMap;

/// Scripted pricing oracle: one flat conversion rate, per-instrument
/// quotes with optional per-currency fallbacks. Counts `convert_value`
/// calls so tests can assert the oracle was (or was not) consulted.
pub struct MockPricingPort {
    pub rate: Option<f64>,
    pub prices: HashMap<(String, Currency), f64>,
    pub fallback_prices: HashMap<Currency, f64>,
    pub conversions: Cell<usize>,
}

impl MockPricingPort {
    pub fn new() -> Self {
        Self {
            rate: None,
            prices: HashMap::new(),
            fallback_prices: HashMap::new(),
            conversions: Cell::new(0),
        }
    }

    pub fn with_rate(mut self, rate: f64) -> Self {
        self.rate = Some(rate);
        self
    }

    pub fn with_price(mut self, id: &str, currency: Currency, price: f64) -> Self {
        self.prices.insert((id.to_string(), currency), price);
        self
    }

    pub fn with_fallback_price(mut self, currency: Currency, price: f64) -> Self {
        self.fallback_prices.insert(currency, price);
        self
    }

    /// The standing test oracle: conversion at a flat 0.8, cash quoted
    /// at par in its own currency, every other quote 4.5 Euros or
    /// 5.2 Dollars.
    pub fn scenario() -> Self {
        MockPricingPort::new()
            .with_rate(0.8)
            .with_price("DOL", Currency::Dollars, 1.0)
            .with_price("EU", Currency::Euros, 1.0)
            .with_fallback_price(Currency::Euros, 4.5)
            .with_fallback_price(Currency::Dollars, 5.2)
    }
}

impl PricingPort for MockPricingPort {
    fn convert_value(
        &self,
        value: f64,
        from: Currency,
        to: Currency,
        _as_of: Option<NaiveDate>,
    ) -> Result<f64, PricingError> {
        self.conversions.set(self.conversions.get() + 1);
        if from == to {
            return Ok(value);
        }
        match self.rate {
            Some(rate) => Ok(rate * value),
            None => Err(PricingError::MissingRate { from, to }),
        }
    }

    fn sell_price(
        &self,
        instrument_id: &str,
        currency: Currency,
        _as_of: Option<NaiveDate>,
    ) -> Result<f64, PricingError> {
        if let Some(price) = self.prices.get(&(instrument_id.to_string(), currency)) {
            return Ok(*price);
        }
        match self.fallback_prices.get(&currency) {
            Some(price) => Ok(*price),
            None => Err(PricingError::UnknownInstrument {
                id: instrument_id.to_string(),
                currency,
            }),
        }
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn make_cash(id: &str, quantity: f64, currency: Currency, acquired: Option<NaiveDate>) -> Position {
    Position::cash(id.to_string(), quantity, currency, 1.0, acquired).unwrap()
}

pub fn make_bond(
    id: &str,
    quantity: f64,
    currency: Currency,
    unit_cost: f64,
    acquired: Option<NaiveDate>,
) -> Position {
    Position::bond(id.to_string(), quantity, currency, unit_cost, acquired).unwrap()
}

pub fn make_stock(
    id: &str,
    quantity: f64,
    currency: Currency,
    unit_cost: f64,
    acquired: Option<NaiveDate>,
) -> Position {
    Position::stock(id.to_string(), quantity, currency, unit_cost, acquired).unwrap()
}

/// The standing five-transaction history: two cash investments, a bond
/// buy, a stock buy, then a partial bond sale back into cash.
pub fn scenario_transactions() -> Vec<Transaction> {
    vec![
        Transaction::investment(make_cash(
            "DOL",
            1000.0,
            Currency::Dollars,
            Some(date(2020, 1, 1)),
        )),
        Transaction::investment(make_cash(
            "EU",
            1000.0,
            Currency::Euros,
            Some(date(2020, 1, 1)),
        )),
        Transaction::exchange(
            make_bond("BOND1", 50.0, Currency::Dollars, 3.2, Some(date(2020, 2, 14))),
            make_cash("DOL", 160.0, Currency::Dollars, None),
        ),
        Transaction::exchange(
            make_stock("STOCK1", 60.0, Currency::Euros, 2.1, Some(date(2020, 2, 14))),
            make_cash("EU", 126.0, Currency::Euros, None),
        ),
        Transaction::exchange(
            make_cash("DOL", 240.0, Currency::Dollars, Some(date(2020, 3, 15))),
            make_bond("BOND1", 40.0, Currency::Dollars, 0.0, None),
        ),
    ]
}
