//! Transaction ledger: id → current position.
//!
//! The ledger is the sole enforcement boundary for "no short positions":
//! a removal is guarded against the held quantity strictly before any
//! split result is stored. Positions are never deleted, only reduced
//! toward zero, and iteration preserves the order in which ids first
//! appeared.

use std::collections::HashMap;

use crate::domain::currency::Currency;
use crate::domain::error::FolioError;
use crate::domain::position::Position;
use crate::domain::transaction::Transaction;
use crate::ports::pricing_port::PricingPort;

#[derive(Debug, Default)]
pub struct Ledger {
    positions: HashMap<String, Position>,
    order: Vec<String>,
}

impl Ledger {
    pub fn new() -> Self {
        Ledger::default()
    }

    /// Apply one transaction: remove the outgoing side (when present),
    /// then merge the incoming side in. The removal guard runs before
    /// anything is stored, so a failed transaction leaves the ledger
    /// exactly as it was; a `None` outgoing models an initial
    /// investment.
    pub fn apply_transaction(
        &mut self,
        incoming: Position,
        outgoing: Option<Position>,
        pricing: &dyn PricingPort,
    ) -> Result<(), FolioError> {
        if let Some(outgoing) = outgoing {
            self.remove(&outgoing)?;
        }
        self.add(incoming, pricing)
    }

    /// Replay a transaction history in order. There is no rollback: on
    /// failure the ledger keeps every transaction applied so far and the
    /// error propagates to the caller.
    pub fn apply_transactions(
        &mut self,
        transactions: &[Transaction],
        pricing: &dyn PricingPort,
    ) -> Result<(), FolioError> {
        for tx in transactions {
            self.apply_transaction(tx.incoming.clone(), tx.outgoing.clone(), pricing)?;
        }
        Ok(())
    }

    fn remove(&mut self, outgoing: &Position) -> Result<(), FolioError> {
        // A zero-quantity removal is a no-op, even for an unknown id.
        if outgoing.quantity() == 0.0 {
            return Ok(());
        }

        let held = match self.positions.get(outgoing.id()) {
            Some(held) if held.quantity() >= outgoing.quantity() => held,
            held => {
                return Err(FolioError::InsufficientPosition {
                    id: outgoing.id().to_string(),
                    held: held.map_or(0.0, Position::quantity),
                    requested: outgoing.quantity(),
                });
            }
        };

        // split can still fail when the kinds differ under one id; that
        // error surfaces before anything is stored.
        let reduced = held.split(outgoing)?;
        self.positions.insert(outgoing.id().to_string(), reduced);
        Ok(())
    }

    fn add(&mut self, incoming: Position, pricing: &dyn PricingPort) -> Result<(), FolioError> {
        match self.positions.get(incoming.id()) {
            Some(existing) => {
                let merged = existing.combine(&incoming, pricing)?;
                self.positions.insert(merged.id().to_string(), merged);
            }
            None => {
                self.order.push(incoming.id().to_string());
                self.positions.insert(incoming.id().to_string(), incoming);
            }
        }
        Ok(())
    }

    pub fn position(&self, id: &str) -> Option<&Position> {
        self.positions.get(id)
    }

    pub fn position_count(&self) -> usize {
        self.positions.len()
    }

    /// Ids currently tracked, in order of first appearance. Positions
    /// reduced to zero quantity stay listed; nothing prunes them.
    pub fn position_ids(&self) -> Vec<&str> {
        self.order.iter().map(String::as_str).collect()
    }

    /// Sum of every position's current value in the target currency.
    pub fn total_value(
        &self,
        currency: Currency,
        pricing: &dyn PricingPort,
    ) -> Result<f64, FolioError> {
        let mut value = 0.0;
        for position in self.iter() {
            value += position.current_value(currency, pricing)?;
        }
        Ok(value)
    }

    /// Profit of one position, or `None` for an id the ledger has never
    /// seen. Oracle failures propagate as errors.
    pub fn position_profit(
        &self,
        id: &str,
        currency: Currency,
        pricing: &dyn PricingPort,
    ) -> Result<Option<f64>, FolioError> {
        match self.positions.get(id) {
            Some(position) => Ok(Some(position.profit(currency, pricing)?)),
            None => Ok(None),
        }
    }

    /// Lazy, restartable walk over the positions in order of first
    /// appearance.
    pub fn iter(&self) -> impl Iterator<Item = &Position> + '_ {
        self.order.iter().filter_map(|id| self.positions.get(id))
    }
}
