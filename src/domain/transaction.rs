//! Transaction records replayed into the ledger.

use crate::domain::position::Position;

/// One ledger event: a position entering the portfolio and, optionally,
/// one leaving it. A missing outgoing side is an initial investment.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub incoming: Position,
    pub outgoing: Option<Position>,
}

impl Transaction {
    /// Pure investment: something comes in, nothing goes out.
    pub fn investment(incoming: Position) -> Self {
        Transaction {
            incoming,
            outgoing: None,
        }
    }

    /// Buy or sell: the incoming position is paid for by the outgoing
    /// one (or the proceeds of the outgoing one arrive as incoming).
    pub fn exchange(incoming: Position, outgoing: Position) -> Self {
        Transaction {
            incoming,
            outgoing: Some(outgoing),
        }
    }
}
