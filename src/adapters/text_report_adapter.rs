//! Plain-text report adapter implementing ReportPort.
//!
//! One total line, then one line per position in first-appearance order.

use std::io::Write;

use crate::domain::currency::Currency;
use crate::domain::error::FolioError;
use crate::domain::ledger::Ledger;
use crate::ports::pricing_port::PricingPort;
use crate::ports::report_port::ReportPort;

pub struct TextReportAdapter {
    decimals: usize,
}

impl TextReportAdapter {
    pub fn new(decimals: usize) -> Self {
        Self { decimals }
    }
}

impl ReportPort for TextReportAdapter {
    fn write(
        &self,
        ledger: &Ledger,
        currency: Currency,
        pricing: &dyn PricingPort,
        out: &mut dyn Write,
    ) -> Result<(), FolioError> {
        let total = ledger.total_value(currency, pricing)?;
        writeln!(
            out,
            "Portfolio value: {:.*} {}",
            self.decimals, total, currency
        )?;

        for position in ledger.iter() {
            let value = position.current_value(currency, pricing)?;
            let profit = position.profit(currency, pricing)?;
            writeln!(
                out,
                "  {} ({}): quantity {}, value {:.*} {}, profit {:.*} {}",
                position.id(),
                position.kind(),
                position.quantity(),
                self.decimals,
                value,
                currency,
                self.decimals,
                profit,
                currency
            )?;
        }

        Ok(())
    }
}
