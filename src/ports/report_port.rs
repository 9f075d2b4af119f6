//! Report generation port trait.

use std::io::Write;

use crate::domain::currency::Currency;
use crate::domain::error::FolioError;
use crate::domain::ledger::Ledger;
use crate::ports::pricing_port::PricingPort;

/// Port for rendering a valuation report of a ledger.
pub trait ReportPort {
    fn write(
        &self,
        ledger: &Ledger,
        currency: Currency,
        pricing: &dyn PricingPort,
        out: &mut dyn Write,
    ) -> Result<(), FolioError>;
}
