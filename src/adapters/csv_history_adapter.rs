//! CSV transaction history adapter.
//!
//! Row format:
//! `date,kind,id,quantity,currency,unit_cost,out_kind,out_id,out_quantity`
//! in ledger order, one transaction per row. Empty `out_*` columns mean
//! an initial investment; an empty date means an undated acquisition.

use crate::domain::currency::Currency;
use crate::domain::error::FolioError;
use crate::domain::instrument::InstrumentKind;
use crate::domain::position::Position;
use crate::domain::transaction::Transaction;
use crate::ports::history_port::HistoryPort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

pub struct CsvHistoryAdapter {
    path: PathBuf,
}

impl CsvHistoryAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn parse_error(&self, reason: String) -> FolioError {
        FolioError::HistoryParse {
            file: self.path.display().to_string(),
            reason,
        }
    }

    fn field<'r>(
        &self,
        record: &'r csv::StringRecord,
        index: usize,
        name: &str,
        line: usize,
    ) -> Result<&'r str, FolioError> {
        record
            .get(index)
            .map(str::trim)
            .ok_or_else(|| self.parse_error(format!("line {}: missing {} column", line, name)))
    }

    fn parse_row(
        &self,
        record: &csv::StringRecord,
        line: usize,
    ) -> Result<Transaction, FolioError> {
        let acquired = match self.field(record, 0, "date", line)? {
            "" => None,
            s => Some(NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| {
                self.parse_error(format!("line {}: invalid date {}: {}", line, s, e))
            })?),
        };

        let kind: InstrumentKind = self
            .field(record, 1, "kind", line)?
            .parse()
            .map_err(|e| self.parse_error(format!("line {}: {}", line, e)))?;

        let id = self.field(record, 2, "id", line)?;
        if id.is_empty() {
            return Err(self.parse_error(format!("line {}: empty id", line)));
        }

        let quantity: f64 = self
            .field(record, 3, "quantity", line)?
            .parse()
            .map_err(|e| self.parse_error(format!("line {}: invalid quantity: {}", line, e)))?;

        let currency: Currency = self
            .field(record, 4, "currency", line)?
            .parse()
            .map_err(|e| self.parse_error(format!("line {}: {}", line, e)))?;

        let unit_cost: f64 = self
            .field(record, 5, "unit_cost", line)?
            .parse()
            .map_err(|e| self.parse_error(format!("line {}: invalid unit_cost: {}", line, e)))?;

        let incoming = Position::new(kind, id.to_string(), quantity, currency, unit_cost, acquired)
            .map_err(|e| self.parse_error(format!("line {}: {}", line, e)))?;

        // The out columns may be empty or absent entirely; either way the
        // row is a pure investment.
        let out_kind = record.get(6).unwrap_or("").trim();
        let out_id = record.get(7).unwrap_or("").trim();
        let out_quantity = record.get(8).unwrap_or("").trim();

        let outgoing = if out_kind.is_empty() && out_id.is_empty() && out_quantity.is_empty() {
            None
        } else if out_kind.is_empty() || out_id.is_empty() || out_quantity.is_empty() {
            return Err(self.parse_error(format!(
                "line {}: out_kind, out_id and out_quantity must be given together",
                line
            )));
        } else {
            let kind: InstrumentKind = out_kind
                .parse()
                .map_err(|e| self.parse_error(format!("line {}: {}", line, e)))?;
            let quantity: f64 = out_quantity.parse().map_err(|e| {
                self.parse_error(format!("line {}: invalid out_quantity: {}", line, e))
            })?;
            // Cost and currency play no part in a removal.
            let position =
                Position::new(kind, out_id.to_string(), quantity, Currency::Dollars, 0.0, None)
                    .map_err(|e| self.parse_error(format!("line {}: {}", line, e)))?;
            Some(position)
        };

        Ok(Transaction { incoming, outgoing })
    }
}

impl HistoryPort for CsvHistoryAdapter {
    fn load(&self) -> Result<Vec<Transaction>, FolioError> {
        let content = fs::read_to_string(&self.path)
            .map_err(|e| self.parse_error(format!("failed to read file: {}", e)))?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut transactions = Vec::new();

        for (row, result) in rdr.records().enumerate() {
            let line = row + 2; // line 1 is the header
            let record =
                result.map_err(|e| self.parse_error(format!("line {}: {}", line, e)))?;
            transactions.push(self.parse_row(&record, line)?);
        }

        Ok(transactions)
    }
}
