//! Transaction history access port trait.

use crate::domain::error::FolioError;
use crate::domain::transaction::Transaction;

pub trait HistoryPort {
    fn load(&self) -> Result<Vec<Transaction>, FolioError>;
}
