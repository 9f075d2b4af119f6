//! Core domain types and logic.

pub mod currency;
pub mod instrument;
pub mod position;
pub mod transaction;
pub mod ledger;
pub mod config_validation;
pub mod error;
