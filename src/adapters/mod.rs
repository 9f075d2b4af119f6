//! Concrete adapter implementations for ports.

pub mod config_pricing_adapter;
pub mod csv_history_adapter;
pub mod file_config_adapter;
pub mod text_report_adapter;
