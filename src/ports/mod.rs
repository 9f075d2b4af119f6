//! Port traits for external collaborators.

pub mod config_port;
pub mod history_port;
pub mod pricing_port;
pub mod report_port;
