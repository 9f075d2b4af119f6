//! Configuration validation.
//!
//! Checks the statically checkable config fields before the CLI runs.
//! Pricing table entries are validated lazily by the pricing adapter,
//! which fails per lookup; there is no way to enumerate them through
//! the config port.

use crate::domain::currency::Currency;
use crate::domain::error::FolioError;
use crate::ports::config_port::ConfigPort;

pub fn validate_report_config(config: &dyn ConfigPort) -> Result<(), FolioError> {
    validate_currency(config)?;
    validate_history_file(config)?;
    validate_decimals(config)?;
    Ok(())
}

fn validate_currency(config: &dyn ConfigPort) -> Result<(), FolioError> {
    if let Some(raw) = config.get_string("report", "currency") {
        raw.parse::<Currency>()
            .map_err(|reason| FolioError::ConfigInvalid {
                section: "report".to_string(),
                key: "currency".to_string(),
                reason,
            })?;
    }
    Ok(())
}

fn validate_history_file(config: &dyn ConfigPort) -> Result<(), FolioError> {
    if let Some(file) = config.get_string("history", "file") {
        if file.trim().is_empty() {
            return Err(FolioError::ConfigInvalid {
                section: "history".to_string(),
                key: "file".to_string(),
                reason: "file path must not be empty".to_string(),
            });
        }
    }
    Ok(())
}

fn validate_decimals(config: &dyn ConfigPort) -> Result<(), FolioError> {
    if let Some(raw) = config.get_string("report", "decimals") {
        match raw.trim().parse::<i64>() {
            Ok(d) if (0..=9).contains(&d) => {}
            _ => {
                return Err(FolioError::ConfigInvalid {
                    section: "report".to_string(),
                    key: "decimals".to_string(),
                    reason: "must be an integer between 0 and 9".to_string(),
                });
            }
        }
    }
    Ok(())
}
