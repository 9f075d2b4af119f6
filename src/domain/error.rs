//! Domain and glue error types.

use crate::domain::instrument::InstrumentKind;
use crate::ports::pricing_port::PricingError;

/// Top-level error type for folio.
#[derive(Debug, thiserror::Error)]
pub enum FolioError {
    #[error("invalid position {id}: {reason}")]
    InvalidPosition { id: String, reason: String },

    #[error("mismatched positions: {left_kind} {left_id} vs {right_kind} {right_id}")]
    MismatchedPosition {
        left_kind: InstrumentKind,
        left_id: String,
        right_kind: InstrumentKind,
        right_id: String,
    },

    #[error("combining {id} leaves zero total quantity")]
    DivisionByZero { id: String },

    #[error("insufficient position {id}: held {held}, removing {requested}")]
    InsufficientPosition {
        id: String,
        held: f64,
        requested: f64,
    },

    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error("history parse error in {file}: {reason}")]
    HistoryParse { file: String, reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl FolioError {
    /// Mismatch error for a pair of positions, in operand order.
    pub(crate) fn mismatch(
        left_kind: InstrumentKind,
        left_id: &str,
        right_kind: InstrumentKind,
        right_id: &str,
    ) -> Self {
        FolioError::MismatchedPosition {
            left_kind,
            left_id: left_id.to_string(),
            right_kind,
            right_id: right_id.to_string(),
        }
    }
}

impl From<&FolioError> for std::process::ExitCode {
    fn from(err: &FolioError) -> Self {
        let code: u8 = match err {
            FolioError::Io(_) => 1,
            FolioError::ConfigParse { .. }
            | FolioError::ConfigMissing { .. }
            | FolioError::ConfigInvalid { .. } => 2,
            FolioError::HistoryParse { .. } => 3,
            FolioError::InvalidPosition { .. }
            | FolioError::MismatchedPosition { .. }
            | FolioError::DivisionByZero { .. }
            | FolioError::InsufficientPosition { .. } => 4,
            FolioError::Pricing(_) => 5,
        };
        std::process::ExitCode::from(code)
    }
}
