use hostkit_types::{CollectiveId, Currency, ErrorCode};
use thiserror::Error;

/// Failure of a conversion or balance check.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FxError {
    /// The paying collective cannot cover the expense.
    #[error("{message}")]
    InsufficientBalance { message: String },

    #[error("no exchange rate available from {from} to {to}")]
    RateUnavailable { from: Currency, to: Currency },

    #[error("invalid exchange rate {value} from {from} to {to}")]
    InvalidRate {
        from: Currency,
        to: Currency,
        value: f64,
    },

    #[error("balance unavailable for {collective}: {reason}")]
    Balance {
        collective: CollectiveId,
        reason: String,
    },
}

impl ErrorCode for FxError {
    fn code(&self) -> &'static str {
        match self {
            Self::InsufficientBalance { .. } => "INSUFFICIENT_BALANCE",
            Self::RateUnavailable { .. } => "FX_RATE_UNAVAILABLE",
            Self::InvalidRate { .. } => "FX_INVALID_RATE",
            Self::Balance { .. } => "BALANCE_UNAVAILABLE",
        }
    }

    fn is_recoverable(&self) -> bool {
        matches!(self, Self::RateUnavailable { .. } | Self::Balance { .. })
    }
}
