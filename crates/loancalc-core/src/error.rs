//! Shared error type across loancalc crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Missing, non-numeric or out-of-range request parameters.
    InvalidInput,
    /// Counter store refused, dropped or timed out.
    StoreUnavailable,
    /// Counter store answered with something that is not a count.
    ProtocolError,
    /// Configuration could not be parsed or validated.
    InvalidConfig,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::InvalidInput => "INVALID_INPUT",
            ClientCode::StoreUnavailable => "STORE_UNAVAILABLE",
            ClientCode::ProtocolError => "PROTOCOL_ERROR",
            ClientCode::InvalidConfig => "INVALID_CONFIG",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, LoanCalcError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum LoanCalcError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("counter store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("counter store protocol error: {0}")]
    Protocol(String),
    #[error("invalid config: {0}")]
    Config(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl LoanCalcError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            LoanCalcError::InvalidInput(_) => ClientCode::InvalidInput,
            LoanCalcError::StoreUnavailable(_) => ClientCode::StoreUnavailable,
            LoanCalcError::Protocol(_) => ClientCode::ProtocolError,
            LoanCalcError::Config(_) => ClientCode::InvalidConfig,
            LoanCalcError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            LoanCalcError::Internal(_) => ClientCode::Internal,
        }
    }
}
