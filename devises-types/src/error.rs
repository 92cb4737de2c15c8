//! Error types for the currency data-access layer.

/// Local store failures (data access and seed resource).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Seed data error: {0}")]
    Seed(String),
}

/// Remote exchange source failures.
#[derive(Debug, thiserror::Error)]
pub enum ExchangeError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),
}

/// Errors seen by callers of the currency repository.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The remote source answered but flagged the request as unsuccessful.
    #[error("Remote exchange request was not successful")]
    RemoteExchange { detail: Option<String> },

    #[error("Invalid currency codes: {0:?}")]
    InvalidCurrencyCodes(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Exchange(#[from] ExchangeError),

    #[error("Operation was cancelled before producing a result")]
    Cancelled,
}
