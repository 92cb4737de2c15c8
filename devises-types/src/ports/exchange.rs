//! Exchange rate source port.
//!
//! This trait defines the interface for exchange rate services.
//! Implementations can be HTTP clients, offline tables, mocks, etc.

use crate::dto::ExchangeResponse;
use crate::error::ExchangeError;

/// Port trait for remote exchange rate sources.
#[async_trait::async_trait]
pub trait ExchangeSource: Send + Sync + 'static {
    /// Requests the current rates for a comma-separated list of currency codes.
    ///
    /// An unsuccessful response is returned as `Ok` with `success == false`;
    /// `Err` is reserved for transport and decoding failures.
    async fn request_exchange(&self, codes: &str) -> Result<ExchangeResponse, ExchangeError>;
}
