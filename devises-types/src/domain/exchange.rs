//! Available exchange domain model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::dto::ExchangeResponse;

/// Exchange rates quoted against the provider's base currency.
///
/// Keys are exactly as quoted by the remote source; values are never rescaled.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AvailableExchange {
    pub rates: BTreeMap<String, f64>,
}

impl AvailableExchange {
    pub fn new(rates: BTreeMap<String, f64>) -> Self {
        Self { rates }
    }

    /// Returns the rate quoted for `key`, if any.
    pub fn rate(&self, key: &str) -> Option<f64> {
        self.rates.get(key).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl From<ExchangeResponse> for AvailableExchange {
    fn from(response: ExchangeResponse) -> Self {
        Self {
            rates: response.rates,
        }
    }
}
