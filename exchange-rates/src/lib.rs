//! Offline exchange rates.
//!
//! A hardcoded table of reference rates exposed through the `ExchangeSource`
//! port, so the repository can run without network access or an API key.
//! Responses mimic the `live` endpoint: quotes are keyed `USD{CODE}` and give
//! the number of `CODE` units bought by one US dollar.
//!
//! # Example
//! ```
//! use exchange_rates::StaticExchangeSource;
//!
//! let response = StaticExchangeSource::new().quote("EUR,INR");
//! assert!(response.success);
//! assert!(response.rates.contains_key("USDEUR"));
//! ```

use std::collections::BTreeMap;

use async_trait::async_trait;
use devises_types::{ExchangeError, ExchangeResponse, ExchangeSource};

/// Quote currency of every rate in the table.
pub const SOURCE_CURRENCY: &str = "USD";

/// Provider error code for unknown currency codes.
pub const INVALID_CODES_ERROR: i64 = 202;

// ─────────────────────────────────────────────────────────────────────────────
// RATE TABLE - value of one unit in USD. Add new currencies here!
// ─────────────────────────────────────────────────────────────────────────────

const BASE_TO_USD_RATES: &[(&str, f64)] = &[
    ("AUD", 0.66),
    ("BGN", 0.555),
    ("BRL", 0.18),
    ("CAD", 0.73),
    ("CHF", 1.13),
    ("CNY", 0.138),
    ("CZK", 0.043),
    ("DKK", 0.1457),
    ("EUR", 1.087),
    ("GBP", 1.266),
    ("HKD", 0.128),
    ("HRK", 0.1443),
    ("HUF", 0.0027),
    ("IDR", 0.000063),
    ("ILS", 0.27),
    ("INR", 0.01203),
    ("JPY", 0.0067),
    ("KRW", 0.00074),
    ("MXN", 0.058),
    ("MYR", 0.21),
    ("NOK", 0.094),
    ("NZD", 0.61),
    ("PHP", 0.0178),
    ("PLN", 0.25),
    ("RON", 0.218),
    ("RUB", 0.011),
    ("SEK", 0.095),
    ("SGD", 0.74),
    ("THB", 0.028),
    ("TRY", 0.031),
    ("USD", 1.0),
    ("ZAR", 0.054),
];

/// Returns the USD value of one unit of `code`, if the table knows it.
pub fn base_to_usd_rate(code: &str) -> Option<f64> {
    let code = code.trim().to_uppercase();
    BASE_TO_USD_RATES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, rate)| *rate)
}

/// All codes known to the table.
pub fn supported_codes() -> impl Iterator<Item = &'static str> {
    BASE_TO_USD_RATES.iter().map(|(c, _)| *c)
}

fn fluctuate(base_rate: f64, max_variance_percent: f64) -> f64 {
    if max_variance_percent <= 0.0 {
        return base_rate;
    }
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .subsec_nanos();
    let random_factor = ((nanos % 2001) as f64 / 1000.0) - 1.0;
    let variance = base_rate * (max_variance_percent / 100.0) * random_factor;
    base_rate + variance
}

// ─────────────────────────────────────────────────────────────────────────────
// Exchange source
// ─────────────────────────────────────────────────────────────────────────────

/// Answers exchange requests from the hardcoded table.
#[derive(Debug, Clone, Default)]
pub struct StaticExchangeSource {
    max_variance_percent: f64,
}

impl StaticExchangeSource {
    /// Source that always returns the base rates.
    pub fn new() -> Self {
        Self::default()
    }

    /// Source that jitters each quote by up to `percent` for realistic simulation.
    pub fn with_fluctuation(percent: f64) -> Self {
        Self {
            max_variance_percent: percent,
        }
    }

    /// Builds the `live`-style response for a comma-separated code list.
    pub fn quote(&self, codes: &str) -> ExchangeResponse {
        let mut rates = BTreeMap::new();
        let mut unknown = Vec::new();

        for code in codes.split(',').map(str::trim).filter(|c| !c.is_empty()) {
            match base_to_usd_rate(code) {
                Some(to_usd) => {
                    let to_usd = fluctuate(to_usd, self.max_variance_percent);
                    let key = format!("{}{}", SOURCE_CURRENCY, code.to_uppercase());
                    rates.insert(key, 1.0 / to_usd);
                }
                None => unknown.push(code.to_string()),
            }
        }

        if !unknown.is_empty() || rates.is_empty() {
            tracing::debug!(?unknown, "Rejecting unknown currency codes");
            return ExchangeResponse::failure(
                INVALID_CODES_ERROR,
                Some("You have provided one or more invalid Currency Codes.".into()),
            );
        }

        ExchangeResponse {
            source: Some(SOURCE_CURRENCY.to_string()),
            ..ExchangeResponse::success(rates)
        }
    }
}

#[async_trait]
impl ExchangeSource for StaticExchangeSource {
    async fn request_exchange(&self, codes: &str) -> Result<ExchangeResponse, ExchangeError> {
        Ok(self.quote(codes))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
