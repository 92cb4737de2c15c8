//! Data Transfer Objects crossing the port boundaries.
//!
//! `CurrencyRecord` is the persisted row owned by the local store;
//! `ExchangeResponse` is the wire body returned by the remote exchange API.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Store records
// ─────────────────────────────────────────────────────────────────────────────

/// A currency row as persisted by the local store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyRecord {
    /// Storage identity; `None` until the row has been inserted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub code: String,
    pub name: String,
}

impl CurrencyRecord {
    /// Creates a record that has not been persisted yet.
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: None,
            code: code.into(),
            name: name.into(),
        }
    }

    /// Creates a record with a storage identity (for database reconstruction).
    pub fn stored(id: i64, code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            code: code.into(),
            name: name.into(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Exchange wire format
// ─────────────────────────────────────────────────────────────────────────────

/// Body of a `live` exchange-rate response.
///
/// The provider reports business failures (bad key, unknown codes) with
/// `success: false` and an `error` object, usually alongside HTTP 200.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeResponse {
    pub success: bool,
    #[serde(rename = "quotes", alias = "rates", default)]
    pub rates: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiFailure>,
}

/// Provider diagnostic attached to an unsuccessful response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiFailure {
    pub code: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
}

impl ExchangeResponse {
    /// Builds a successful response from `(key, rate)` pairs.
    pub fn success<K: Into<String>>(rates: impl IntoIterator<Item = (K, f64)>) -> Self {
        Self {
            success: true,
            rates: rates.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            source: None,
            timestamp: None,
            error: None,
        }
    }

    /// Builds an unsuccessful response carrying the provider's error code.
    pub fn failure(code: i64, info: Option<String>) -> Self {
        Self {
            success: false,
            rates: BTreeMap::new(),
            source: None,
            timestamp: None,
            error: Some(ApiFailure { code, info }),
        }
    }

    /// Human-readable provider diagnostic, if the response carried one.
    pub fn failure_detail(&self) -> Option<String> {
        self.error.as_ref().map(|e| match &e.info {
            Some(info) => format!("[{}] {}", e.code, info),
            None => format!("[{}]", e.code),
        })
    }
}
