//! Reference currency dataset used to populate an empty store.
//!
//! The bundled list is compiled in from `data/currencies.json`. Deployments
//! can point at a replacement file with the same shape.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use devises_types::{CurrencyRecord, StoreError};

const BUNDLED_CURRENCIES: &str = include_str!("../data/currencies.json");

#[derive(Deserialize)]
struct SeedEntry {
    code: String,
    name: String,
}

/// Validated reference currency list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedData {
    records: Vec<CurrencyRecord>,
}

impl SeedData {
    /// Parses the dataset compiled into this crate.
    pub fn bundled() -> Result<Self, StoreError> {
        Self::from_json(BUNDLED_CURRENCIES)
    }

    /// Loads a replacement dataset from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| StoreError::Seed(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&raw)
    }

    /// Parses and validates a JSON array of `{code, name}` objects.
    pub fn from_json(raw: &str) -> Result<Self, StoreError> {
        let entries: Vec<SeedEntry> =
            serde_json::from_str(raw).map_err(|e| StoreError::Seed(e.to_string()))?;

        if entries.is_empty() {
            return Err(StoreError::Seed("seed dataset is empty".into()));
        }

        let mut seen = HashSet::new();
        let mut records = Vec::with_capacity(entries.len());
        for entry in entries {
            let code = entry.code.trim();
            if code.is_empty() {
                return Err(StoreError::Seed("currency code cannot be blank".into()));
            }
            if !seen.insert(code.to_string()) {
                return Err(StoreError::Seed(format!("duplicate currency code {}", code)));
            }
            records.push(CurrencyRecord::new(code, entry.name.trim()));
        }

        Ok(Self { records })
    }

    pub fn records(&self) -> &[CurrencyRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<CurrencyRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
