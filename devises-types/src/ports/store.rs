//! Local store port trait.
//!
//! Adapters (SQLite, Postgres, in-memory) implement this trait.

use crate::dto::CurrencyRecord;
use crate::error::StoreError;

/// Persisted currency rows.
#[async_trait::async_trait]
pub trait CurrencyStore: Send + Sync + 'static {
    /// Returns the number of persisted currency rows.
    async fn count_currencies(&self) -> Result<i64, StoreError>;

    /// Returns every currency row in storage order.
    async fn all_currencies(&self) -> Result<Vec<CurrencyRecord>, StoreError>;

    /// Inserts all rows in one operation. Either every row lands or none does.
    async fn insert_all(&self, records: &[CurrencyRecord]) -> Result<(), StoreError>;
}
