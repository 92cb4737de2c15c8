//! Shared database row types for SQLite and PostgreSQL.

use sqlx::FromRow;

use devises_types::CurrencyRecord;

/// Currency row from database.
#[derive(FromRow)]
pub struct DbCurrency {
    pub id: i64,
    pub code: String,
    pub name: String,
}

impl DbCurrency {
    /// Convert database row to a store record.
    pub fn into_record(self) -> CurrencyRecord {
        CurrencyRecord::stored(self.id, self.code, self.name)
    }
}
