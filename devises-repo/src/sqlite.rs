//! SQLite store adapter.
#![allow(clippy::collapsible_if)]

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

use devises_types::{CurrencyRecord, CurrencyStore, StoreError};

use crate::types::DbCurrency;

// ─────────────────────────────────────────────────────────────────────────────
// SQLite Repository
// ─────────────────────────────────────────────────────────────────────────────

/// SQLite currency store.
pub struct SqliteRepo {
    pool: SqlitePool,
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

impl SqliteRepo {
    /// Creates a new SQLite store with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            // Remove query parameters
            let path = path.split('?').next().unwrap_or(path);
            if path != ":memory:" {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        // Every new connection to an in-memory database sees an empty database,
        // so keep exactly one alive for the lifetime of the pool.
        let pool_options = if is_in_memory(database_url) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
        };
        let pool = pool_options.connect_with(options).await?;

        let repo = Self { pool };
        repo.create_schema().await?;
        tracing::debug!(database_url, "SQLite store ready");
        Ok(repo)
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Creates the database schema.
    pub async fn create_schema(&self) -> Result<(), StoreError> {
        let ddl = include_str!("../migrations/0001_create_currencies.sql");
        sqlx::query(ddl)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Store implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl CurrencyStore for SqliteRepo {
    async fn count_currencies(&self) -> Result<i64, StoreError> {
        sqlx::query_scalar::<_, i64>(r#"SELECT COUNT(*) FROM currencies"#)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    async fn all_currencies(&self) -> Result<Vec<CurrencyRecord>, StoreError> {
        let rows: Vec<DbCurrency> =
            sqlx::query_as(r#"SELECT id, code, name FROM currencies ORDER BY id"#)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(DbCurrency::into_record).collect())
    }

    async fn insert_all(&self, records: &[CurrencyRecord]) -> Result<(), StoreError> {
        let mut db_tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        for record in records {
            sqlx::query(r#"INSERT INTO currencies (code, name) VALUES (?, ?)"#)
                .bind(&record.code)
                .bind(&record.name)
                .execute(&mut *db_tx)
                .await
                .map_err(|e| StoreError::Database(e.to_string()))?;
        }

        db_tx
            .commit()
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        tracing::debug!(rows = records.len(), "Inserted currency rows");
        Ok(())
    }
}
