//! PostgreSQL store adapter.

use async_trait::async_trait;
use sqlx::PgPool;

use devises_types::{CurrencyRecord, CurrencyStore, StoreError};

use crate::types::DbCurrency;

// ─────────────────────────────────────────────────────────────────────────────
// PostgreSQL Repository
// ─────────────────────────────────────────────────────────────────────────────

/// PostgreSQL currency store.
pub struct PostgresRepo {
    pool: PgPool,
}

/// Executes SQL statements from a migration file, splitting by semicolons.
async fn execute_migration(pool: &PgPool, sql: &str, name: &str) -> Result<(), anyhow::Error> {
    for statement in sql.split(';') {
        let stmt = statement.trim();
        if !stmt.is_empty() {
            sqlx::query(stmt)
                .execute(pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration {} failed: {}", name, e))?;
        }
    }
    Ok(())
}

impl PostgresRepo {
    /// Connects and runs migrations.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPool::connect(database_url).await?;

        execute_migration(
            &pool,
            include_str!("../migrations/0001_create_currencies_pg.sql"),
            "0001",
        )
        .await?;

        tracing::debug!("PostgreSQL store ready");
        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl CurrencyStore for PostgresRepo {
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
            sqlx::query(r#"INSERT INTO currencies (code, name) VALUES ($1, $2)"#)
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

        Ok(())
    }
}
