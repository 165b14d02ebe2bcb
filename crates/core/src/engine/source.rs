use crate::domain::price::PriceEntry;
use anyhow::Result;

/// Backing-store reader the cache refresh pulls from. Returns everything
/// currently stored; no pagination contract.
#[async_trait::async_trait]
pub trait PriceRecordSource: Send + Sync {
    fn source_name(&self) -> &'static str;

    async fn fetch_all(&self) -> Result<Vec<PriceEntry>>;
}

/// Reads the most recent day's rows from Postgres.
#[derive(Debug, Clone)]
pub struct PgRecordSource {
    pool: sqlx::PgPool,
}

impl PgRecordSource {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl PriceRecordSource for PgRecordSource {
    fn source_name(&self) -> &'static str {
        "postgres"
    }

    async fn fetch_all(&self) -> Result<Vec<PriceEntry>> {
        crate::storage::price_entries::fetch_latest(&self.pool).await
    }
}
