use anyhow::Context;
use chrono::{Datelike, NaiveDate};

// Advisory locks are session-scoped; a dropped connection releases them.
// Best-effort guard against two ingest runs racing on the same day.
const LOCK_NAMESPACE: i64 = 0x5052_4553_594F; // "PRESYO" as hex-ish namespace.

/// Postgres advisory lock for one ingest day. Acquire before writing, release
/// when done; an unreleased lock goes away with the session.
#[derive(Debug)]
pub struct IngestDayLock {
    key: i64,
}

impl IngestDayLock {
    /// `None` when another run already holds the day.
    pub async fn try_acquire(
        pool: &sqlx::PgPool,
        as_of_date: NaiveDate,
    ) -> anyhow::Result<Option<Self>> {
        let key = LOCK_NAMESPACE ^ i64::from(as_of_date.num_days_from_ce());
        let (acquired,): (bool,) = sqlx::query_as("SELECT pg_try_advisory_lock($1)")
            .persistent(false)
            .bind(key)
            .fetch_one(pool)
            .await
            .with_context(|| format!("failed to acquire advisory lock (key={key})"))?;

        Ok(acquired.then_some(Self { key }))
    }

    pub async fn release(self, pool: &sqlx::PgPool) -> anyhow::Result<()> {
        sqlx::query("SELECT pg_advisory_unlock($1)")
            .persistent(false)
            .bind(self.key)
            .execute(pool)
            .await
            .with_context(|| format!("failed to release advisory lock (key={})", self.key))?;
        Ok(())
    }
}
