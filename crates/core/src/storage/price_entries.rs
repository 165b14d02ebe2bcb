//! Postgres persistence for the daily price index. One row per commodity
//! variant per region per day; re-running an ingest for a day updates in
//! place on the natural key.

use crate::domain::price::PriceEntry;
use anyhow::Context;
use chrono::NaiveDate;
use serde_json::Value;
use uuid::Uuid;

const DEFAULT_UPSERT_BATCH: usize = 200;

pub async fn upsert_daily_prices(
    pool: &sqlx::PgPool,
    as_of_date: NaiveDate,
    items: &[PriceEntry],
) -> anyhow::Result<u64> {
    anyhow::ensure!(!items.is_empty(), "items must be non-empty");

    let batch_size = std::env::var("PRICE_ENTRIES_UPSERT_BATCH")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .filter(|n| *n >= 1)
        .unwrap_or(DEFAULT_UPSERT_BATCH);

    let mut tx = pool.begin().await.context("begin transaction failed")?;
    let mut affected: u64 = 0;

    for (batch_idx, chunk) in items.chunks(batch_size).enumerate() {
        let started = std::time::Instant::now();
        let mut qb = sqlx::QueryBuilder::new(
            "INSERT INTO price_entries \
             (as_of_date, commodity, price, specification, unit, date, location, category) ",
        );
        qb.push_values(chunk, |mut row, item| {
            row.push_bind(as_of_date)
                .push_bind(item.commodity.trim())
                .push_bind(item.price)
                .push_bind(item.specification.trim())
                .push_bind(item.unit.trim())
                .push_bind(item.date)
                .push_bind(item.location.trim())
                .push_bind(item.category.trim());
        });
        qb.push(
            " ON CONFLICT (as_of_date, commodity, specification, location) \
             DO UPDATE SET price = EXCLUDED.price, unit = EXCLUDED.unit, \
             date = EXCLUDED.date, category = EXCLUDED.category",
        );

        let res = qb
            .build()
            .persistent(false)
            .execute(&mut *tx)
            .await
            .context("batch upsert price_entries failed")?;
        affected += res.rows_affected();

        tracing::debug!(
            %as_of_date,
            batch_idx,
            batch_size = chunk.len(),
            elapsed_ms = started.elapsed().as_millis(),
            "price_entries batch upsert"
        );
    }

    tx.commit().await.context("commit transaction failed")?;
    Ok(affected)
}

/// All rows of the most recent ingested day; what the cache refresh reads.
pub async fn fetch_latest(pool: &sqlx::PgPool) -> anyhow::Result<Vec<PriceEntry>> {
    type Row = (
        String,
        f64,
        String,
        String,
        Option<NaiveDate>,
        String,
        String,
    );

    let rows: Vec<Row> = sqlx::query_as(
        "SELECT commodity, price, specification, unit, date, location, category \
         FROM price_entries \
         WHERE as_of_date = (SELECT MAX(as_of_date) FROM price_entries) \
         ORDER BY commodity ASC",
    )
    .fetch_all(pool)
    .await
    .context("select price_entries failed")?;

    Ok(rows
        .into_iter()
        .map(
            |(commodity, price, specification, unit, date, location, category)| PriceEntry {
                commodity,
                price,
                specification,
                unit,
                date,
                location,
                category,
            },
        )
        .collect())
}

/// One audit row per ingest attempt, success or failure. The raw feed payload
/// is retained so a bad day can be replayed without re-fetching.
pub async fn record_ingest_run(
    pool: &sqlx::PgPool,
    as_of_date: NaiveDate,
    provider: &str,
    status: &str,
    error: Option<&str>,
    raw_response: Option<Value>,
) -> anyhow::Result<Uuid> {
    let id = Uuid::new_v4();

    sqlx::query(
        "INSERT INTO price_ingest_runs (id, as_of_date, generated_at, provider, status, error, raw_response) \
         VALUES ($1, $2, now(), $3, $4, $5, $6)",
    )
    .persistent(false)
    .bind(id)
    .bind(as_of_date)
    .bind(provider)
    .bind(status)
    .bind(error)
    .bind(raw_response)
    .execute(pool)
    .await
    .context("insert price_ingest_runs failed")?;

    Ok(id)
}
