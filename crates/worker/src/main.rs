use anyhow::Context;
use clap::Parser;
use presyo_core::ingest::provider::{HttpJsonPriceFeed, PriceFeedClient};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "presyo_worker")]
struct Args {
    /// Price index as-of date (YYYY-MM-DD). Defaults to today's Manila date,
    /// rolled back before the morning publication cutoff.
    #[arg(long)]
    as_of_date: Option<String>,

    /// Do everything except writing to the database.
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = presyo_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();

    let as_of_date = presyo_core::time::ph_market::resolve_as_of_date(
        args.as_of_date.as_deref(),
        chrono::Utc::now(),
    )?;

    let feed = HttpJsonPriceFeed::from_settings(&settings)?;
    let provider = feed.feed_name();

    let fetched = feed.fetch_daily_prices(as_of_date).await;

    if args.dry_run {
        match &fetched {
            Ok((parsed, _)) => tracing::info!(
                %as_of_date,
                dry_run = true,
                items_len = parsed.items.len(),
                "daily ingest (dry-run)"
            ),
            Err(err) => tracing::error!(%as_of_date, dry_run = true, error = %err, "daily ingest fetch failed (dry-run)"),
        }
        return Ok(());
    }

    let db_url = settings.require_database_url()?;

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(db_url)
        .await
        .context("connect DATABASE_URL failed")?;

    presyo_core::storage::migrate(&pool).await?;

    let Some(day_lock) =
        presyo_core::storage::lock::IngestDayLock::try_acquire(&pool, as_of_date).await?
    else {
        tracing::warn!(%as_of_date, "as_of_date lock not acquired; another run in progress");
        return Ok(());
    };

    match fetched {
        Ok((parsed, raw)) => {
            let affected = presyo_core::storage::price_entries::upsert_daily_prices(
                &pool,
                as_of_date,
                &parsed.items,
            )
            .await?;

            let run_id = presyo_core::storage::price_entries::record_ingest_run(
                &pool,
                as_of_date,
                provider,
                "success",
                None,
                Some(raw),
            )
            .await?;

            tracing::info!(%as_of_date, %run_id, affected, "daily price ingest complete");
        }
        Err(err) => {
            sentry_anyhow::capture_anyhow(&err);
            let err_text = format!("{err:#}");
            let run_id = presyo_core::storage::price_entries::record_ingest_run(
                &pool,
                as_of_date,
                provider,
                "error",
                Some(&err_text),
                None,
            )
            .await?;

            tracing::error!(%as_of_date, %run_id, error = %err, "daily price ingest failed");
        }
    }

    if let Err(err) = day_lock.release(&pool).await {
        tracing::warn!(%as_of_date, error = %err, "failed to release ingest day lock");
    }
    Ok(())
}

fn init_sentry(settings: &presyo_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
