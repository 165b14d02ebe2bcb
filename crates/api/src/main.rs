use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use presyo_core::domain::price::{Resolution, SnapshotInfo};
use presyo_core::engine::source::PgRecordSource;
use presyo_core::engine::{format, QueryEngine};
use presyo_core::sms::SmsClient;

type Engine = QueryEngine<PgRecordSource>;

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

    let pool: Option<PgPool> = match settings.require_database_url() {
        Ok(db_url) => match sqlx::postgres::PgPoolOptions::new()
            .max_connections(5)
            .connect(db_url)
            .await
        {
            Ok(pool) => match presyo_core::storage::migrate(&pool).await {
                Ok(()) => Some(pool),
                Err(e) => {
                    sentry_anyhow::capture_anyhow(&e);
                    tracing::error!(error = %e, "db migrations failed; starting API in degraded mode");
                    None
                }
            },
            Err(e) => {
                let err = anyhow::Error::new(e);
                sentry_anyhow::capture_anyhow(&err);
                tracing::error!(error = %err, "db connect failed; starting API in degraded mode");
                None
            }
        },
        Err(e) => {
            sentry_anyhow::capture_anyhow(&e);
            tracing::error!(error = %e, "DATABASE_URL missing; starting API in degraded mode");
            None
        }
    };

    let engine = match pool {
        Some(pool) => {
            let engine = Arc::new(Engine::new(
                PgRecordSource::new(pool),
                presyo_core::config::Settings::cache_ttl(),
            ));
            // Prime the snapshot so the first query does not pay for it.
            engine.refresh().await;
            Some(engine)
        }
        None => None,
    };

    let sms = SmsClient::from_settings(&settings)?.map(Arc::new);

    let state = AppState { engine, sms };

    let app = Router::new()
        .route("/healthz", get(healthz))
        .route("/query", post(handle_query))
        .route("/webhook/sms", post(handle_sms_webhook))
        .route("/admin/refresh", post(handle_refresh))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!(%addr, "api listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn healthz() -> &'static str {
    "ok"
}

#[derive(Clone)]
struct AppState {
    engine: Option<Arc<Engine>>,
    sms: Option<Arc<SmsClient>>,
}

#[derive(Debug, Deserialize)]
struct QueryRequest {
    query: String,
}

async fn handle_query(
    State(state): State<AppState>,
    Json(req): Json<QueryRequest>,
) -> Result<Json<Resolution>, StatusCode> {
    let Some(engine) = &state.engine else {
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    };

    if req.query.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    Ok(Json(engine.process(&req.query).await))
}

/// Gateway webhook payload. Field names vary between gateway versions, so
/// both spellings are accepted.
#[derive(Debug, Deserialize)]
struct InboundSms {
    #[serde(alias = "sender")]
    from: Option<String>,
    #[serde(alias = "text")]
    message: Option<String>,
    #[serde(default)]
    id: Option<String>,
}

#[derive(Debug, Serialize)]
struct SmsReply {
    success: bool,
    answer: String,
    sms_sent: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message_id: Option<String>,
}

async fn handle_sms_webhook(
    State(state): State<AppState>,
    Json(inbound): Json<InboundSms>,
) -> Result<Json<SmsReply>, StatusCode> {
    let Some(engine) = &state.engine else {
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    };

    let Some(message) = inbound.message.as_deref().filter(|m| !m.trim().is_empty()) else {
        return Err(StatusCode::BAD_REQUEST);
    };

    tracing::info!(message_id = ?inbound.id, "inbound sms query");

    let resolution = engine.process(message).await;
    let result = resolution.result();
    let answer = format::truncate_for_sms(&result.answer, format::SMS_MAX_LEN);

    let mut sms_sent = false;
    if let (Some(sms), Some(from)) = (&state.sms, inbound.from.as_deref()) {
        match sms.send(from, &answer).await {
            Ok(_) => sms_sent = true,
            Err(e) => {
                sentry_anyhow::capture_anyhow(&e);
                tracing::error!(error = %e, "failed to send sms reply");
            }
        }
    }

    Ok(Json(SmsReply {
        success: result.success,
        answer,
        sms_sent,
        message_id: inbound.id,
    }))
}

async fn handle_refresh(
    State(state): State<AppState>,
) -> Result<Json<SnapshotInfo>, StatusCode> {
    let Some(engine) = &state.engine else {
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    };

    engine.refresh().await;
    Ok(Json(engine.snapshot_info()))
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
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
