pub mod domain;
pub mod engine;
pub mod ingest;
pub mod sms;
pub mod storage;
pub mod time;

pub mod config {
    use anyhow::Context;

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub database_url: Option<String>,
        pub sentry_dsn: Option<String>,
        pub price_feed_base_url: Option<String>,
        pub price_feed_api_key: Option<String>,
        pub sms_api_key: Option<String>,
        pub sms_org_id: Option<String>,
        pub sms_sender_id: Option<String>,
        pub sms_base_url: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Ok(Self {
                database_url: std::env::var("DATABASE_URL").ok(),
                sentry_dsn: std::env::var("SENTRY_DSN").ok(),
                price_feed_base_url: std::env::var("PRICE_FEED_BASE_URL").ok(),
                price_feed_api_key: std::env::var("PRICE_FEED_API_KEY").ok(),
                sms_api_key: std::env::var("SMS_API_KEY").ok(),
                sms_org_id: std::env::var("SMS_ORG_ID").ok(),
                sms_sender_id: std::env::var("SMS_SENDER_ID").ok(),
                sms_base_url: std::env::var("SMS_BASE_URL").ok(),
            })
        }

        pub fn require_database_url(&self) -> anyhow::Result<&str> {
            self.database_url
                .as_deref()
                .context("DATABASE_URL is required")
        }

        pub fn require_price_feed_base_url(&self) -> anyhow::Result<&str> {
            self.price_feed_base_url
                .as_deref()
                .context("PRICE_FEED_BASE_URL is required")
        }

        /// Snapshot staleness threshold. The daily price index is published
        /// once per morning, so two refreshes a day are enough.
        pub fn cache_ttl() -> chrono::Duration {
            let hours = std::env::var("CACHE_TTL_HOURS")
                .ok()
                .and_then(|s| s.parse::<i64>().ok())
                .unwrap_or(12);
            chrono::Duration::hours(hours.max(1))
        }
    }
}
