//! Client for the external daily price-index feed. One GET per ingest run;
//! the raw JSON body is kept alongside the parsed form for the audit trail.

use crate::config::Settings;
use crate::domain::price::PriceEntry;
use crate::ingest::types::DailyPricesResponse;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde_json::Value;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_PATH: &str = "/v1/price_index_daily";
const DEFAULT_RETRIES: u32 = 3;

#[async_trait::async_trait]
pub trait PriceFeedClient: Send + Sync {
    fn feed_name(&self) -> &'static str;

    async fn fetch_daily_prices(
        &self,
        as_of_date: NaiveDate,
    ) -> Result<(DailyPricesResponse, Value)>;
}

#[derive(Debug, Clone)]
pub struct HttpJsonPriceFeed {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    retries: u32,
}

fn env_or<T: std::str::FromStr>(var: &str, default: T) -> T {
    std::env::var(var)
        .ok()
        .and_then(|s| s.parse::<T>().ok())
        .unwrap_or(default)
}

impl HttpJsonPriceFeed {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let base = settings.require_price_feed_base_url()?.trim_end_matches('/').to_string();
        let path = std::env::var("PRICE_FEED_PATH")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PATH.to_string());
        let endpoint = if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        };

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(env_or(
                "PRICE_FEED_TIMEOUT_SECS",
                DEFAULT_TIMEOUT_SECS,
            )))
            .build()
            .context("failed to build price feed http client")?;

        Ok(Self {
            http,
            endpoint,
            api_key: settings.price_feed_api_key.clone(),
            retries: env_or("PRICE_FEED_RETRIES", DEFAULT_RETRIES).max(1),
        })
    }

    async fn fetch_once(&self, as_of_date: NaiveDate) -> Result<(DailyPricesResponse, Value)> {
        let mut req = self
            .http
            .get(&self.endpoint)
            .query(&[("as_of_date", as_of_date.to_string())]);
        if let Some(key) = &self.api_key {
            req = req.header("x-api-key", key);
        }

        let res = req.send().await.context("price feed request failed")?;
        let status = res.status();
        let body = res.text().await.context("failed to read feed response")?;
        let raw: Value = serde_json::from_str(&body)
            .with_context(|| format!("feed response is not valid JSON: {body}"))?;

        if !status.is_success() {
            anyhow::bail!("price feed HTTP {status}: {raw}");
        }

        let parsed: DailyPricesResponse = serde_json::from_value(raw.clone())
            .context("failed to parse feed response into DailyPricesResponse")?;
        Ok((parsed, raw))
    }
}

#[async_trait::async_trait]
impl PriceFeedClient for HttpJsonPriceFeed {
    fn feed_name(&self) -> &'static str {
        "external_http_json"
    }

    async fn fetch_daily_prices(
        &self,
        as_of_date: NaiveDate,
    ) -> Result<(DailyPricesResponse, Value)> {
        for attempt in 1..=self.retries {
            match self.fetch_once(as_of_date).await {
                Ok((parsed, raw)) => {
                    validate_response(&parsed, as_of_date)?;
                    return Ok((parsed, raw));
                }
                Err(err) if attempt < self.retries => {
                    let backoff = Duration::from_secs(1 << (attempt - 1));
                    tracing::warn!(attempt, ?backoff, error = %err, "price feed fetch failed; retrying");
                    tokio::time::sleep(backoff).await;
                }
                Err(err) => return Err(err),
            }
        }
        unreachable!("retries >= 1")
    }
}

fn validate_response(resp: &DailyPricesResponse, expected: NaiveDate) -> Result<()> {
    anyhow::ensure!(
        resp.as_of_date == expected,
        "feed as_of_date mismatch: expected {expected}, got {}",
        resp.as_of_date
    );
    anyhow::ensure!(!resp.items.is_empty(), "feed returned no price records");
    resp.items.iter().try_for_each(validate_item)
}

fn validate_item(item: &PriceEntry) -> Result<()> {
    anyhow::ensure!(
        !item.commodity.trim().is_empty(),
        "commodity must be non-empty"
    );
    anyhow::ensure!(
        item.price > 0.0,
        "price must be positive for {}",
        item.commodity
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_expected_shape_with_defaulted_fields() {
        let as_of = NaiveDate::from_ymd_opt(2025, 12, 5).unwrap();
        let v = json!({
            "as_of_date": as_of,
            "items": [
                {
                    "commodity": "Tomato",
                    "price": 45.0,
                    "date": "2025-12-05",
                    "category": "Vegetables"
                }
            ]
        });

        let parsed: DailyPricesResponse = serde_json::from_value(v).unwrap();
        assert_eq!(parsed.as_of_date, as_of);
        assert_eq!(parsed.items.len(), 1);
        assert_eq!(parsed.items[0].unit, "kg");
        assert_eq!(parsed.items[0].location, "NCR");
        assert_eq!(parsed.items[0].specification, "");
    }

    #[test]
    fn missing_date_defaults_to_none() {
        let v = json!({
            "as_of_date": "2025-12-05",
            "items": [{"commodity": "Tomato", "price": 45.0}]
        });

        let parsed: DailyPricesResponse = serde_json::from_value(v).unwrap();
        assert_eq!(parsed.items[0].date, None);
    }

    fn bare_entry(commodity: &str, price: f64) -> PriceEntry {
        PriceEntry {
            commodity: commodity.to_string(),
            price,
            specification: String::new(),
            unit: "kg".to_string(),
            date: None,
            location: "NCR".to_string(),
            category: String::new(),
        }
    }

    #[test]
    fn validation_rejects_non_positive_prices() {
        assert!(validate_item(&bare_entry("Tomato", 0.0)).is_err());
        assert!(validate_item(&bare_entry("Tomato", -3.5)).is_err());
        assert!(validate_item(&bare_entry("Tomato", 45.0)).is_ok());
    }

    #[test]
    fn validation_rejects_blank_commodity() {
        assert!(validate_item(&bare_entry("  ", 10.0)).is_err());
    }

    #[test]
    fn response_validation_requires_matching_date_and_items() {
        let day = NaiveDate::from_ymd_opt(2025, 12, 5).unwrap();
        let other = NaiveDate::from_ymd_opt(2025, 12, 4).unwrap();

        let resp = DailyPricesResponse {
            as_of_date: day,
            items: vec![bare_entry("Tomato", 45.0)],
        };
        assert!(validate_response(&resp, day).is_ok());
        assert!(validate_response(&resp, other).is_err());

        let empty = DailyPricesResponse {
            as_of_date: day,
            items: Vec::new(),
        };
        assert!(validate_response(&empty, day).is_err());
    }
}
