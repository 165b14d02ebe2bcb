//! Outbound SMS gateway client. Answers are rendered elsewhere; this module
//! only delivers them, truncated by the caller to a single segment.

use crate::config::Settings;
use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_SENDER_ID: &str = "DA Price";

#[derive(Debug, Clone)]
pub struct SmsClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    org_id: String,
    sender_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SmsReceipt {
    #[serde(default)]
    pub id: Option<String>,
}

impl SmsClient {
    /// Returns `None` when gateway credentials are not configured; the caller
    /// then answers over HTTP only.
    pub fn from_settings(settings: &Settings) -> Result<Option<Self>> {
        let (Some(api_key), Some(org_id), Some(base_url)) = (
            settings.sms_api_key.clone(),
            settings.sms_org_id.clone(),
            settings.sms_base_url.clone(),
        ) else {
            tracing::warn!("sms gateway credentials not set; outbound sms disabled");
            return Ok(None);
        };

        let sender_id = settings
            .sms_sender_id
            .clone()
            .unwrap_or_else(|| DEFAULT_SENDER_ID.to_string());

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .context("failed to build sms http client")?;

        Ok(Some(Self {
            http,
            base_url,
            api_key,
            org_id,
            sender_id,
        }))
    }

    pub async fn send(&self, to: &str, message: &str) -> Result<SmsReceipt> {
        let recipient = format_phone_number(to);
        let url = format!(
            "{}/organizations/{}/send-sms",
            self.base_url.trim_end_matches('/'),
            self.org_id
        );

        let res = self
            .http
            .post(url)
            .header("Authorization", format!("Token {}", self.api_key))
            .json(&json!({
                "recipients": [recipient],
                "message": message,
                "sender_id": self.sender_id,
            }))
            .send()
            .await
            .context("sms gateway request failed")?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            anyhow::bail!("sms gateway HTTP {status}: {body}");
        }

        let receipt = res
            .json::<SmsReceipt>()
            .await
            .context("failed to parse sms gateway response")?;

        tracing::info!(%recipient, "sms sent");
        Ok(receipt)
    }
}

/// Normalize a Philippine mobile number to E.164.
pub fn format_phone_number(phone: &str) -> String {
    let cleaned: String = phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();

    if let Some(rest) = cleaned.strip_prefix("+63") {
        format!("+63{rest}")
    } else if let Some(rest) = cleaned.strip_prefix("63") {
        format!("+63{rest}")
    } else if let Some(rest) = cleaned.strip_prefix('0') {
        format!("+63{rest}")
    } else {
        format!("+63{cleaned}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_philippine_numbers() {
        assert_eq!(format_phone_number("09171234567"), "+639171234567");
        assert_eq!(format_phone_number("639171234567"), "+639171234567");
        assert_eq!(format_phone_number("+639171234567"), "+639171234567");
        assert_eq!(format_phone_number("9171234567"), "+639171234567");
    }

    #[test]
    fn strips_separators() {
        assert_eq!(format_phone_number("0917-123 4567"), "+639171234567");
        assert_eq!(format_phone_number("(0917) 123-4567"), "+639171234567");
    }
}
