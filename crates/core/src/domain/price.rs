use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One priced observation for a commodity on a date, as loaded from the
/// backing store. Immutable once inside a snapshot; the whole set is replaced
/// on every refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceEntry {
    pub commodity: String,
    pub price: f64,
    #[serde(default)]
    pub specification: String,
    #[serde(default = "default_unit")]
    pub unit: String,
    /// Observation date. Absence defaults to "today" at render time only.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default = "default_location")]
    pub location: String,
    #[serde(default)]
    pub category: String,
}

fn default_unit() -> String {
    "kg".to_string()
}

fn default_location() -> String {
    crate::engine::lexicon::DEFAULT_REGION.to_string()
}

/// The classified purpose of a query. Produced once per incoming query and
/// used for dispatch only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryIntent {
    Single,
    Multi,
    Comparison,
    Budget,
    Category,
}

impl QueryIntent {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryIntent::Single => "single",
            QueryIntent::Multi => "multi_product",
            QueryIntent::Comparison => "comparison",
            QueryIntent::Budget => "budget",
            QueryIntent::Category => "category",
        }
    }
}

/// One resolved (or explicitly unresolved) line in a multi-entity answer.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerItem {
    pub product: String,
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// Uniform result shape shared by every intent handler.
#[derive(Debug, Clone, Serialize)]
pub struct QueryResult {
    pub success: bool,
    pub query: String,
    pub answer: String,
    pub method: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<AnswerItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items_count: Option<usize>,
}

impl QueryResult {
    pub fn new(query: &str, method: &'static str, answer: String) -> Self {
        Self {
            success: true,
            query: query.to_string(),
            answer,
            method,
            items: Vec::new(),
            total: None,
            budget: None,
            category: None,
            items_count: None,
        }
    }

    pub fn failure(query: &str, method: &'static str, answer: String) -> Self {
        Self {
            success: false,
            ..Self::new(query, method, answer)
        }
    }
}

/// Outcome of the cheap resolution pipeline. `Unresolved` carries the
/// translated query so the caller can hand it to a heavier resolver; this
/// crate never invokes one itself.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "resolution", rename_all = "snake_case")]
pub enum Resolution {
    Resolved(QueryResult),
    Unresolved {
        translated_query: String,
        #[serde(flatten)]
        result: QueryResult,
    },
}

impl Resolution {
    pub fn result(&self) -> &QueryResult {
        match self {
            Resolution::Resolved(r) => r,
            Resolution::Unresolved { result, .. } => result,
        }
    }
}

/// Metadata carried alongside a published snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotInfo {
    pub last_refreshed: Option<DateTime<Utc>>,
    pub entries: usize,
    pub keys: usize,
}
