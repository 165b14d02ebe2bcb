use crate::domain::price::PriceEntry;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day of the published price index, as served by the external feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyPricesResponse {
    pub as_of_date: NaiveDate,
    pub items: Vec<PriceEntry>,
}
