use crate::domain::price::{AnswerItem, QueryResult};
use crate::engine::cache::Snapshot;
use crate::engine::{format, normalize};

const METHOD: &str = "cache";

pub const NOT_FOUND_MSG: &str = "Pasensya po, walang nakitang presyo para sa produktong iyan.";

/// Fast single-commodity lookup. A miss is the expected signal for the caller
/// to try the heavier resolution path.
pub fn handle(snapshot: &Snapshot, query: &str) -> QueryResult {
    let Some(canonical) = normalize::extract_commodity(query) else {
        return QueryResult::failure(query, METHOD, NOT_FOUND_MSG.to_string());
    };

    let entries = snapshot.lookup(canonical);
    if entries.is_empty() {
        return QueryResult::failure(query, METHOD, NOT_FOUND_MSG.to_string());
    }

    // Prefer an observation from the region the query names; otherwise take
    // the first variant, which the source lists as the most common one.
    let region = normalize::extract_region(query);
    let entry = region
        .and_then(|r| entries.iter().find(|e| e.location == r))
        .unwrap_or(&entries[0]);

    let name = normalize::tagalog_display_name(&entry.commodity);
    let unit = format::detect_unit(&entry.specification);
    let mut answer = format!(
        "Sa petsang {}, ang presyo ng {} ay {} {} sa {}.",
        format::format_date(entry.date),
        name,
        format::peso(entry.price),
        unit,
        entry.location,
    );

    if !entry.specification.is_empty()
        && !entry.specification.eq_ignore_ascii_case(&entry.commodity)
    {
        let spec = format::localize_specification(&entry.specification);
        answer.push_str(&format!(" ({spec})"));
    }

    let mut result = QueryResult::new(query, METHOD, answer);
    result.items = vec![AnswerItem {
        product: name,
        price: Some(entry.price),
        unit: Some(unit.to_string()),
    }];
    result
}
