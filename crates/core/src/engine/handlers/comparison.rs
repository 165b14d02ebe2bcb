use crate::domain::price::{AnswerItem, PriceEntry, QueryResult};
use crate::engine::cache::Snapshot;
use crate::engine::handlers::{resolve_token, strip_words};
use crate::engine::lexicon::COMPARISON_FILLERS;
use crate::engine::{format, normalize};
use std::sync::Arc;

const METHOD: &str = "comparison";

/// "ano mas mura, manok o baboy?" — rank both sides by price and report the
/// extremes plus their difference. Requires at least two resolved entries.
pub fn handle(snapshot: &Snapshot, query: &str) -> QueryResult {
    let lower = query.to_lowercase().replace(" or ", " o ");

    let candidates: Vec<String> = lower
        .split(" o ")
        .flat_map(|side| side.split(','))
        .map(|side| strip_words(side, COMPARISON_FILLERS))
        .filter(|side| !side.is_empty())
        .collect();

    if candidates.len() < 2 {
        return QueryResult::failure(
            query,
            METHOD,
            "Kailangan ng dalawa o higit pang produkto para sa comparison.".to_string(),
        );
    }

    let mut resolved: Vec<Arc<PriceEntry>> = Vec::with_capacity(candidates.len());
    for candidate in &candidates {
        if let Some(entry) = resolve_token(snapshot, candidate) {
            resolved.push(entry);
        }
    }

    if resolved.len() < 2 {
        return QueryResult::failure(
            query,
            METHOD,
            "Hindi nakita ang ilan sa mga produkto.".to_string(),
        );
    }

    // Stable sort: entries with equal prices keep their query order.
    resolved.sort_by(|a, b| a.price.total_cmp(&b.price));
    let cheapest = &resolved[0];
    let most_expensive = &resolved[resolved.len() - 1];

    let mut answer = format!(
        "**Pinakamura:** {} - {} {}\n\n**Pinakamahal:** {} - {} {}\n\n**Buong listahan:**\n",
        normalize::tagalog_display_name(&cheapest.commodity),
        format::peso(cheapest.price),
        format::detect_unit(&cheapest.specification),
        normalize::tagalog_display_name(&most_expensive.commodity),
        format::peso(most_expensive.price),
        format::detect_unit(&most_expensive.specification),
    );

    let mut items = Vec::with_capacity(resolved.len());
    for (idx, entry) in resolved.iter().enumerate() {
        let name = normalize::tagalog_display_name(&entry.commodity);
        let unit = format::detect_unit(&entry.specification);
        answer.push_str(&format!(
            "{}. {}: {} {}\n",
            idx + 1,
            name,
            format::peso(entry.price),
            unit
        ));
        items.push(AnswerItem {
            product: name,
            price: Some(entry.price),
            unit: Some(unit.to_string()),
        });
    }

    let difference = most_expensive.price - cheapest.price;
    answer.push_str(&format!("\nDifference: {}", format::peso(difference)));

    let mut result = QueryResult::new(query, METHOD, answer);
    result.items = items;
    result.items_count = Some(resolved.len());
    result
}
