use crate::domain::price::{AnswerItem, QueryResult};
use crate::engine::cache::Snapshot;
use crate::engine::handlers::{resolve_token, strip_words};
use crate::engine::lexicon::STOP_WORDS;
use crate::engine::{format, normalize};

const METHOD: &str = "multi_product";

/// "kamatis, sibuyas, bawang" — one line per item plus a running total.
/// Unresolved items are listed with an explicit marker, never dropped.
pub fn handle(snapshot: &Snapshot, query: &str) -> QueryResult {
    let lower = query.to_lowercase();
    let normalized = lower.replace(" at ", ",").replace(" and ", ",");

    let candidates: Vec<String> = normalized
        .split(',')
        .map(|part| strip_words(part, STOP_WORDS))
        .filter(|part| !part.is_empty())
        .collect();

    if candidates.is_empty() {
        return QueryResult::failure(
            query,
            METHOD,
            "Walang nakitang produkto sa tanong.".to_string(),
        );
    }

    let mut lines = Vec::with_capacity(candidates.len());
    let mut items = Vec::with_capacity(candidates.len());
    let mut total = 0.0;
    let mut resolved = 0usize;

    for candidate in &candidates {
        match resolve_token(snapshot, candidate) {
            Some(entry) => {
                let name = normalize::tagalog_display_name(&entry.commodity);
                let unit = format::detect_unit(&entry.specification);
                lines.push(format!("\u{2022} {}: {} {}", name, format::peso(entry.price), unit));
                items.push(AnswerItem {
                    product: name,
                    price: Some(entry.price),
                    unit: Some(unit.to_string()),
                });
                total += entry.price;
                resolved += 1;
            }
            None => {
                lines.push(format!("\u{2022} {candidate}: Hindi available"));
                items.push(AnswerItem {
                    product: candidate.clone(),
                    price: None,
                    unit: None,
                });
            }
        }
    }

    let region = normalize::region_or_default(query);
    let mut answer = format!("Narito ang mga presyo sa {region}:\n\n{}", lines.join("\n"));
    if resolved > 1 {
        answer.push_str(&format!("\n\nKabuuang presyo: {}", format::peso(total)));
    }

    let mut result = QueryResult::new(query, METHOD, answer);
    result.items = items;
    result.total = Some(total);
    result.items_count = Some(resolved);
    result
}
