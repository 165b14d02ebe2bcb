use crate::domain::price::{AnswerItem, QueryResult};
use crate::engine::cache::Snapshot;
use crate::engine::{format, normalize};

const METHOD: &str = "budget";

/// Response size bound for full-cache scans.
const TOP_N: usize = 10;

/// "ano pwede bilhin ng 500 pesos?" — everything priced within the budget,
/// cheapest first, with the affordable quantity when more than one fits.
pub fn handle(snapshot: &Snapshot, query: &str) -> QueryResult {
    let Some(budget) = normalize::first_amount(query) else {
        return QueryResult::failure(query, METHOD, "Hindi nakita ang budget amount.".to_string());
    };

    let mut affordable: Vec<_> = snapshot
        .all_entries()
        .iter()
        .filter(|e| e.price > 0.0 && e.price <= budget)
        .cloned()
        .collect();

    if affordable.is_empty() {
        // Nothing within budget is still an answer, not an error.
        let mut result = QueryResult::new(
            query,
            METHOD,
            format!(
                "Walang produkto na mas mababa sa {} sa database.",
                format::peso(budget)
            ),
        );
        result.budget = Some(budget);
        result.items_count = Some(0);
        return result;
    }

    affordable.sort_by(|a, b| a.price.total_cmp(&b.price));
    affordable.truncate(TOP_N);

    let mut answer = format!("**Pwede mong bilhin ng {}:**\n\n", format::peso(budget));
    let mut items = Vec::with_capacity(affordable.len());

    for (idx, entry) in affordable.iter().enumerate() {
        let name = normalize::tagalog_display_name(&entry.commodity);
        let unit = format::detect_unit(&entry.specification);
        let quantity = (budget / entry.price).floor() as u64;

        answer.push_str(&format!(
            "{}. {}: {} {}",
            idx + 1,
            name,
            format::peso(entry.price),
            unit
        ));
        if quantity > 1 {
            answer.push_str(&format!(" (Pwede ka bumili ng {quantity} {unit})"));
        }
        answer.push('\n');

        items.push(AnswerItem {
            product: name,
            price: Some(entry.price),
            unit: Some(unit.to_string()),
        });
    }

    let mut result = QueryResult::new(query, METHOD, answer);
    result.items = items;
    result.budget = Some(budget);
    result.items_count = Some(affordable.len());
    result
}
