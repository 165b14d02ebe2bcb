use crate::domain::price::{AnswerItem, QueryResult};
use crate::engine::cache::Snapshot;
use crate::engine::lexicon::{Category, ALL_CATEGORIES_DISPLAY, ALL_CATEGORIES_LABEL, CATEGORIES};
use crate::engine::{format, normalize};

const METHOD: &str = "category";

const TOP_N: usize = 15;

/// "presyo ng lahat ng gulay" — every cached entry in the named category,
/// cheapest first. An unrecognized category term falls back to the
/// all-categories view rather than failing.
pub fn handle(snapshot: &Snapshot, query: &str) -> QueryResult {
    let lower = query.to_lowercase();

    let detected: Option<&Category> = CATEGORIES.iter().find(|c| {
        lower.contains(c.label) || c.query_keywords.iter().any(|kw| lower.contains(kw))
    });

    let (label, display) = match detected {
        Some(c) => (c.label, c.display),
        None => (ALL_CATEGORIES_LABEL, ALL_CATEGORIES_DISPLAY),
    };

    let mut matched: Vec<_> = snapshot
        .all_entries()
        .iter()
        .filter(|entry| match detected {
            Some(c) => {
                let field = entry.category.to_lowercase();
                c.field_markers.iter().any(|m| field.contains(m))
            }
            None => true,
        })
        .cloned()
        .collect();

    if matched.is_empty() {
        let mut result = QueryResult::new(
            query,
            METHOD,
            format!("Walang nakitang produkto sa kategoryang '{label}'."),
        );
        result.category = Some(label.to_string());
        result.items_count = Some(0);
        return result;
    }

    matched.sort_by(|a, b| a.price.total_cmp(&b.price));
    matched.truncate(TOP_N);

    let region = normalize::region_or_default(query);
    let mut answer = format!("**Presyo ng {display} sa {region}:**\n\n");
    let mut items = Vec::with_capacity(matched.len());

    for (idx, entry) in matched.iter().enumerate() {
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

    let mut result = QueryResult::new(query, METHOD, answer);
    result.items = items;
    result.category = Some(label.to_string());
    result.items_count = Some(matched.len());
    result
}
