//! Heuristic intent classification. Rules are evaluated top to bottom and the
//! first match wins; comparison and budget markers are higher-precision
//! signals, so they are checked before the looser comma/conjunction rule that
//! would otherwise misclassify "cheaper, onion or garlic?" as multi-product.

use crate::domain::price::QueryIntent;
use crate::engine::normalize;

const COMPARISON_MARKERS: &[&str] = &[
    "mas mura",
    "mas mahal",
    "compare",
    "alin",
    "sino",
    "cheaper",
    "more expensive",
    "which",
    "who",
];

const BUDGET_MARKERS: &[&str] = &["pwede", "bilhin", "buy", "budget", "afford"];

const AMOUNT_WORDS: &[&str] = &["piso", "peso"];

const CATEGORY_MARKERS: &[&str] = &["lahat", "all", "mga"];

const CONJUNCTIONS: &[&str] = &[" at ", " and "];

pub fn classify(query: &str) -> QueryIntent {
    let lower = query.to_lowercase();

    if COMPARISON_MARKERS.iter().any(|m| lower.contains(m)) {
        return QueryIntent::Comparison;
    }

    let has_amount = normalize::first_amount(&lower).is_some()
        || AMOUNT_WORDS.iter().any(|w| lower.contains(w));
    if has_amount && BUDGET_MARKERS.iter().any(|m| lower.contains(m)) {
        return QueryIntent::Budget;
    }

    if CATEGORY_MARKERS.iter().any(|m| lower.contains(m)) && !lower.contains(',') {
        return QueryIntent::Category;
    }

    if lower.contains(',') || CONJUNCTIONS.iter().any(|c| lower.contains(c)) {
        return QueryIntent::Multi;
    }

    QueryIntent::Single
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_lookup_is_single() {
        assert_eq!(classify("magkano kamatis"), QueryIntent::Single);
        assert_eq!(classify("price of rice"), QueryIntent::Single);
    }

    #[test]
    fn comma_list_is_multi() {
        assert_eq!(classify("kamatis, sibuyas, bawang"), QueryIntent::Multi);
        assert_eq!(classify("kamatis at sibuyas"), QueryIntent::Multi);
    }

    #[test]
    fn comparison_wins_over_multi() {
        assert_eq!(classify("ano mas mura, manok o baboy?"), QueryIntent::Comparison);
        assert_eq!(classify("cheaper, onion or garlic?"), QueryIntent::Comparison);
    }

    #[test]
    fn budget_needs_amount_and_marker() {
        assert_eq!(classify("ano pwede bilhin ng 100 pesos?"), QueryIntent::Budget);
        // Amount without a budget marker falls through.
        assert_eq!(classify("500 kamatis"), QueryIntent::Single);
        // Marker without an amount falls through.
        assert_eq!(classify("ano pwedeng ulam"), QueryIntent::Single);
    }

    #[test]
    fn all_marker_without_comma_is_category() {
        assert_eq!(classify("presyo ng lahat ng gulay"), QueryIntent::Category);
        assert_eq!(classify("all fish prices"), QueryIntent::Category);
    }

    #[test]
    fn all_marker_with_comma_is_not_category() {
        assert_eq!(classify("lahat ng kamatis, sibuyas"), QueryIntent::Multi);
    }

    #[test]
    fn classification_is_deterministic() {
        let q = "ano mas mura, manok o baboy?";
        assert_eq!(classify(q), classify(q));
    }
}
