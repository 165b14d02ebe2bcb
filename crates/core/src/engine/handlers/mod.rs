//! One handler per intent. Handlers are pure functions over a published
//! snapshot; failures are returned as data (`success = false`), never raised,
//! so the caller can route to a heavier resolver.

pub mod budget;
pub mod category;
pub mod comparison;
pub mod multi;
pub mod single;

use crate::domain::price::PriceEntry;
use crate::engine::cache::Snapshot;
use crate::engine::normalize;
use std::sync::Arc;

/// Resolve a free-text token to its first cached entry: recognized lexicon
/// term first, then the token itself as a direct key (covers full source
/// names the lexicon does not know).
pub(crate) fn resolve_token(snapshot: &Snapshot, token: &str) -> Option<Arc<PriceEntry>> {
    if let Some(canonical) = normalize::extract_commodity(token) {
        if let Some(entry) = snapshot.lookup(canonical).first() {
            return Some(entry.clone());
        }
    }
    snapshot.lookup(token).first().cloned()
}

/// Strip every listed word from the token, whole-word, dropping punctuation
/// and collapsing whitespace.
pub(crate) fn strip_words(token: &str, words: &[&str]) -> String {
    token
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|w| !w.is_empty() && !words.contains(w))
        .collect::<Vec<_>>()
        .join(" ")
}
