//! Entity extraction over the static lexicon. All matching is case-insensitive
//! and deterministic: tables are scanned in declaration order and the first
//! match wins.

use crate::engine::lexicon::{
    COMMODITY_PAIRS, DEFAULT_REGION, PHRASE_PAIRS, REGION_ALIASES,
};

/// Extract the canonical (English) commodity token named by the text, if any.
/// Tagalog terms are scanned first, then English ones; substring matches are
/// accepted on purpose so "kamatis?" still resolves.
pub fn extract_commodity(text: &str) -> Option<&'static str> {
    let lower = text.to_lowercase();

    for &(tagalog, english) in COMMODITY_PAIRS {
        if lower.contains(tagalog) {
            return Some(english);
        }
    }
    for &(_, english) in COMMODITY_PAIRS {
        if lower.contains(english) {
            return Some(english);
        }
    }
    None
}

/// Extract the canonical region named by the text. Aliases are whole-word
/// matched so "pasay" does not fire inside an unrelated word.
pub fn extract_region(text: &str) -> Option<&'static str> {
    let lower = text.to_lowercase();
    for &(alias, region) in REGION_ALIASES {
        if contains_word(&lower, alias) {
            return Some(region);
        }
    }
    None
}

pub fn region_or_default(text: &str) -> &'static str {
    extract_region(text).unwrap_or(DEFAULT_REGION)
}

/// Replace every recognized Tagalog term (commodities and price phrases) with
/// its English counterpart, whole-word, case-insensitive. The result feeds the
/// heavier fallback path when the cache cannot answer.
pub fn translate(text: &str) -> String {
    let mut out = text.to_lowercase();
    for &(tagalog, english) in COMMODITY_PAIRS.iter().chain(PHRASE_PAIRS) {
        out = replace_word(&out, tagalog, english);
    }
    out
}

/// First numeric literal (integer or decimal) in the text, for budget queries.
pub fn first_amount(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i].is_ascii_digit() {
            let start = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            if i + 1 < bytes.len() && bytes[i] == b'.' && bytes[i + 1].is_ascii_digit() {
                i += 1;
                while i < bytes.len() && bytes[i].is_ascii_digit() {
                    i += 1;
                }
            }
            return text[start..i].parse::<f64>().ok();
        }
        i += 1;
    }
    None
}

/// Tagalog display name for a canonical English commodity, falling back to the
/// input when no translation exists.
pub fn tagalog_display_name(commodity: &str) -> String {
    let lower = commodity.to_lowercase();
    for &(tagalog, english) in COMMODITY_PAIRS {
        if lower.contains(english) {
            return tagalog.to_string();
        }
    }
    commodity.to_string()
}

/// Whole-word containment check. `needle` may itself contain spaces
/// ("quezon city"); both sides are expected lower-cased already.
pub fn contains_word(haystack: &str, needle: &str) -> bool {
    find_word(haystack, needle, 0).is_some()
}

fn find_word(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    let mut search_at = from;
    while let Some(rel) = haystack[search_at..].find(needle) {
        let start = search_at + rel;
        let end = start + needle.len();
        let before_ok = start == 0
            || !haystack[..start]
                .chars()
                .next_back()
                .is_some_and(|c| c.is_alphanumeric());
        let after_ok = end == haystack.len()
            || !haystack[end..]
                .chars()
                .next()
                .is_some_and(|c| c.is_alphanumeric());
        if before_ok && after_ok {
            return Some(start);
        }
        search_at = end;
    }
    None
}

fn replace_word(text: &str, from: &str, to: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    while let Some(start) = find_word(text, from, cursor) {
        out.push_str(&text[cursor..start]);
        out.push_str(to);
        cursor = start + from.len();
    }
    out.push_str(&text[cursor..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_tagalog_commodity_as_english() {
        assert_eq!(extract_commodity("magkano ang kamatis?"), Some("tomato"));
        assert_eq!(extract_commodity("Presyo ng MANOK"), Some("chicken"));
    }

    #[test]
    fn extracts_english_commodity() {
        assert_eq!(extract_commodity("how much is garlic"), Some("garlic"));
    }

    #[test]
    fn first_lexicon_match_wins() {
        // Both tomato and onion appear; kamatis is declared first.
        assert_eq!(extract_commodity("kamatis o sibuyas"), Some("tomato"));
    }

    #[test]
    fn unknown_commodity_is_none() {
        assert_eq!(extract_commodity("magandang umaga po"), None);
    }

    #[test]
    fn region_is_whole_word_matched() {
        assert_eq!(extract_region("presyo sa pasig"), Some("NCR"));
        assert_eq!(extract_region("presyo sa calamba city"), Some("Laguna"));
        // "bay" (Laguna) must not fire inside another word.
        assert_eq!(extract_region("kumusta ang baybayin"), None);
    }

    #[test]
    fn region_defaults_to_ncr() {
        assert_eq!(region_or_default("magkano kamatis"), "NCR");
    }

    #[test]
    fn translates_whole_words_only() {
        assert_eq!(translate("magkano ang kamatis sa pasig"), "how much ang tomato sa pasig");
        // "mais" must not be rewritten inside "kamais" (not a word here).
        assert_eq!(translate("kamatis"), "tomato");
    }

    #[test]
    fn first_amount_parses_integers_and_decimals() {
        assert_eq!(first_amount("ano pwede bilhin ng 100 pesos?"), Some(100.0));
        assert_eq!(first_amount("budget ko ay 75.50"), Some(75.5));
        assert_eq!(first_amount("walang numero dito"), None);
    }

    #[test]
    fn display_name_round_trips_to_tagalog() {
        assert_eq!(tagalog_display_name("Tomato"), "kamatis");
        assert_eq!(tagalog_display_name("Regular Milled Rice"), "bigas");
        assert_eq!(tagalog_display_name("Dragonfruit"), "Dragonfruit");
    }
}
