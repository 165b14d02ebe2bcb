//! Shared presentation helpers: unit inference, Tagalog dates, peso amounts,
//! and SMS-length truncation. Stateless.

use chrono::NaiveDate;

/// Specification keyword -> Tagalog unit phrase. Checked in this fixed
/// priority order; first match wins, else per-kilogram.
const UNIT_TABLE: &[(&str, &str)] = &[
    ("piece", "bawat piraso"),
    ("/pc", "bawat piraso"),
    ("bundle", "bawat tali"),
    ("bottle", "bawat bote"),
    ("head", "bawat ulo"),
    ("liter", "bawat litro"),
];

pub const DEFAULT_UNIT: &str = "bawat kilo";

pub fn detect_unit(specification: &str) -> &'static str {
    let lower = specification.to_lowercase();
    for &(keyword, unit) in UNIT_TABLE {
        if lower.contains(keyword) {
            return unit;
        }
    }
    DEFAULT_UNIT
}

const TAGALOG_MONTHS: [&str; 12] = [
    "Enero",
    "Pebrero",
    "Marso",
    "Abril",
    "Mayo",
    "Hunyo",
    "Hulyo",
    "Agosto",
    "Setyembre",
    "Oktubre",
    "Nobyembre",
    "Disyembre",
];

/// "Disyembre 5" for a known date, "ngayong araw" when the entry carries none.
/// Missing dates default at render time, never in the stored entry.
pub fn format_date(date: Option<NaiveDate>) -> String {
    use chrono::Datelike;
    match date {
        Some(d) => format!("{} {}", TAGALOG_MONTHS[d.month0() as usize], d.day()),
        None => "ngayong araw".to_string(),
    }
}

pub fn peso(amount: f64) -> String {
    format!("\u{20b1}{amount:.2}")
}

/// Localize a free-text specification for display. Only the qualifiers the
/// source data actually uses are rewritten.
pub fn localize_specification(specification: &str) -> String {
    specification
        .replace("local", "lokal")
        .replace("Local", "Lokal")
}

/// Truncate to a single SMS segment, preferring a sentence or clause boundary
/// in the back half of the budget over a hard cut.
pub fn truncate_for_sms(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }

    let budget = max_len.saturating_sub(3);
    let cut: String = text.chars().take(budget).collect();

    if let Some(pos) = cut.rfind('.') {
        if pos > max_len / 2 {
            return cut[..=pos].to_string();
        }
    }
    if let Some(pos) = cut.rfind(',') {
        if pos > max_len / 2 {
            return format!("{}...", &cut[..pos]);
        }
    }
    format!("{cut}...")
}

pub const SMS_MAX_LEN: usize = 160;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_table_order_is_fixed() {
        assert_eq!(detect_unit("grams/pc"), "bawat piraso");
        assert_eq!(detect_unit("per piece, bundled"), "bawat piraso");
        assert_eq!(detect_unit("3 bundles"), "bawat tali");
        assert_eq!(detect_unit("330ml/bottle"), "bawat bote");
        assert_eq!(detect_unit("per head"), "bawat ulo");
        assert_eq!(detect_unit("1 liter"), "bawat litro");
        assert_eq!(detect_unit("Regular Milled"), "bawat kilo");
        assert_eq!(detect_unit(""), "bawat kilo");
    }

    #[test]
    fn dates_render_in_tagalog() {
        let d = NaiveDate::from_ymd_opt(2025, 12, 5).unwrap();
        assert_eq!(format_date(Some(d)), "Disyembre 5");
        assert_eq!(format_date(None), "ngayong araw");
    }

    #[test]
    fn peso_is_two_decimals_with_glyph() {
        assert_eq!(peso(45.0), "\u{20b1}45.00");
        assert_eq!(peso(117.005), "\u{20b1}117.00");
    }

    #[test]
    fn short_text_passes_through() {
        assert_eq!(truncate_for_sms("maikli lang", 160), "maikli lang");
    }

    #[test]
    fn long_text_cuts_at_sentence_boundary() {
        let text = format!("{}. {}", "a".repeat(100), "b".repeat(100));
        let out = truncate_for_sms(&text, 160);
        assert_eq!(out, format!("{}.", "a".repeat(100)));
    }

    #[test]
    fn hard_cut_appends_ellipsis() {
        let text = "x".repeat(200);
        let out = truncate_for_sms(&text, 160);
        assert_eq!(out.len(), 160);
        assert!(out.ends_with("..."));
    }
}
