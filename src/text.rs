//! String cleanup shared by every normalizer: display cleanup, URL slugs and
//! release dates.

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;

pub const WIKI_BASE_URL: &str = "https://oldschool.runescape.wiki/w/";

static ORDINAL_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{1,2})(?:st|nd|rd|th)\b").expect("valid regex"));

/// Formats tried after the strict "25 June 2017" form fails.
const LENIENT_DATE_FORMATS: &[&str] = &[
    "%d %B %Y",
    "%d %b %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%Y-%m-%d",
    "%d/%m/%Y",
    "%Y/%m/%d",
];

/// Remove list and link markup (`*`, `[`, `]`) and surrounding whitespace.
pub fn clean_display_string(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, '*' | '[' | ']'))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Display-cleaned text made safe for a wiki URL path segment.
pub fn url_slug(text: &str) -> String {
    clean_display_string(text)
        .replace(' ', "_")
        .replace('\'', "%27")
        .replace('&', "%26")
        .replace('+', "%2B")
}

/// Full wiki URL for an already-encoded resource path.
pub fn wiki_url(resource: &str) -> String {
    format!("{WIKI_BASE_URL}{resource}")
}

/// Parse an infobox release value such as `[[25 June]] [[2017]]`.
pub fn parse_release_date(raw: Option<&str>) -> Option<NaiveDate> {
    let cleaned: String = raw?.chars().filter(|c| !matches!(c, '[' | ']')).collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }
    parse_strict_date(cleaned).or_else(|| parse_lenient_date(cleaned))
}

/// `%d` takes one or two digits, so "January 2018" would otherwise parse
/// with the year split into day 20 and year 18.
fn has_full_year(date: &NaiveDate) -> bool {
    date.year() >= 1000
}

fn parse_strict_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, "%d %B %Y")
        .ok()
        .filter(has_full_year)
}

fn parse_lenient_date(text: &str) -> Option<NaiveDate> {
    let without_ordinals = ORDINAL_SUFFIX.replace_all(text, "$1");
    let normalized = without_ordinals
        .replace(',', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    LENIENT_DATE_FORMATS
        .iter()
        .find_map(|fmt| {
            NaiveDate::parse_from_str(&normalized, fmt)
                .ok()
                .filter(has_full_year)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_string_cleanup() {
        assert_eq!(clean_display_string("**[[Cook's Assistant]]"), "Cook's Assistant");
        assert_eq!(clean_display_string("  plain  "), "plain");
        assert_eq!(clean_display_string("***"), "");
    }

    #[test]
    fn display_string_is_idempotent() {
        for s in ["**[[Cook's Assistant]]", " [a] * [b] ", "", "]]x[[", "* * *"] {
            let once = clean_display_string(s);
            assert_eq!(clean_display_string(&once), once, "input {s:?}");
        }
    }

    #[test]
    fn slugs() {
        assert_eq!(url_slug("Dragon Slayer II"), "Dragon_Slayer_II");
        assert_eq!(url_slug("Plague's End"), "Plague%27s_End");
        assert_eq!(url_slug("[[Pirate's Treasure & Gold+]]"), "Pirate%27s_Treasure_%26_Gold%2B");
    }

    #[test]
    fn wiki_url_does_not_encode() {
        assert_eq!(
            wiki_url("Cook%27s_Assistant"),
            "https://oldschool.runescape.wiki/w/Cook%27s_Assistant"
        );
    }

    #[test]
    fn release_dates() {
        let expected = NaiveDate::from_ymd_opt(2017, 6, 25);
        assert_eq!(parse_release_date(Some("25 June 2017")), expected);
        assert_eq!(parse_release_date(Some("[[25 June]] [[2017]]")), expected);
        assert_eq!(parse_release_date(Some("June 25th, 2017")), expected);
        assert_eq!(parse_release_date(Some("2017-06-25")), expected);

        let jan_4 = NaiveDate::from_ymd_opt(2018, 1, 4);
        assert_eq!(parse_release_date(Some("4th January 2018")), jan_4);
        assert_eq!(parse_release_date(Some("4 January, 2018")), jan_4);
        assert_eq!(parse_release_date(Some("Jan 4, 2018")), jan_4);
        assert_eq!(parse_release_date(Some("sometime soon")), None);
        // no day: "%B %d %Y" would otherwise read this as 20 January 0018
        assert_eq!(parse_release_date(Some("January 2018")), None);
        assert_eq!(parse_release_date(Some("")), None);
        assert_eq!(parse_release_date(None), None);
    }
}
