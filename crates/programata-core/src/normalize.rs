//! Title canonicalization for catalog matching.
//!
//! Matching is deliberately aggressive: punctuation and case are thrown away
//! so scraping noise cannot break a lookup, at the accepted risk of merging
//! titles that differ only in punctuation. Ambiguity is handled downstream by
//! the exactly-one rule on the (year, key) index.

use once_cell::sync::Lazy;
use regex::Regex;

static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(19|20)\d{2}").unwrap());

// Alternation order matters: the abbreviated forms with a dot come before the
// bare ones so "сез." is not half-consumed by "сез".
static EPISODE_SUFFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)[, ]*(сез\.|сезон|сез|еп\.|епизод|еп)\s*\d+.*$").unwrap()
});

/// Canonical matching key: lowercase, every non-alphanumeric character becomes
/// a space, whitespace runs collapse, ends trimmed.
pub fn normalize_title(text: &str) -> String {
    let mut cleaned = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch.is_alphanumeric() {
            cleaned.extend(ch.to_lowercase());
        } else {
            cleaned.push(' ');
        }
    }
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Remove a trailing season/episode marker ("сезон 3", "еп. 12 ...") so a
/// series episode still matches its base catalog title.
pub fn strip_episode_suffix(title: &str) -> String {
    EPISODE_SUFFIX_RE.replace(title, "").trim().to_string()
}

/// First 19xx/20xx substring in the text, if any.
///
/// Only the first match is taken; a description carrying two years (remake
/// references) resolves to the earlier-positioned one.
pub fn extract_year(text: &str) -> Option<String> {
    YEAR_RE.find(text).map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize_title("Джурасик парк III: Изгубеният свят!");
        assert_eq!(normalize_title(&once), once);
    }

    #[test]
    fn test_normalize_case_and_punctuation_insensitive() {
        assert_eq!(normalize_title("Jaws!"), normalize_title("jaws"));
        assert_eq!(normalize_title("Казабланка..."), normalize_title("КАЗАБЛАНКА"));
    }

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize_title("  The   Good, the Bad "), "the good the bad");
    }

    #[test]
    fn test_normalize_empty_for_pure_punctuation() {
        assert_eq!(normalize_title("?!...--"), "");
    }

    #[test]
    fn test_strip_episode_suffix_full_word() {
        assert_eq!(strip_episode_suffix("Шоуто, сезон 3"), "Шоуто");
    }

    #[test]
    fn test_strip_episode_suffix_abbreviations() {
        assert_eq!(strip_episode_suffix("Под прикритие сез. 2"), "Под прикритие");
        assert_eq!(strip_episode_suffix("Под прикритие, еп. 14"), "Под прикритие");
        assert_eq!(strip_episode_suffix("Сага ЕПИЗОД 5 - финал"), "Сага");
    }

    #[test]
    fn test_strip_episode_suffix_leaves_plain_titles() {
        assert_eq!(strip_episode_suffix("Касабланка"), "Касабланка");
    }

    #[test]
    fn test_extract_year_finds_embedded_year() {
        assert_eq!(extract_year("драма, 1942, САЩ").as_deref(), Some("1942"));
        assert_eq!(extract_year("премиера 2019").as_deref(), Some("2019"));
    }

    #[test]
    fn test_extract_year_takes_first_of_two() {
        // Documented limitation: the first year wins, even for remakes.
        assert_eq!(
            extract_year("римейк от 2004 на класиката от 1975").as_deref(),
            Some("2004")
        );
    }

    #[test]
    fn test_extract_year_none_without_year() {
        assert_eq!(extract_year("спортно предаване"), None);
        assert_eq!(extract_year("епизод 1843"), None);
    }
}
