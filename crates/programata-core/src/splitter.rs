//! Fallback title/description splitter for link text without a `<strong>` title.
//!
//! An ordered cascade of rules, first hit wins. Genre vocabulary is the
//! listing site's Bulgarian category words. Team matchups ("Левски - ЦСКА")
//! carry a bare dash but are one title: the generic rule only accepts a split
//! when the right-hand side reads like the start of a description.

use once_cell::sync::Lazy;
use regex::Regex;

/// Category words that open a description on the listing site.
pub(crate) const DESC_KEYWORDS: [&str; 11] = [
    "Спорт",
    "Повторение",
    "Документален",
    "Сериал",
    "Волейбол",
    "Футбол",
    "Баскетбол",
    "Хокей",
    "Анимация",
    "Ток шоу",
    "Криминале",
];

static KEYWORD_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    DESC_KEYWORDS
        .iter()
        .map(|kw| Regex::new(&format!(r"-\s+{}\b", regex::escape(kw))).unwrap())
        .collect()
});

static LEAD_WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"-\s+(Повторение|На\s+живо|Голямо|Малко|Премиера)").unwrap());

// A capitalized word followed by a period, e.g. "Драма." — the shape a
// description sentence starts with.
static SENTENCE_START_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-ZА-Я][a-zа-я]+\.").unwrap());

/// Split free link text into (title, description).
pub fn split_title_description(full_text: &str) -> (String, Option<String>) {
    for rule in [keyword_rule, lead_word_rule, generic_dash_rule] {
        if let Some((title, description)) = rule(full_text) {
            return (title, Some(description));
        }
    }
    (full_text.trim().to_string(), None)
}

/// Rule 1: dash followed by a known genre/category keyword.
pub(crate) fn keyword_rule(text: &str) -> Option<(String, String)> {
    for re in KEYWORD_RES.iter() {
        if let Some(m) = re.find(text) {
            return Some(split_at_dash(text, m.start()));
        }
    }
    None
}

/// Rule 2: dash followed by a typical description lead word.
pub(crate) fn lead_word_rule(text: &str) -> Option<(String, String)> {
    LEAD_WORD_RE.find(text).map(|m| split_at_dash(text, m.start()))
}

/// Rule 3: generic " - " separator, rightmost occurrence, accepted only when
/// the right side starts like a sentence or with a keyword.
pub(crate) fn generic_dash_rule(text: &str) -> Option<(String, String)> {
    let at = text.rfind(" - ")?;
    let title = text[..at].trim();
    let rest = text[at + " - ".len()..].trim();
    if SENTENCE_START_RE.is_match(rest) || DESC_KEYWORDS.iter().any(|kw| rest.starts_with(kw)) {
        Some((title.to_string(), rest.to_string()))
    } else {
        None
    }
}

fn split_at_dash(text: &str, dash_at: usize) -> (String, String) {
    // dash_at points at the '-'; the description keeps everything after it.
    (
        text[..dash_at].trim().to_string(),
        text[dash_at + 1..].trim().to_string(),
    )
}
