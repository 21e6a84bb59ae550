//! Schedule HTML parser: table rows in, ordered program entries out.
//!
//! Never errors on malformed input. A row is a program only when it links to
//! a show-detail page and its first cell is an HH:MM time; everything else is
//! skipped row by row.

use programata_models::ProgramEntry;
use tracing::trace;

use crate::html::{inner_after_open_tag, next_tag_block, strip_tags, tag_attr, to_lower};
use crate::splitter::split_title_description;

const DETAIL_PATH: &str = "/predavane/";

/// Extract all program entries from one channel/day page.
///
/// The page is lowered once up front; all tag scanning runs on aligned
/// (source, lowered) slice pairs, so one pass over the document is linear.
pub fn parse_programs(html: &str) -> Vec<ProgramEntry> {
    let lower = to_lower(html);
    let mut programs = Vec::new();
    let mut pos = 0;
    while let Some((start, end)) = next_tag_block(html, &lower, "<tr", "</tr>", pos) {
        pos = end;
        if let Some(entry) = parse_row(&html[start..end], &lower[start..end]) {
            programs.push(entry);
        }
    }
    trace!("Parsed {} program rows", programs.len());
    programs
}

fn parse_row(row: &str, row_lower: &str) -> Option<ProgramEntry> {
    let (link, link_lower) = find_detail_link(row, row_lower)?;

    let (td_start, td_end) = next_tag_block(row, row_lower, "<td", "</td>", 0)?;
    let time_text = strip_tags(inner_after_open_tag(&row[td_start..td_end]));
    if !is_time_format(&time_text) {
        return None;
    }

    let (title, description) = link_title_description(link, link_lower);
    Some(ProgramEntry::new(time_text, title, description))
}

/// The first anchor in the row whose href points at a show-detail page.
fn find_detail_link<'a>(row: &'a str, row_lower: &'a str) -> Option<(&'a str, &'a str)> {
    let mut from = 0;
    while let Some((start, end)) = next_tag_block(row, row_lower, "<a", "</a>", from) {
        from = end;
        let block = &row[start..end];
        // "<a" also matches "<abbr"; require a real anchor tag
        if !matches!(block[2..].chars().next(), Some(c) if c.is_whitespace() || c == '>') {
            continue;
        }
        if let Some(href) = tag_attr(block, "href") {
            if href.contains(DETAIL_PATH) {
                return Some((block, &row_lower[start..end]));
            }
        }
    }
    None
}

/// Title and description from the link content. A `<strong>` child is the
/// structural signal for the title; without one the heuristic splitter runs.
fn link_title_description(link: &str, link_lower: &str) -> (String, Option<String>) {
    let inner = inner_after_open_tag(link);
    let inner_lower = inner_after_open_tag(link_lower);
    if let Some((s, e)) = next_tag_block(inner, inner_lower, "<strong", "</strong>", 0) {
        let title = strip_tags(&inner[s..e]);
        let mut remainder = String::with_capacity(inner.len());
        remainder.push_str(&inner[..s]);
        remainder.push_str(&inner[e..]);
        let description = strip_tags(&remainder);
        let description = description
            .trim_start_matches([',', '-', ' '])
            .trim()
            .to_string();
        let description = (!description.is_empty()).then_some(description);
        (title, description)
    } else {
        split_title_description(&strip_tags(inner))
    }
}

/// Two colon-separated integer groups, e.g. "20:00". Anything else in the
/// first cell ("Програма", ordering markers) disqualifies the row.
fn is_time_format(text: &str) -> bool {
    let mut parts = text.splitn(3, ':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(h), Some(m), None) => {
            h.trim().parse::<u32>().is_ok() && m.trim().parse::<u32>().is_ok()
        }
        _ => false,
    }
}
