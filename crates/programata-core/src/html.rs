//! Minimal tag-scanning helpers for the schedule markup.
//!
//! The listing page is one known table layout, so these byte-offset scanners
//! are all the parser needs; anything malformed simply fails a lookup and the
//! row is skipped. Tag matching is ASCII case-insensitive.

/// ASCII-only lowering: byte offsets stay aligned with the original, so a
/// lowered copy can be sliced with the same ranges as the source.
pub(crate) fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii() { c.to_ascii_lowercase() } else { c })
        .collect()
}

/// Find the next `<open ...> ... close` block at or after `from`.
/// `lower` is the pre-lowered copy of `s` (lowered once per document, the
/// scan itself is linear); `open`/`close` must already be lowercase.
/// Returns byte offsets of the whole block including the closing tag.
pub(crate) fn next_tag_block(
    s: &str,
    lower: &str,
    open: &str,
    close: &str,
    from: usize,
) -> Option<(usize, usize)> {
    let start = lower.get(from..)?.find(open)? + from;
    let open_end = s[start..].find('>')? + start + 1;
    let end_rel = lower[open_end..].find(close)?;
    let end = open_end + end_rel + close.len();
    Some((start, end))
}

/// Content between the opening tag's `>` and the final `<` of the block.
pub(crate) fn inner_after_open_tag(block: &str) -> &str {
    if let Some(oe) = block.find('>') {
        if let Some(cs) = block.rfind('<') {
            if cs > oe {
                return &block[oe + 1..cs];
            }
        }
    }
    ""
}

/// Value of an attribute in the block's opening tag, quoted or bare.
pub(crate) fn tag_attr(block: &str, name: &str) -> Option<String> {
    let open_end = block.find('>')?;
    let open = &block[..open_end];
    let pattern = format!("{}=", to_lower(name));
    let at = to_lower(open).find(&pattern)? + pattern.len();
    let rest = &open[at..];
    let quote = rest.chars().next()?;
    if quote == '"' || quote == '\'' {
        let inner = &rest[quote.len_utf8()..];
        let end = inner.find(quote)?;
        Some(inner[..end].to_string())
    } else {
        let end = rest
            .find(|c: char| c.is_whitespace() || c == '>')
            .unwrap_or(rest.len());
        Some(rest[..end].to_string())
    }
}

fn normalize_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space {
                out.push(' ');
                prev_space = true;
            }
        } else {
            out.push(ch);
            prev_space = false;
        }
    }
    out.trim().to_string()
}

/// Drop all tags, decode the common entities, collapse whitespace.
pub(crate) fn strip_tags(s: &str) -> String {
    let mut text = String::with_capacity(s.len());
    let mut in_tag = false;
    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => text.push(ch),
            _ => {}
        }
    }
    normalize_ws(&normalize_entities(&text))
}
