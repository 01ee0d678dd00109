use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Remove markup tags, leaving the text content
/// Newlines are preserved so paragraph structure survives for plain-text use
pub fn strip_tags(s: &str) -> String {
    let re = Regex::new(r"<[^>]*>").unwrap();
    re.replace_all(s, "").trim().to_string()
}

/// Strip tags and collapse all whitespace runs into single spaces
/// Used for single-line fields: questions, titles, reviewer names, labels
pub fn clean_text(s: &str) -> String {
    strip_tags(s).split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Escape text for use in HTML element content and attribute values
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wrap blank-line-delimited text blocks in paragraph tags
/// Single newlines inside a block become `<br />`; an all-whitespace input
/// produces an empty string rather than an empty paragraph
pub fn autop(s: &str) -> String {
    let normalized = s.replace("\r\n", "\n").replace('\r', "\n");
    let blocks = Regex::new(r"\n\s*\n").unwrap();
    let mut out = String::new();
    for block in blocks.split(&normalized) {
        let block = block.trim();
        if block.is_empty() {
            continue;
        }
        out.push_str("<p>");
        out.push_str(&block.replace('\n', "<br />\n"));
        out.push_str("</p>\n");
    }
    out
}

/// Derive a URL-safe slug: NFD decomposition, lowercase, non-alphanumeric
/// runs collapsed to single hyphens, leading/trailing hyphens trimmed
/// Returns an empty string when nothing survives; callers decide the fallback
pub fn slugify(s: &str) -> String {
    let decomposed: String = s.nfd().collect::<String>().to_lowercase();
    let mut out = String::with_capacity(decomposed.len());
    let mut pending_hyphen = false;
    for c in decomposed.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !out.is_empty() {
                out.push('-');
            }
            pending_hyphen = false;
            out.push(c);
        } else {
            pending_hyphen = true;
        }
    }
    out
}
