use std::sync::LazyLock;

use regex::Regex;

static STRONG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("strong pattern is valid"));

static EMPHASIS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*(.+?)\*").expect("emphasis pattern is valid"));

pub(super) fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape `text`, then apply bold before italic so `**` is never read as two `*`.
pub(super) fn format_inline(text: &str) -> String {
    let escaped = escape(text);
    let strong = STRONG.replace_all(&escaped, "<strong>$1</strong>");
    EMPHASIS.replace_all(&strong, "<em>$1</em>").into_owned()
}
