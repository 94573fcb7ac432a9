//! Display formatting for highlights.

use chrono::{DateTime, Local, Utc};
use url::Url;

use highlight_protocols::highlight::Highlight;

pub const UNKNOWN_SOURCE: &str = "unknown source";

const PATH_PREVIEW_CHARS: usize = 15;
const RAW_PREVIEW_CHARS: usize = 30;

/// Shortened form of `url`: host plus the start of the path.
pub fn display_source(url: &str) -> String {
    if url.is_empty() {
        return UNKNOWN_SOURCE.to_string();
    }

    match Url::parse(url) {
        Ok(parsed) => {
            let host = parsed.host_str().unwrap_or_default();
            let path = parsed.path();
            let preview: String = path.chars().take(PATH_PREVIEW_CHARS).collect();
            let ellipsis = if path.chars().count() > PATH_PREVIEW_CHARS {
                "..."
            } else {
                ""
            };
            format!("{}{}{}", host, preview, ellipsis)
        }
        Err(_) => {
            let preview: String = url.chars().take(RAW_PREVIEW_CHARS).collect();
            format!("{}...", preview)
        }
    }
}

/// Host name of `url`, or [`UNKNOWN_SOURCE`].
pub fn source_host(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .filter(|h| !h.is_empty())
        .unwrap_or_else(|| UNKNOWN_SOURCE.to_string())
}

/// `timestamp` in local time.
pub fn format_date(timestamp: &DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

/// Summarizer input: one numbered, attributed line per highlight.
pub fn summary_lines(highlights: &[Highlight]) -> String {
    highlights
        .iter()
        .enumerate()
        .map(|(i, h)| format!("[{}] \"{}\" (from {})", i + 1, h.text, source_host(&h.url)))
        .collect::<Vec<_>>()
        .join("\n\n")
}
