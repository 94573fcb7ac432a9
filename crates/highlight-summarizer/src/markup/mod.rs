//! Markdown-subset to markup conversion for summaries.
//!
//! Conversion is two-phase: [`parse`] runs a line-oriented state machine
//! that produces a list of [`Block`]s, and [`render`] turns those blocks into
//! markup. Only the constructs summaries actually use are recognised:
//! headings up to three levels, bold and italic spans, ordered and unordered
//! lists, blockquotes and paragraphs. Input text is escaped, so the output
//! never contains markup the model did not get through this converter.

mod inline;
mod parser;
mod render;

pub use parser::parse;
pub use render::render;

/// Kind of list a run of items belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Ordered,
    Unordered,
}

/// One block-level element of a converted document.
///
/// Text fields hold the raw source text; escaping and inline formatting are
/// applied while rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Heading with source level 1..=3 (`#` to `###`).
    Heading { level: u8, text: String },
    /// Consecutive plain lines of one chunk.
    Paragraph(Vec<String>),
    List { kind: ListKind, items: Vec<String> },
    Blockquote(String),
}

/// Convert markdown-like text into markup.
pub fn to_html(text: &str) -> String {
    render(&parse(text))
}

#[cfg(test)]
#[path = "markup_tests.rs"]
mod tests;
