//! View models.

/// One saved highlight as displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightRow {
    pub id: String,
    /// The highlight text in quotes.
    pub quoted_text: String,
    /// Shortened source location.
    pub source: String,
    /// Local creation time.
    pub date: String,
    /// Full source url, for re-opening the page.
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelView {
    Empty,
    /// Rows, newest first.
    Rows(Vec<HighlightRow>),
}

impl PanelView {
    pub fn rows(&self) -> &[HighlightRow] {
        match self {
            PanelView::Empty => &[],
            PanelView::Rows(rows) => rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, PanelView::Empty)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryView {
    Loading,
    Ready { html: String, model: String },
    Failed { message: String, timed_out: bool },
}

/// What the panel is busy with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelState {
    #[default]
    Idle,
    Loading,
    Summarizing,
}
