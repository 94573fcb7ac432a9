//! Host page abstractions.

use thiserror::Error;

/// A rectangle in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// A position in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub top: f64,
    pub left: f64,
}

/// One range of a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRange {
    pub index: usize,
    pub collapsed: bool,
}

/// Failure to visually mark a range.
#[derive(Debug, Error)]
pub enum MarkError {
    #[error("Range {0} is no longer in the document")]
    Detached(usize),

    #[error("Range {0} cannot be wrapped: {1}")]
    Unwrappable(usize, String),
}

/// The user's current text selection.
pub trait Selection: Send + Sync {
    fn text(&self) -> String;

    /// Bounding rectangle of the first range.
    fn bounding_rect(&self) -> Rect;

    fn ranges(&self) -> Vec<TextRange>;
}

/// Visible area of the page.
pub trait Viewport: Send + Sync {
    fn width(&self) -> f64;
    fn height(&self) -> f64;
    fn scroll_x(&self) -> f64;
    fn scroll_y(&self) -> f64;
}

/// Visually marks saved ranges. Best effort.
pub trait RangeMarker: Send + Sync {
    fn mark(&self, range: &TextRange) -> Result<(), MarkError>;
}

/// A user-visible notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Saved,
    SaveFailed,
    TooLong,
    NothingSelected,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::Saved => "✓ Highlight saved",
            Notice::SaveFailed => "❌ Error saving highlight",
            Notice::TooLong => "Error: Selected text is too long",
            Notice::NothingSelected => "No text selected to save",
        }
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// The floating save control.
pub trait Affordance: Send + Sync {
    fn show(&self, at: Point);
    fn hide(&self);
    fn is_visible(&self) -> bool;
}

/// A selection with fixed content, for hosts that capture text up front.
#[derive(Debug, Clone, Default)]
pub struct StaticSelection {
    pub text: String,
    pub rect: Rect,
    pub ranges: Vec<TextRange>,
}

impl StaticSelection {
    /// A single non-collapsed range holding `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            rect: Rect::default(),
            ranges: vec![TextRange {
                index: 0,
                collapsed: false,
            }],
        }
    }

    pub fn with_rect(mut self, rect: Rect) -> Self {
        self.rect = rect;
        self
    }
}

impl Selection for StaticSelection {
    fn text(&self) -> String {
        self.text.clone()
    }

    fn bounding_rect(&self) -> Rect {
        self.rect
    }

    fn ranges(&self) -> Vec<TextRange> {
        self.ranges.clone()
    }
}

/// A viewport that never scrolls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticViewport {
    pub width: f64,
    pub height: f64,
}

impl Default for StaticViewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
        }
    }
}

impl Viewport for StaticViewport {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn scroll_x(&self) -> f64 {
        0.0
    }

    fn scroll_y(&self) -> f64 {
        0.0
    }
}
