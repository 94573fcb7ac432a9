//! Selection capture for Highlight Saver.
//!
//! [`Capture`] reacts to selection, pointer, keyboard and scroll events from
//! a host page. It places a save affordance next to the selection and, when
//! activated, submits the selection to the service as a new highlight.
//!
//! The page itself is abstracted behind the traits in [`host`].

mod anchor;
mod capture;
pub mod host;

pub use anchor::compute_anchor;
pub use capture::{
    Capture, CaptureConfig, CaptureHost, Key, PageInfo, RejectReason, SaveOutcome, SaveState,
    ScrollTicket,
};
pub use host::{
    Affordance, MarkError, Notice, Notifier, Point, RangeMarker, Rect, Selection,
    StaticSelection, StaticViewport, TextRange, Viewport,
};
