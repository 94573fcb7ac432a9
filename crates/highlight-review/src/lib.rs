//! Review panel for Highlight Saver.
//!
//! [`ReviewPanel`] lists saved highlights, deletes them individually or all
//! at once, and requests a summary of the collection. It produces view
//! models; rendering is left to the caller.

mod error;
pub mod format;
mod panel;
mod view;

pub use error::ReviewError;
pub use panel::{Confirm, ReviewPanel, CLEAR_PROMPT, DEFAULT_SUMMARIZE_TIMEOUT};
pub use view::{HighlightRow, PanelState, PanelView, SummaryView};
