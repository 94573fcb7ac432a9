//! Highlight storage for Highlight Saver.
//!
//! [`HighlightRepository`] owns the highlight collection stored under the
//! `highlights` key of a [`KeyValueStore`](highlight_protocols::KeyValueStore).
//! Two backends are provided: [`JsonFileStore`] persists to a single JSON
//! document, [`MemoryStore`] keeps values in memory.

mod file;
mod memory;
mod repository;

pub use file::JsonFileStore;
pub use memory::MemoryStore;
pub use repository::{HighlightRepository, HIGHLIGHTS_KEY};
