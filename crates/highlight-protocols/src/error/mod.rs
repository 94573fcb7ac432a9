//! Error types for the Highlight Saver protocol layer.

mod highlight;
mod store;
mod summarize;

pub use highlight::*;
pub use store::*;
pub use summarize::*;
