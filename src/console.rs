//! Terminal stand-ins for the page surfaces used by `save`.

use std::io::{self, BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

use highlight_capture::{Affordance, MarkError, Notice, Notifier, Point, RangeMarker, TextRange};

/// Affordance, notifier and range marker that report to the terminal.
#[derive(Default)]
pub(crate) struct ConsoleSurface {
    visible: AtomicBool,
}

impl Affordance for ConsoleSurface {
    fn show(&self, at: Point) {
        debug!("Affordance shown at ({}, {})", at.left, at.top);
        self.visible.store(true, Ordering::SeqCst);
    }

    fn hide(&self) {
        self.visible.store(false, Ordering::SeqCst);
    }

    fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }
}

impl Notifier for ConsoleSurface {
    fn notify(&self, notice: Notice) {
        println!("{}", notice.message());
    }
}

impl RangeMarker for ConsoleSurface {
    fn mark(&self, range: &TextRange) -> Result<(), MarkError> {
        debug!("Marked range {}", range.index);
        Ok(())
    }
}

/// Ask a yes/no question on stdin. Anything but `y`/`yes` is a no.
pub(crate) fn confirm_on_stdin(prompt: &str) -> bool {
    print!("{} [y/N] ", prompt);
    if io::stdout().flush().is_err() {
        return false;
    }

    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}
