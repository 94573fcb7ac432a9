//! The capture component.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{debug, error, info, warn};

use highlight_protocols::client::ServiceClient;
use highlight_protocols::highlight::{Highlight, MAX_HIGHLIGHT_CHARS};
use highlight_protocols::message::Request;

use crate::anchor::compute_anchor;
use crate::host::{Affordance, Notice, Notifier, RangeMarker, Selection, TextRange, Viewport};

/// Minimum trimmed selection length that gets an affordance.
const MIN_SELECTION_CHARS: usize = 2;

#[derive(Debug, Clone)]
pub struct CaptureConfig {
    /// How long to wait for the service to acknowledge a save.
    pub save_timeout: Duration,
    /// Quiet period after the last scroll before the affordance returns.
    pub scroll_debounce: Duration,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            save_timeout: Duration::from_secs(5),
            scroll_debounce: Duration::from_millis(200),
        }
    }
}

/// The page highlights are captured from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageInfo {
    pub url: String,
    pub title: Option<String>,
}

impl PageInfo {
    pub fn new(url: impl Into<String>, title: Option<String>) -> Self {
        Self {
            url: url.into(),
            title,
        }
    }
}

/// Host surfaces the capture component draws on.
#[derive(Clone)]
pub struct CaptureHost {
    pub viewport: Arc<dyn Viewport>,
    pub affordance: Arc<dyn Affordance>,
    pub marker: Arc<dyn RangeMarker>,
    pub notifier: Arc<dyn Notifier>,
}

/// Save progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveState {
    #[default]
    Idle,
    Saving,
    /// The last save was refused by the service or could not be delivered.
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    NoSelection,
    TooLong,
}

/// Result of a save activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved { id: String },
    /// A save was already in flight; nothing was submitted.
    Busy,
    Rejected(RejectReason),
    Failed(String),
    TimedOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Enter,
    Other,
}

/// Handle for one armed scroll debounce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollTicket {
    generation: u64,
    delay: Duration,
}

impl ScrollTicket {
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[derive(Default)]
struct CaptureState {
    selection: Option<Arc<dyn Selection>>,
    save: SaveState,
    scroll_generation: u64,
    scroll_pending: bool,
}

/// Selection capture bound to one page.
pub struct Capture<C: ServiceClient> {
    client: C,
    page: PageInfo,
    host: CaptureHost,
    config: CaptureConfig,
    state: Mutex<CaptureState>,
}

impl<C: ServiceClient> Capture<C> {
    pub fn new(client: C, page: PageInfo, host: CaptureHost) -> Self {
        Self::with_config(client, page, host, CaptureConfig::default())
    }

    pub fn with_config(client: C, page: PageInfo, host: CaptureHost, config: CaptureConfig) -> Self {
        Self {
            client,
            page,
            host,
            config,
            state: Mutex::new(CaptureState::default()),
        }
    }

    pub fn save_state(&self) -> SaveState {
        self.state.lock().save
    }

    pub fn has_selection(&self) -> bool {
        self.state.lock().selection.is_some()
    }

    /// The selection changed. `None` means nothing is selected.
    pub fn on_selection_change(&self, selection: Option<Arc<dyn Selection>>) {
        let selection = selection.filter(|s| {
            s.text().trim().chars().count() >= MIN_SELECTION_CHARS
        });

        let anchor = selection
            .as_ref()
            .map(|s| compute_anchor(s.bounding_rect(), self.host.viewport.as_ref()));
        self.state.lock().selection = selection;

        self.host.affordance.hide();
        if let Some(anchor) = anchor {
            self.host.affordance.show(anchor);
        }
    }

    /// Pointer released. Releases on the affordance itself are ignored.
    pub fn on_mouse_up(&self, selection: Option<Arc<dyn Selection>>, on_affordance: bool) {
        if !on_affordance {
            self.on_selection_change(selection);
        }
    }

    /// Pointer pressed. Presses outside the affordance dismiss it.
    pub fn on_pointer_down(&self, on_affordance: bool) {
        if !on_affordance {
            self.dismiss();
        }
    }

    /// Escape dismisses; Enter saves while the affordance is showing.
    pub async fn on_key(&self, key: Key) -> Option<SaveOutcome> {
        match key {
            Key::Escape => {
                self.dismiss();
                None
            }
            Key::Enter if self.host.affordance.is_visible() && self.has_selection() => {
                Some(self.on_save().await)
            }
            _ => None,
        }
    }

    /// Hide the affordance and forget the selection.
    pub fn dismiss(&self) {
        self.state.lock().selection = None;
        self.host.affordance.hide();
    }

    /// Save the active selection. Single-flight.
    pub async fn on_save(&self) -> SaveOutcome {
        let (selection, text) = match self.claim_selection() {
            Ok(claimed) => claimed,
            Err(SaveOutcome::Rejected(reason)) => {
                let notice = match reason {
                    RejectReason::NoSelection => {
                        warn!("No text selected to save");
                        Notice::NothingSelected
                    }
                    RejectReason::TooLong => Notice::TooLong,
                };
                self.host.notifier.notify(notice);
                return SaveOutcome::Rejected(reason);
            }
            Err(outcome) => return outcome,
        };
        self.host.affordance.hide();

        let highlight = Highlight::new(text, self.page.url.clone(), self.page.title.clone());
        let id = highlight.id.clone();
        let ranges = selection.ranges();

        let result = tokio::time::timeout(
            self.config.save_timeout,
            self.client.send(Request::save(highlight)),
        )
        .await;

        let outcome = match result {
            Ok(Ok(response)) => match response.into_ack() {
                Ok(()) => {
                    self.mark_ranges(&ranges);
                    self.host.notifier.notify(Notice::Saved);
                    info!(id = %id, "Highlight saved");
                    SaveOutcome::Saved { id }
                }
                Err(e) => {
                    error!("Error saving highlight: {}", e);
                    SaveOutcome::Failed(e.to_string())
                }
            },
            Ok(Err(e)) => {
                error!("Error saving highlight: {}", e);
                SaveOutcome::Failed(e.to_string())
            }
            Err(_) => {
                warn!(
                    "No acknowledgement within {:?}, giving up on save",
                    self.config.save_timeout
                );
                SaveOutcome::TimedOut
            }
        };

        let next = match outcome {
            SaveOutcome::Failed(_) => {
                self.host.notifier.notify(Notice::SaveFailed);
                SaveState::Failed
            }
            SaveOutcome::TimedOut => {
                self.host.notifier.notify(Notice::SaveFailed);
                SaveState::Idle
            }
            _ => SaveState::Idle,
        };
        self.state.lock().save = next;
        outcome
    }

    /// Move the active selection into the `Saving` state.
    fn claim_selection(&self) -> Result<(Arc<dyn Selection>, String), SaveOutcome> {
        let mut state = self.state.lock();
        if state.save == SaveState::Saving {
            debug!("Save already in progress");
            return Err(SaveOutcome::Busy);
        }

        let Some(selection) = state.selection.clone() else {
            return Err(SaveOutcome::Rejected(RejectReason::NoSelection));
        };
        let text = selection.text().trim().to_string();
        if text.is_empty() {
            return Err(SaveOutcome::Rejected(RejectReason::NoSelection));
        }
        if text.chars().count() > MAX_HIGHLIGHT_CHARS {
            return Err(SaveOutcome::Rejected(RejectReason::TooLong));
        }

        state.save = SaveState::Saving;
        state.selection = None;
        Ok((selection, text))
    }

    fn mark_ranges(&self, ranges: &[TextRange]) {
        for range in ranges.iter().filter(|r| !r.collapsed) {
            if let Err(e) = self.host.marker.mark(range) {
                warn!("Could not mark range {}: {}", range.index, e);
            }
        }
    }

    /// The page scrolled. Hides a visible affordance and arms (or re-arms)
    /// the debounce; returns `None` when there is nothing to restore.
    pub fn on_scroll(&self) -> Option<ScrollTicket> {
        let visible = self.host.affordance.is_visible();
        let ticket = {
            let mut state = self.state.lock();
            if !visible && !state.scroll_pending {
                return None;
            }
            state.scroll_generation += 1;
            state.scroll_pending = true;
            ScrollTicket {
                generation: state.scroll_generation,
                delay: self.config.scroll_debounce,
            }
        };
        self.host.affordance.hide();
        Some(ticket)
    }

    /// Wait out the debounce for `ticket`, then re-show the affordance if
    /// no later scroll superseded it and the selection is still active.
    /// Returns whether the affordance was shown again.
    pub async fn settle_scroll(&self, ticket: ScrollTicket) -> bool {
        tokio::time::sleep(ticket.delay).await;
        self.resume_after_scroll(ticket)
    }

    /// Finish a scroll debounce immediately.
    pub fn resume_after_scroll(&self, ticket: ScrollTicket) -> bool {
        let anchor = {
            let mut state = self.state.lock();
            if ticket.generation != state.scroll_generation || !state.scroll_pending {
                return false;
            }
            state.scroll_pending = false;
            state
                .selection
                .as_ref()
                .map(|s| compute_anchor(s.bounding_rect(), self.host.viewport.as_ref()))
        };

        match anchor {
            Some(anchor) => {
                self.host.affordance.show(anchor);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
#[path = "capture_tests.rs"]
mod tests;
