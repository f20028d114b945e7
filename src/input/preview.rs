//! Debounced hover preview
//!
//! Hovering a card arms a timer; if the pointer is still there when it fires,
//! the card id is published on a watch channel for the renderer to enlarge.
//! Hovering something else or leaving cancels the timer.

use crate::core::InstanceId;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

pub const DEFAULT_PREVIEW_DELAY: Duration = Duration::from_millis(500);

/// Owns at most one pending preview timer
///
/// `hover` spawns onto the current tokio runtime and must be called from
/// within one.
#[derive(Debug)]
pub struct HoverPreview {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
    shown: Arc<watch::Sender<Option<InstanceId>>>,
}

impl HoverPreview {
    pub fn new(delay: Duration) -> Self {
        let (tx, _rx) = watch::channel(None);
        HoverPreview {
            delay,
            pending: None,
            shown: Arc::new(tx),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Receiver that sees the previewed card, or `None` while nothing is shown
    pub fn subscribe(&self) -> watch::Receiver<Option<InstanceId>> {
        self.shown.subscribe()
    }

    /// Card currently previewed
    pub fn current(&self) -> Option<InstanceId> {
        *self.shown.borrow()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Pointer entered `card`: hide any preview and restart the timer
    pub fn hover(&mut self, card: InstanceId) {
        self.clear();
        let shown = Arc::clone(&self.shown);
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            shown.send_replace(Some(card));
        }));
    }

    /// Pointer left: cancel the timer and hide the preview
    pub fn clear(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
        self.shown.send_if_modified(|shown| shown.take().is_some());
    }
}

impl Default for HoverPreview {
    fn default() -> Self {
        HoverPreview::new(DEFAULT_PREVIEW_DELAY)
    }
}

impl Drop for HoverPreview {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
