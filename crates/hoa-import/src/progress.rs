//! Progress reporting for long-running imports.
//!
//! Progress is driven by per-chunk commit completion, never by timers.
//! Values are monotone integers in `[0, 100]`; 100 is emitted exactly
//! once, at the terminal state (success, failure, or cancellation).

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use hoa_model::ImportResult;

/// Observer notified while an import run executes.
pub trait ProgressObserver {
    /// Monotone progress in `[0, 100]`.
    fn on_progress(&self, percent: u8);

    /// Terminal outcome. Called exactly once per run, after the final
    /// `on_progress(100)`. Runs rejected before start never report
    /// progress and receive only this notification.
    fn on_finished(&self, _result: &ImportResult) {}
}

/// Observer that discards all notifications.
#[derive(Debug, Default)]
pub struct NoopObserver;

impl ProgressObserver for NoopObserver {
    fn on_progress(&self, _percent: u8) {}
}

/// Cooperative cancellation handle shared between the operator-facing
/// caller and a running executor. Cancellation is observed between
/// chunk commits; a chunk already submitted is never interrupted.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}
