//! Download progress normalization.
//!
//! Engines report loaded fractions in `0.0..=1.0`, possibly repeated or out
//! of order. Listeners get rounded integer percentages that only ever go up.

use std::sync::{Arc, Mutex, PoisonError};

/// Receives normalized download progress (0 - 100).
pub type ProgressCallback = Arc<dyn Fn(u8) + Send + Sync>;

/// Convert an engine load fraction to a percentage.
///
/// Returns `None` for NaN or infinite values.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn loaded_to_percent(loaded: f64) -> Option<u8> {
    if !loaded.is_finite() {
        return None;
    }
    Some((loaded.clamp(0.0, 1.0) * 100.0).round() as u8)
}

#[derive(Debug, Default)]
struct TrackerState {
    last: Option<u8>,
    closed: bool,
}

/// Forwards strictly increasing percentages to a callback.
///
/// The lock is held while the callback runs so updates reach the listener
/// in the order they were accepted. After `close`, updates are ignored.
pub struct ProgressTracker {
    state: Mutex<TrackerState>,
    callback: ProgressCallback,
}

impl ProgressTracker {
    /// Create a tracker that reports to `callback`.
    pub fn new(callback: ProgressCallback) -> Self {
        Self {
            state: Mutex::new(TrackerState::default()),
            callback,
        }
    }

    /// Record an engine load fraction.
    ///
    /// Returns the percentage forwarded to the callback, if any.
    pub fn record(&self, loaded: f64) -> Option<u8> {
        let percent = loaded_to_percent(loaded)?;
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.closed || state.last.is_some_and(|last| percent <= last) {
            return None;
        }
        state.last = Some(percent);
        (self.callback)(percent);
        Some(percent)
    }

    /// Stop forwarding updates.
    pub fn close(&self) {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .closed = true;
    }

    /// Last forwarded percentage.
    pub fn last(&self) -> Option<u8> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).last
    }
}
