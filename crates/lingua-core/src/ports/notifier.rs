//! Completion notification port.
//!
//! Fired once per orchestration call that had to download a model, so a
//! user who walked away during the download learns the result is ready.

/// Delivers a user-facing notification.
pub trait CompletionNotifier: Send + Sync {
    /// Show `message` on the notification surface.
    fn notify(&self, message: &str);
}

/// A notifier that discards every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl CompletionNotifier for NoopNotifier {
    fn notify(&self, _message: &str) {}
}
