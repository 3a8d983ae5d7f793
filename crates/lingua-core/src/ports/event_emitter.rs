//! Status event emitter port.
//!
//! This port abstracts status event emission so the orchestrator can report
//! model lifecycle changes without coupling to transport details (extension
//! messaging, channels, etc.).

use tokio::sync::mpsc;

use crate::events::ProcessEvent;

/// Trait for emitting processing events.
///
/// # Implementations
///
/// - `NoopStatusEmitter` - For tests and contexts without a listener
/// - `ChannelStatusEmitter` - Forwards into a tokio channel
pub trait StatusEventEmitter: Send + Sync {
    /// Emit an event.
    ///
    /// This method should not block.
    fn emit(&self, event: ProcessEvent);
}

/// A no-op emitter that discards all events.
#[derive(Debug, Clone, Default)]
pub struct NoopStatusEmitter;

impl NoopStatusEmitter {
    /// Create a new no-op emitter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl StatusEventEmitter for NoopStatusEmitter {
    fn emit(&self, _event: ProcessEvent) {
        // Intentionally do nothing
    }
}

/// Emitter that forwards events into an unbounded tokio channel.
///
/// Events are dropped silently once the receiver is gone.
#[derive(Debug, Clone)]
pub struct ChannelStatusEmitter {
    tx: mpsc::UnboundedSender<ProcessEvent>,
}

impl ChannelStatusEmitter {
    /// Create an emitter and the receiver that observes it.
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ProcessEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl StatusEventEmitter for ChannelStatusEmitter {
    fn emit(&self, event: ProcessEvent) {
        if self.tx.send(event).is_err() {
            tracing::trace!("Status event dropped: receiver closed");
        }
    }
}
