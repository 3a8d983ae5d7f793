//! Recording implementations of the status and notification ports.

use std::sync::{Arc, Mutex};

use lingua_core::{CompletionNotifier, ProcessEvent, StatusEventEmitter};

/// Emitter that keeps every event it receives.
#[derive(Debug, Clone, Default)]
pub struct RecordingEmitter {
    events: Arc<Mutex<Vec<ProcessEvent>>>,
}

impl RecordingEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ProcessEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().unwrap().is_empty()
    }
}

impl StatusEventEmitter for RecordingEmitter {
    fn emit(&self, event: ProcessEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Notifier that keeps every message it is asked to show.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    messages: Arc<Mutex<Vec<String>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl CompletionNotifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}
