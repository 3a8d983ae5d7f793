//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from the host
//! platform. They contain no implementation details and use only domain
//! types.
//!
//! # Design Rules
//!
//! - Engine factories are optional: a missing factory is a missing capability
//! - Every async engine call receives its abort signal explicitly
//! - Event and notification sinks never block

pub mod engine;
pub mod event_emitter;
pub mod notifier;

pub use engine::{
    Availability, CreateOptions, DownloadMonitor, EngineError, EngineHandles, LanguageDetector,
    LanguageDetectorFactory, Summarizer, SummarizerFactory, Translator, TranslatorFactory,
};
pub use event_emitter::{ChannelStatusEmitter, NoopStatusEmitter, StatusEventEmitter};
pub use notifier::{CompletionNotifier, NoopNotifier};
