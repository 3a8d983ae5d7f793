//! Core domain types and port definitions for lingua.
//!
//! `lingua-core` holds everything the orchestration layer and its adapters
//! share: capability identifiers, model status, the error taxonomy, the
//! event union, settings, and the traits through which the host platform's
//! on-device AI engine is consumed.

#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod errors;
pub mod events;
pub mod ports;
pub mod settings;

// Re-export commonly used types for convenience
pub use domain::{
    CapabilityRequirement, DetectionCandidate, LanguageCode, LanguagePair, LanguageTable,
    ModelState, ModelStatus, ProcessOptions, ProcessRequest, SummarizeOptions, SummarizerParams,
    SummaryFormat, SummaryKind, SummaryLength, SummaryStyle,
};
pub use errors::{ProcessError, ProcessResult};
pub use events::ProcessEvent;
pub use ports::{
    Availability, ChannelStatusEmitter, CompletionNotifier, CreateOptions, DownloadMonitor,
    EngineError, EngineHandles, LanguageDetector, LanguageDetectorFactory, NoopNotifier,
    NoopStatusEmitter, StatusEventEmitter, Summarizer, SummarizerFactory, Translator,
    TranslatorFactory,
};
pub use settings::{
    DEFAULT_COMPLETION_MESSAGE, DEFAULT_MIN_DETECTION_CONFIDENCE, SameLanguagePolicy, Settings,
    SettingsError, validate_settings,
};
