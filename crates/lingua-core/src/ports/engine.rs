//! On-device AI engine ports.
//!
//! Each capability is exposed by a factory with an availability query and a
//! `create` call that materializes the model (downloading it if needed). The
//! created instance exposes the single corresponding operation.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use crate::domain::{DetectionCandidate, LanguagePair, SummarizeOptions, SummarizerParams};

/// Availability reported by an engine query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Availability {
    /// The model is ready.
    Available,
    /// The model can be downloaded.
    Downloadable,
    /// A download is in progress.
    Downloading,
    /// The capability cannot be used with these parameters.
    Unavailable,
}

/// Errors raised by engine calls.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EngineError {
    /// The call observed the abort signal.
    #[error("The operation was aborted")]
    Aborted,

    /// The engine does not support the requested parameters.
    #[error("{0}")]
    NotSupported(String),

    /// Any other engine failure.
    #[error("{0}")]
    Failed(String),
}

/// Download progress listener. Receives loaded fractions in `0.0..=1.0`.
pub type DownloadMonitor = Arc<dyn Fn(f64) + Send + Sync>;

/// Options passed to every `create` call.
#[derive(Clone, Default)]
pub struct CreateOptions {
    /// Abort signal for the creation (and any implied download).
    pub cancel: CancellationToken,
    /// Optional download progress listener.
    pub monitor: Option<DownloadMonitor>,
}

impl CreateOptions {
    /// Options with an abort signal and no monitor.
    #[must_use]
    pub const fn new(cancel: CancellationToken) -> Self {
        Self {
            cancel,
            monitor: None,
        }
    }

    /// Attach a download monitor.
    #[must_use]
    pub fn with_monitor(mut self, monitor: DownloadMonitor) -> Self {
        self.monitor = Some(monitor);
        self
    }

    /// Forward a loaded fraction to the monitor, if any.
    pub fn report_loaded(&self, loaded: f64) {
        if let Some(monitor) = &self.monitor {
            monitor(loaded);
        }
    }
}

impl fmt::Debug for CreateOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateOptions")
            .field("cancelled", &self.cancel.is_cancelled())
            .field("monitor", &self.monitor.is_some())
            .finish()
    }
}

/// A ready translator for one language pair.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text`.
    async fn translate(&self, text: &str) -> Result<String, EngineError>;
}

/// A ready summarizer.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Summarize `text`.
    async fn summarize(&self, text: &str, options: &SummarizeOptions)
    -> Result<String, EngineError>;
}

/// A ready language detector.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait LanguageDetector: Send + Sync {
    /// Rank candidate languages for `text`.
    async fn detect(&self, text: &str) -> Result<Vec<DetectionCandidate>, EngineError>;
}

/// Translation capability.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait TranslatorFactory: Send + Sync {
    /// Query availability for a language pair.
    async fn availability(&self, pair: &LanguagePair) -> Result<Availability, EngineError>;

    /// Create a translator, downloading the model if needed.
    async fn create(
        &self,
        pair: &LanguagePair,
        options: CreateOptions,
    ) -> Result<Box<dyn Translator>, EngineError>;
}

/// Summarization capability.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait SummarizerFactory: Send + Sync {
    /// Query availability for the given parameters.
    async fn availability(&self, params: &SummarizerParams) -> Result<Availability, EngineError>;

    /// Create a summarizer, downloading the model if needed.
    async fn create(
        &self,
        params: &SummarizerParams,
        options: CreateOptions,
    ) -> Result<Box<dyn Summarizer>, EngineError>;
}

/// Language detection capability.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait LanguageDetectorFactory: Send + Sync {
    /// Query availability.
    async fn availability(&self) -> Result<Availability, EngineError>;

    /// Create a detector, downloading the model if needed.
    async fn create(&self, options: CreateOptions)
    -> Result<Box<dyn LanguageDetector>, EngineError>;
}

/// Container for the engine's capability factories.
///
/// A `None` slot is a capability the platform does not implement at all.
#[derive(Clone, Default)]
pub struct EngineHandles {
    /// Translation factory.
    pub translator: Option<Arc<dyn TranslatorFactory>>,
    /// Summarization factory.
    pub summarizer: Option<Arc<dyn SummarizerFactory>>,
    /// Language detection factory.
    pub language_detector: Option<Arc<dyn LanguageDetectorFactory>>,
}

impl EngineHandles {
    /// A platform without any AI capability.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Set the translation factory.
    #[must_use]
    pub fn with_translator(mut self, factory: Arc<dyn TranslatorFactory>) -> Self {
        self.translator = Some(factory);
        self
    }

    /// Set the summarization factory.
    #[must_use]
    pub fn with_summarizer(mut self, factory: Arc<dyn SummarizerFactory>) -> Self {
        self.summarizer = Some(factory);
        self
    }

    /// Set the language detection factory.
    #[must_use]
    pub fn with_language_detector(mut self, factory: Arc<dyn LanguageDetectorFactory>) -> Self {
        self.language_detector = Some(factory);
        self
    }
}

impl fmt::Debug for EngineHandles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineHandles")
            .field("translator", &self.translator.is_some())
            .field("summarizer", &self.summarizer.is_some())
            .field("language_detector", &self.language_detector.is_some())
            .finish()
    }
}
