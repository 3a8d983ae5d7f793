//! Model lifecycle management.
//!
//! `ModelLifecycleManager` is the single source of truth for whether a
//! capability can be used right now. It never caches: the engine may change
//! model state out-of-band, so every call asks again.

mod progress;

use std::sync::Arc;

use lingua_core::{
    Availability, CapabilityRequirement, CreateOptions, DownloadMonitor, EngineError,
    EngineHandles, ModelStatus, ProcessError, ProcessResult, SummarizerParams,
};
use tokio_util::sync::CancellationToken;

use crate::cancellable;

pub use progress::{ProgressCallback, ProgressTracker, loaded_to_percent};

/// Message for a capability the platform does not implement at all.
pub fn not_supported_message(requirement: &CapabilityRequirement) -> String {
    format!(
        "{} API is not supported on this platform",
        requirement.engine_name()
    )
}

fn unavailable_message(requirement: &CapabilityRequirement) -> String {
    match requirement {
        CapabilityRequirement::Translation(pair) => format!(
            "Translation from {} to {} is not available on this device",
            pair.source, pair.target
        ),
        CapabilityRequirement::Summarization => {
            "Summarization is not available on this device".to_string()
        }
        CapabilityRequirement::LanguageDetection => {
            "Language detection is not available on this device".to_string()
        }
    }
}

/// Queries and drives the availability state machine of each capability.
pub struct ModelLifecycleManager {
    engine: EngineHandles,
    /// Summarizer configuration for calls that do not name one.
    summarizer_params: SummarizerParams,
}

impl ModelLifecycleManager {
    /// Create a manager over the given engine.
    pub const fn new(engine: EngineHandles, summarizer_params: SummarizerParams) -> Self {
        Self {
            engine,
            summarizer_params,
        }
    }

    /// Summarizer configuration used when no other is given.
    pub const fn summarizer_params(&self) -> &SummarizerParams {
        &self.summarizer_params
    }

    /// Check the current status of a capability.
    ///
    /// Engine failures and missing capabilities become `unavailable`
    /// statuses; the only error is `Cancelled`.
    pub async fn check_status(
        &self,
        requirement: &CapabilityRequirement,
        cancel: &CancellationToken,
    ) -> ProcessResult<ModelStatus> {
        self.check_status_with(requirement, &self.summarizer_params, cancel)
            .await
    }

    /// Like `check_status`, probing the summarizer for `summarizer`.
    pub async fn check_status_with(
        &self,
        requirement: &CapabilityRequirement,
        summarizer: &SummarizerParams,
        cancel: &CancellationToken,
    ) -> ProcessResult<ModelStatus> {
        let availability = cancellable(cancel, async {
            Ok(self.query_availability(requirement, summarizer).await)
        })
        .await?;

        let status = match availability {
            Ok(Availability::Available) => ModelStatus::available(),
            Ok(Availability::Downloadable) => ModelStatus::downloadable(),
            // Started elsewhere; no real progress is known
            Ok(Availability::Downloading) => ModelStatus::downloading(0),
            Ok(Availability::Unavailable) => {
                ModelStatus::unavailable(unavailable_message(requirement))
            }
            Err(EngineError::Aborted) => return Err(ProcessError::Cancelled),
            Err(e) => ModelStatus::unavailable(e.to_string()),
        };

        tracing::debug!(
            capability = %requirement,
            state = status.state().as_str(),
            "Checked capability status"
        );
        Ok(status)
    }

    /// Materialize a capability's model, reporting progress.
    ///
    /// `on_progress` receives non-decreasing percentages and is never called
    /// after this returns. Cancellation yields `Err(Cancelled)`, any other
    /// failure `Err(DownloadFailed)`. Nothing is retried.
    pub async fn download(
        &self,
        requirement: &CapabilityRequirement,
        on_progress: ProgressCallback,
        cancel: &CancellationToken,
    ) -> ProcessResult<ModelStatus> {
        self.download_with(requirement, &self.summarizer_params, on_progress, cancel)
            .await
    }

    /// Like `download`, materializing the summarizer for `summarizer`.
    pub async fn download_with(
        &self,
        requirement: &CapabilityRequirement,
        summarizer: &SummarizerParams,
        on_progress: ProgressCallback,
        cancel: &CancellationToken,
    ) -> ProcessResult<ModelStatus> {
        if cancel.is_cancelled() {
            return Err(ProcessError::Cancelled);
        }

        tracing::info!(capability = %requirement, "Starting model download");

        let tracker = Arc::new(ProgressTracker::new(on_progress));
        let monitor: DownloadMonitor = {
            let tracker = Arc::clone(&tracker);
            let cancel = cancel.clone();
            Arc::new(move |loaded| {
                if !cancel.is_cancelled() {
                    tracker.record(loaded);
                }
            })
        };
        let options = CreateOptions::new(cancel.clone()).with_monitor(monitor);

        let result = cancellable(cancel, async {
            self.materialize(requirement, summarizer, options)
                .await
                .map_err(download_error)
        })
        .await;
        tracker.close();

        match result {
            Ok(()) => {
                tracing::info!(capability = %requirement, "Model download complete");
                Ok(ModelStatus::available())
            }
            Err(ProcessError::Cancelled) => {
                tracing::info!(
                    capability = %requirement,
                    progress = ?tracker.last(),
                    "Model download cancelled"
                );
                Err(ProcessError::Cancelled)
            }
            Err(e) => {
                tracing::warn!(capability = %requirement, error = %e, "Model download failed");
                Err(e)
            }
        }
    }

    async fn query_availability(
        &self,
        requirement: &CapabilityRequirement,
        summarizer: &SummarizerParams,
    ) -> Result<Availability, EngineError> {
        let absent = || EngineError::NotSupported(not_supported_message(requirement));

        match requirement {
            CapabilityRequirement::Translation(pair) => {
                let factory = self.engine.translator.as_ref().ok_or_else(absent)?;
                factory.availability(pair).await
            }
            CapabilityRequirement::Summarization => {
                let factory = self.engine.summarizer.as_ref().ok_or_else(absent)?;
                factory.availability(summarizer).await
            }
            CapabilityRequirement::LanguageDetection => {
                let factory = self.engine.language_detector.as_ref().ok_or_else(absent)?;
                factory.availability().await
            }
        }
    }

    /// Create (and drop) an engine instance; creation downloads the model.
    async fn materialize(
        &self,
        requirement: &CapabilityRequirement,
        summarizer: &SummarizerParams,
        options: CreateOptions,
    ) -> Result<(), EngineError> {
        let absent = || EngineError::NotSupported(not_supported_message(requirement));

        match requirement {
            CapabilityRequirement::Translation(pair) => {
                let factory = self.engine.translator.as_ref().ok_or_else(absent)?;
                factory.create(pair, options).await.map(drop)
            }
            CapabilityRequirement::Summarization => {
                let factory = self.engine.summarizer.as_ref().ok_or_else(absent)?;
                factory.create(summarizer, options).await.map(drop)
            }
            CapabilityRequirement::LanguageDetection => {
                let factory = self.engine.language_detector.as_ref().ok_or_else(absent)?;
                factory.create(options).await.map(drop)
            }
        }
    }
}

fn download_error(err: EngineError) -> ProcessError {
    match err {
        EngineError::Aborted => ProcessError::Cancelled,
        other => ProcessError::download_failed(other.to_string()),
    }
}
