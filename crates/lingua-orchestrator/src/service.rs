//! Processing service - the surface collaborators call.
//!
//! Wraps the orchestrator with per-call cancellation leases and the
//! same-language policy. Constructed explicitly; there is no global instance.

use std::sync::Arc;

use lingua_core::{
    CompletionNotifier, EngineHandles, LanguageCode, ProcessRequest, ProcessResult,
    SameLanguagePolicy, Settings, SettingsError, StatusEventEmitter,
};

use crate::cancellation::CancellationController;
use crate::orchestrator::ProcessOrchestrator;

/// Service for translate / summarize / detect requests.
pub struct ProcessingService {
    orchestrator: ProcessOrchestrator,
    controller: CancellationController,
    same_language_policy: SameLanguagePolicy,
}

impl ProcessingService {
    /// Create a new processing service.
    pub fn new(
        engine: EngineHandles,
        emitter: Arc<dyn StatusEventEmitter>,
        notifier: Arc<dyn CompletionNotifier>,
        settings: &Settings,
    ) -> Result<Self, SettingsError> {
        Ok(Self {
            orchestrator: ProcessOrchestrator::new(engine, emitter, notifier, settings)?,
            controller: CancellationController::new(),
            same_language_policy: settings.same_language_policy,
        })
    }

    /// The underlying orchestrator.
    pub const fn orchestrator(&self) -> &ProcessOrchestrator {
        &self.orchestrator
    }

    /// The cancellation controller shared by all calls.
    pub const fn controller(&self) -> &CancellationController {
        &self.controller
    }

    /// Translate or summarize the request's text.
    pub async fn process(&self, request: &ProcessRequest) -> ProcessResult<String> {
        let options = &request.options;
        if !options.summarize
            && options.is_same_language()
            && self.same_language_policy == SameLanguagePolicy::PassThrough
        {
            tracing::debug!(language = %options.source_language, "Same language; returning input");
            return Ok(request.text.clone());
        }

        let lease = self.controller.issue();
        let result = self
            .orchestrator
            .process_text(&request.text, options, lease.token())
            .await;
        log_outcome("process", &result);
        result
    }

    /// Detect the language of `text`.
    pub async fn detect_language(&self, text: &str) -> ProcessResult<LanguageCode> {
        let lease = self.controller.issue();
        let result = self.orchestrator.detect_language(text, lease.token()).await;
        log_outcome("detect_language", &result);
        result
    }

    /// Abort every in-flight call. Synchronous and idempotent.
    pub fn cancel_processing(&self) {
        self.controller.cancel_processing();
    }
}

fn log_outcome<T>(operation: &str, result: &ProcessResult<T>) {
    match result {
        Ok(_) => tracing::debug!(operation, "Processing complete"),
        Err(e) if e.is_reportable() => tracing::warn!(operation, error = %e, "Processing failed"),
        Err(_) => tracing::info!(operation, "Processing cancelled"),
    }
}
