//! Processing orchestration.
//!
//! `ProcessOrchestrator` sequences capability checks, on-demand downloads,
//! bridging translations and the terminal operation for one call. All steps
//! share the caller's cancellation token.
//!
//! # Event Flow
//!
//! For a capability that needs a download, or whose download was started
//! elsewhere, listeners see
//! `downloading`, then zero or more `downloading(p)` with rising `p`, then
//! exactly one `available` or `unavailable`. Capabilities that are already
//! available emit nothing. A completion notification follows a successful
//! call that downloaded anything.

mod ensure;

use std::sync::Arc;

use lingua_core::{
    CapabilityRequirement, CompletionNotifier, CreateOptions, EngineError, EngineHandles,
    LanguageCode, LanguagePair, ProcessError, ProcessOptions, ProcessResult, Settings,
    SettingsError, StatusEventEmitter, SummarizeOptions, SummarizerParams, SummaryStyle,
    validate_settings,
};
use tokio_util::sync::CancellationToken;

use crate::cancellable;
use crate::lifecycle::{ModelLifecycleManager, not_supported_message};
use crate::resolver::LanguageCapabilityResolver;

use ensure::{CallState, CapabilityGate};

fn operation_error(err: EngineError) -> ProcessError {
    match err {
        EngineError::Aborted => ProcessError::Cancelled,
        other => ProcessError::operation(other.to_string()),
    }
}

fn absent(requirement: &CapabilityRequirement) -> ProcessError {
    ProcessError::capability_unavailable(not_supported_message(requirement))
}

/// Top-level entry point for translate / summarize / detect calls.
pub struct ProcessOrchestrator {
    engine: EngineHandles,
    lifecycle: ModelLifecycleManager,
    resolver: LanguageCapabilityResolver,
    emitter: Arc<dyn StatusEventEmitter>,
    notifier: Arc<dyn CompletionNotifier>,
    summary_style: SummaryStyle,
    completion_message: String,
    min_detection_confidence: f64,
}

impl ProcessOrchestrator {
    /// Build an orchestrator from validated settings.
    pub fn new(
        engine: EngineHandles,
        emitter: Arc<dyn StatusEventEmitter>,
        notifier: Arc<dyn CompletionNotifier>,
        settings: &Settings,
    ) -> Result<Self, SettingsError> {
        validate_settings(settings)?;
        let resolver = LanguageCapabilityResolver::new(settings.languages.clone())?;

        let fallback = resolver.fallback_language().clone();
        let default_params =
            SummarizerParams::new(fallback.clone(), fallback, settings.summary_style.clone());

        Ok(Self {
            lifecycle: ModelLifecycleManager::new(engine.clone(), default_params),
            engine,
            resolver,
            emitter,
            notifier,
            summary_style: settings.summary_style.clone(),
            completion_message: settings.effective_completion_message().to_string(),
            min_detection_confidence: settings.effective_min_detection_confidence(),
        })
    }

    /// The lifecycle manager used for capability checks.
    pub const fn lifecycle(&self) -> &ModelLifecycleManager {
        &self.lifecycle
    }

    /// The bridging resolver.
    pub const fn resolver(&self) -> &LanguageCapabilityResolver {
        &self.resolver
    }

    /// Translate or summarize `text`.
    ///
    /// `source == target` is processed like any other request; skipping it
    /// is the caller's decision.
    pub async fn process_text(
        &self,
        text: &str,
        options: &ProcessOptions,
        cancel: &CancellationToken,
    ) -> ProcessResult<String> {
        if text.trim().is_empty() {
            return Err(ProcessError::invalid_request("Text to process is empty"));
        }
        self.resolver.validate_options(options)?;

        tracing::info!(
            source = %options.source_language,
            target = %options.target_language,
            summarize = options.summarize,
            chars = text.chars().count(),
            "Processing text"
        );

        let mut state = CallState::default();
        let output = if options.summarize {
            self.summarize_bridged(text, options, &mut state, cancel)
                .await?
        } else {
            let pair = options.language_pair();
            self.gate()
                .ensure_all(
                    &[CapabilityRequirement::Translation(pair.clone())],
                    &mut state,
                    cancel,
                )
                .await?;
            self.translate(&pair, text, cancel).await?
        };

        self.finish(&state);
        Ok(output)
    }

    /// Detect the language `text` is written in.
    ///
    /// Returns `und` when the detector has no candidate at or above the
    /// configured confidence.
    pub async fn detect_language(
        &self,
        text: &str,
        cancel: &CancellationToken,
    ) -> ProcessResult<LanguageCode> {
        if text.trim().is_empty() {
            return Err(ProcessError::invalid_request("Text to analyze is empty"));
        }

        let requirement = CapabilityRequirement::LanguageDetection;
        let mut state = CallState::default();
        self.gate()
            .ensure_all(std::slice::from_ref(&requirement), &mut state, cancel)
            .await?;

        let factory = self
            .engine
            .language_detector
            .as_ref()
            .ok_or_else(|| absent(&requirement))?;
        let detector = cancellable(cancel, async {
            factory
                .create(CreateOptions::new(cancel.clone()))
                .await
                .map_err(operation_error)
        })
        .await?;
        let candidates = cancellable(cancel, async {
            detector.detect(text).await.map_err(operation_error)
        })
        .await?;

        let language = candidates
            .into_iter()
            .filter(|c| c.confidence.is_finite())
            .max_by(|a, b| a.confidence.total_cmp(&b.confidence))
            .filter(|c| c.confidence >= self.min_detection_confidence)
            .map_or_else(LanguageCode::undetermined, |c| c.detected_language);

        tracing::debug!(language = %language, "Detected language");
        self.finish(&state);
        Ok(language)
    }

    async fn summarize_bridged(
        &self,
        text: &str,
        options: &ProcessOptions,
        state: &mut CallState,
        cancel: &CancellationToken,
    ) -> ProcessResult<String> {
        let plan = self
            .resolver
            .plan_summarization(&options.source_language, &options.target_language);
        let params = plan.summarizer_params(&self.summary_style);
        self.gate_for(&params)
            .ensure_all(&plan.requirements(), state, cancel)
            .await?;

        let input = match &plan.pre_translation {
            Some(pair) => self.translate(pair, text, cancel).await?,
            None => text.to_string(),
        };

        let summarize_options = SummarizeOptions {
            context: options.context.clone(),
        };
        let summary = self
            .summarize(&params, &input, &summarize_options, cancel)
            .await?;

        match &plan.post_translation {
            Some(pair) => self.translate(pair, &summary, cancel).await,
            None => Ok(summary),
        }
    }

    async fn translate(
        &self,
        pair: &LanguagePair,
        text: &str,
        cancel: &CancellationToken,
    ) -> ProcessResult<String> {
        let factory = self
            .engine
            .translator
            .as_ref()
            .ok_or_else(|| absent(&CapabilityRequirement::Translation(pair.clone())))?;

        tracing::debug!(pair = %pair, "Translating");
        let translator = cancellable(cancel, async {
            factory
                .create(pair, CreateOptions::new(cancel.clone()))
                .await
                .map_err(operation_error)
        })
        .await?;
        cancellable(cancel, async {
            translator.translate(text).await.map_err(operation_error)
        })
        .await
    }

    async fn summarize(
        &self,
        params: &SummarizerParams,
        text: &str,
        options: &SummarizeOptions,
        cancel: &CancellationToken,
    ) -> ProcessResult<String> {
        let factory = self
            .engine
            .summarizer
            .as_ref()
            .ok_or_else(|| absent(&CapabilityRequirement::Summarization))?;

        tracing::debug!(
            input = ?params.expected_input_languages,
            output = %params.output_language,
            "Summarizing"
        );
        let summarizer = cancellable(cancel, async {
            factory
                .create(params, CreateOptions::new(cancel.clone()))
                .await
                .map_err(operation_error)
        })
        .await?;
        cancellable(cancel, async {
            summarizer
                .summarize(text, options)
                .await
                .map_err(operation_error)
        })
        .await
    }

    const fn gate(&self) -> CapabilityGate<'_> {
        self.gate_for(self.lifecycle.summarizer_params())
    }

    const fn gate_for<'a>(&'a self, summarizer: &'a SummarizerParams) -> CapabilityGate<'a> {
        CapabilityGate {
            lifecycle: &self.lifecycle,
            emitter: &self.emitter,
            summarizer,
        }
    }

    fn finish(&self, state: &CallState) {
        if state.downloaded {
            tracing::info!("Model download finished during call; notifying");
            self.notifier.notify(&self.completion_message);
        }
    }
}
