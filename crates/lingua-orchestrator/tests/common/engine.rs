//! Scriptable fake of the on-device AI engine.
//!
//! Each capability has a model slot with a scripted availability and a
//! scripted download. Creating an instance with a download monitor runs the
//! download script; creating one without a monitor hands out a ready
//! instance. Every operation is appended to a shared call log.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use lingua_core::{
    Availability, CapabilityRequirement, CreateOptions, DetectionCandidate, EngineError,
    EngineHandles, LanguageCode, LanguageDetector, LanguageDetectorFactory, LanguagePair,
    SummarizeOptions, Summarizer, SummarizerFactory, SummarizerParams, Translator,
    TranslatorFactory,
};
use tokio::sync::Notify;

/// Callback run inside an engine operation.
pub type Hook = Arc<dyn Fn() + Send + Sync>;

type TranslateFn = Arc<dyn Fn(&LanguagePair, &str) -> String + Send + Sync>;
type SummarizeFn = Arc<dyn Fn(&SummarizerParams, &str) -> String + Send + Sync>;

/// An observable engine interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall {
    Download(CapabilityRequirement),
    Translate { pair: LanguagePair, text: String },
    Summarize {
        params: SummarizerParams,
        text: String,
        context: Option<String>,
    },
    Detect { text: String },
}

/// What a model download does when it runs.
#[derive(Debug, Clone)]
pub enum DownloadScript {
    /// Report the loaded fractions, then finish.
    Complete(Vec<f64>),
    /// Report the loaded fractions, then fail.
    Fail { loaded: Vec<f64>, message: String },
    /// Report the loaded fractions, then wait for the abort signal.
    Stall(Vec<f64>),
}

impl Default for DownloadScript {
    fn default() -> Self {
        Self::Complete(Vec::new())
    }
}

#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<EngineCall>>>);

impl CallLog {
    fn push(&self, call: EngineCall) {
        self.0.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<EngineCall> {
        self.0.lock().unwrap().clone()
    }

    pub fn translations(&self) -> Vec<(LanguagePair, String)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                EngineCall::Translate { pair, text } => Some((pair, text)),
                _ => None,
            })
            .collect()
    }

    pub fn summaries(&self) -> Vec<(SummarizerParams, String)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                EngineCall::Summarize { params, text, .. } => Some((params, text)),
                _ => None,
            })
            .collect()
    }

    pub fn summary_contexts(&self) -> Vec<Option<String>> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                EngineCall::Summarize { context, .. } => Some(context),
                _ => None,
            })
            .collect()
    }

    pub fn downloads(&self) -> Vec<CapabilityRequirement> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                EngineCall::Download(requirement) => Some(requirement),
                _ => None,
            })
            .collect()
    }
}

// ── Model slot ─────────────────────────────────────────────────────

/// Availability and download script for one model.
pub struct ModelSlot {
    availability: Mutex<Result<Availability, EngineError>>,
    download: Mutex<DownloadScript>,
    /// Signalled when a `Stall` download starts waiting.
    pub stalled: Notify,
}

impl Default for ModelSlot {
    fn default() -> Self {
        Self {
            availability: Mutex::new(Ok(Availability::Available)),
            download: Mutex::new(DownloadScript::default()),
            stalled: Notify::new(),
        }
    }
}

impl ModelSlot {
    pub fn set_availability(&self, availability: Availability) {
        *self.availability.lock().unwrap() = Ok(availability);
    }

    pub fn set_availability_error(&self, error: EngineError) {
        *self.availability.lock().unwrap() = Err(error);
    }

    pub fn set_download(&self, script: DownloadScript) {
        *self.download.lock().unwrap() = script;
    }

    fn availability(&self) -> Result<Availability, EngineError> {
        self.availability.lock().unwrap().clone()
    }

    async fn run_download(&self, options: &CreateOptions) -> Result<(), EngineError> {
        let script = self.download.lock().unwrap().clone();
        match script {
            DownloadScript::Complete(loaded) => {
                loaded.into_iter().for_each(|l| options.report_loaded(l));
                self.set_availability(Availability::Available);
                Ok(())
            }
            DownloadScript::Fail { loaded, message } => {
                loaded.into_iter().for_each(|l| options.report_loaded(l));
                Err(EngineError::Failed(message))
            }
            DownloadScript::Stall(loaded) => {
                loaded.into_iter().for_each(|l| options.report_loaded(l));
                self.stalled.notify_one();
                options.cancel.cancelled().await;
                Err(EngineError::Aborted)
            }
        }
    }
}

// ── Translator ─────────────────────────────────────────────────────

pub struct FakeTranslatorFactory {
    pub model: ModelSlot,
    pairs: Mutex<HashMap<LanguagePair, Availability>>,
    responder: Mutex<TranslateFn>,
    failure: Mutex<Option<EngineError>>,
    on_translate: Mutex<Option<Hook>>,
    log: CallLog,
}

impl FakeTranslatorFactory {
    fn new(log: CallLog) -> Self {
        Self {
            model: ModelSlot::default(),
            pairs: Mutex::new(HashMap::new()),
            responder: Mutex::new(Arc::new(|pair: &LanguagePair, text: &str| {
                format!("[{}] {text}", pair.target)
            })),
            failure: Mutex::new(None),
            on_translate: Mutex::new(None),
            log,
        }
    }

    /// Override availability for a single pair.
    pub fn set_pair_availability(&self, pair: LanguagePair, availability: Availability) {
        self.pairs.lock().unwrap().insert(pair, availability);
    }

    pub fn respond_with(
        &self,
        f: impl Fn(&LanguagePair, &str) -> String + Send + Sync + 'static,
    ) {
        *self.responder.lock().unwrap() = Arc::new(f);
    }

    pub fn fail_with(&self, error: EngineError) {
        *self.failure.lock().unwrap() = Some(error);
    }

    /// Run `hook` inside every translate call.
    pub fn on_translate(&self, hook: Hook) {
        *self.on_translate.lock().unwrap() = Some(hook);
    }
}

#[async_trait]
impl TranslatorFactory for FakeTranslatorFactory {
    async fn availability(&self, pair: &LanguagePair) -> Result<Availability, EngineError> {
        let pinned = self.pairs.lock().unwrap().get(pair).copied();
        pinned.map_or_else(|| self.model.availability(), Ok)
    }

    async fn create(
        &self,
        pair: &LanguagePair,
        options: CreateOptions,
    ) -> Result<Box<dyn Translator>, EngineError> {
        if options.monitor.is_some() {
            self.log
                .push(EngineCall::Download(CapabilityRequirement::Translation(pair.clone())));
            self.model.run_download(&options).await?;
            self.pairs.lock().unwrap().remove(pair);
        }

        Ok(Box::new(FakeTranslator {
            pair: pair.clone(),
            responder: self.responder.lock().unwrap().clone(),
            failure: self.failure.lock().unwrap().clone(),
            hook: self.on_translate.lock().unwrap().clone(),
            log: self.log.clone(),
        }))
    }
}

struct FakeTranslator {
    pair: LanguagePair,
    responder: TranslateFn,
    failure: Option<EngineError>,
    hook: Option<Hook>,
    log: CallLog,
}

#[async_trait]
impl Translator for FakeTranslator {
    async fn translate(&self, text: &str) -> Result<String, EngineError> {
        self.log.push(EngineCall::Translate {
            pair: self.pair.clone(),
            text: text.to_string(),
        });
        if let Some(hook) = &self.hook {
            hook();
        }
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok((self.responder)(&self.pair, text)),
        }
    }
}

// ── Summarizer ─────────────────────────────────────────────────────

/// Input languages and output language of a summarizer.
type SummarizerConfig = (Vec<LanguageCode>, LanguageCode);

fn config_of(params: &SummarizerParams) -> SummarizerConfig {
    (
        params.expected_input_languages.clone(),
        params.output_language.clone(),
    )
}

pub struct FakeSummarizerFactory {
    pub model: ModelSlot,
    configs: Mutex<HashMap<SummarizerConfig, Availability>>,
    downloaded: Mutex<Vec<SummarizerParams>>,
    responder: Mutex<SummarizeFn>,
    failure: Mutex<Option<EngineError>>,
    log: CallLog,
}

impl FakeSummarizerFactory {
    fn new(log: CallLog) -> Self {
        Self {
            model: ModelSlot::default(),
            configs: Mutex::new(HashMap::new()),
            downloaded: Mutex::new(Vec::new()),
            responder: Mutex::new(Arc::new(|params: &SummarizerParams, text: &str| {
                format!("summary[{}]({text})", params.output_language)
            })),
            failure: Mutex::new(None),
            log,
        }
    }

    /// Override availability for one `input -> output` configuration.
    pub fn set_config_availability(
        &self,
        input: &str,
        output: &str,
        availability: Availability,
    ) {
        self.configs.lock().unwrap().insert(
            (vec![LanguageCode::new(input)], LanguageCode::new(output)),
            availability,
        );
    }

    /// Configurations a download was run for, in order.
    pub fn downloaded(&self) -> Vec<SummarizerParams> {
        self.downloaded.lock().unwrap().clone()
    }

    pub fn respond_with(
        &self,
        f: impl Fn(&SummarizerParams, &str) -> String + Send + Sync + 'static,
    ) {
        *self.responder.lock().unwrap() = Arc::new(f);
    }

    pub fn fail_with(&self, error: EngineError) {
        *self.failure.lock().unwrap() = Some(error);
    }

    fn availability_of(&self, params: &SummarizerParams) -> Result<Availability, EngineError> {
        let pinned = self.configs.lock().unwrap().get(&config_of(params)).copied();
        pinned.map_or_else(|| self.model.availability(), Ok)
    }
}

#[async_trait]
impl SummarizerFactory for FakeSummarizerFactory {
    async fn availability(&self, params: &SummarizerParams) -> Result<Availability, EngineError> {
        self.availability_of(params)
    }

    async fn create(
        &self,
        params: &SummarizerParams,
        options: CreateOptions,
    ) -> Result<Box<dyn Summarizer>, EngineError> {
        if options.monitor.is_some() {
            self.log
                .push(EngineCall::Download(CapabilityRequirement::Summarization));
            self.downloaded.lock().unwrap().push(params.clone());
            self.model.run_download(&options).await?;
            self.configs.lock().unwrap().remove(&config_of(params));
        } else if self.availability_of(params)? != Availability::Available {
            return Err(EngineError::Failed(format!(
                "Summarizer model for {} is not downloaded",
                params.output_language
            )));
        }

        Ok(Box::new(FakeSummarizer {
            params: params.clone(),
            responder: self.responder.lock().unwrap().clone(),
            failure: self.failure.lock().unwrap().clone(),
            log: self.log.clone(),
        }))
    }
}

struct FakeSummarizer {
    params: SummarizerParams,
    responder: SummarizeFn,
    failure: Option<EngineError>,
    log: CallLog,
}

#[async_trait]
impl Summarizer for FakeSummarizer {
    async fn summarize(
        &self,
        text: &str,
        options: &SummarizeOptions,
    ) -> Result<String, EngineError> {
        self.log.push(EngineCall::Summarize {
            params: self.params.clone(),
            text: text.to_string(),
            context: options.context.clone(),
        });
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok((self.responder)(&self.params, text)),
        }
    }
}

// ── Language detector ──────────────────────────────────────────────

pub struct FakeDetectorFactory {
    pub model: ModelSlot,
    candidates: Mutex<Vec<DetectionCandidate>>,
    log: CallLog,
}

impl FakeDetectorFactory {
    fn new(log: CallLog) -> Self {
        Self {
            model: ModelSlot::default(),
            candidates: Mutex::new(Vec::new()),
            log,
        }
    }

    pub fn set_candidates(&self, candidates: Vec<DetectionCandidate>) {
        *self.candidates.lock().unwrap() = candidates;
    }
}

#[async_trait]
impl LanguageDetectorFactory for FakeDetectorFactory {
    async fn availability(&self) -> Result<Availability, EngineError> {
        self.model.availability()
    }

    async fn create(
        &self,
        options: CreateOptions,
    ) -> Result<Box<dyn LanguageDetector>, EngineError> {
        if options.monitor.is_some() {
            self.log
                .push(EngineCall::Download(CapabilityRequirement::LanguageDetection));
            self.model.run_download(&options).await?;
        }

        Ok(Box::new(FakeDetector {
            candidates: self.candidates.lock().unwrap().clone(),
            log: self.log.clone(),
        }))
    }
}

struct FakeDetector {
    candidates: Vec<DetectionCandidate>,
    log: CallLog,
}

#[async_trait]
impl LanguageDetector for FakeDetector {
    async fn detect(&self, text: &str) -> Result<Vec<DetectionCandidate>, EngineError> {
        self.log.push(EngineCall::Detect {
            text: text.to_string(),
        });
        Ok(self.candidates.clone())
    }
}

// ── Engine ─────────────────────────────────────────────────────────

/// All three capabilities sharing one call log.
pub struct FakeEngine {
    pub translator: Arc<FakeTranslatorFactory>,
    pub summarizer: Arc<FakeSummarizerFactory>,
    pub detector: Arc<FakeDetectorFactory>,
    pub log: CallLog,
    summarizer_present: bool,
}

impl FakeEngine {
    /// Every capability present and every model ready.
    pub fn new() -> Self {
        let log = CallLog::default();
        Self {
            translator: Arc::new(FakeTranslatorFactory::new(log.clone())),
            summarizer: Arc::new(FakeSummarizerFactory::new(log.clone())),
            detector: Arc::new(FakeDetectorFactory::new(log.clone())),
            log,
            summarizer_present: true,
        }
    }

    /// A platform that does not implement summarization.
    pub fn without_summarizer(mut self) -> Self {
        self.summarizer_present = false;
        self
    }

    pub fn handles(&self) -> EngineHandles {
        let handles = EngineHandles::none()
            .with_translator(Arc::clone(&self.translator) as Arc<dyn TranslatorFactory>)
            .with_language_detector(Arc::clone(&self.detector) as Arc<dyn LanguageDetectorFactory>);
        if self.summarizer_present {
            handles.with_summarizer(Arc::clone(&self.summarizer) as Arc<dyn SummarizerFactory>)
        } else {
            handles
        }
    }
}
