//! Common test utilities.
//!
//! Scriptable engine fakes, recording ports and a harness that wires them
//! into a `ProcessingService`.

#![allow(dead_code)]

pub mod engine;
pub mod recorder;

use std::sync::Arc;

use lingua_core::{CapabilityRequirement, ModelStatus, Settings};
use lingua_orchestrator::ProcessingService;

use engine::FakeEngine;
use recorder::{RecordingEmitter, RecordingNotifier};

/// Route orchestrator logs to the test writer. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// A service over a fake engine with every port recorded.
pub struct Harness {
    pub engine: FakeEngine,
    pub emitter: RecordingEmitter,
    pub notifier: RecordingNotifier,
    pub service: ProcessingService,
}

impl Harness {
    pub fn new(settings: &Settings) -> Self {
        Self::with_engine(FakeEngine::new(), settings)
    }

    pub fn with_defaults() -> Self {
        Self::new(&Settings::with_defaults())
    }

    pub fn with_engine(engine: FakeEngine, settings: &Settings) -> Self {
        init_tracing();
        let emitter = RecordingEmitter::new();
        let notifier = RecordingNotifier::new();
        let service = ProcessingService::new(
            engine.handles(),
            Arc::new(emitter.clone()),
            Arc::new(notifier.clone()),
            settings,
        )
        .expect("test settings are valid");

        Self {
            engine,
            emitter,
            notifier,
            service,
        }
    }

    /// Statuses emitted for one capability, in order.
    pub fn statuses_for(&self, requirement: &CapabilityRequirement) -> Vec<ModelStatus> {
        self.emitter
            .events()
            .into_iter()
            .filter(|event| event.capability() == requirement)
            .map(|event| event.status().clone())
            .collect()
    }

    /// Notification messages delivered so far.
    pub fn notifications(&self) -> Vec<String> {
        self.notifier.messages()
    }
}
