//! Orchestration core for on-device AI text processing.
//!
//! - `lifecycle` - Model availability checks and downloads (`ModelLifecycleManager`)
//! - `resolver` - Summarizer language bridging (`LanguageCapabilityResolver`)
//! - `orchestrator` - Per-call sequencing (`ProcessOrchestrator`)
//! - `cancellation` - Per-call tokens (`CancellationController`)
//! - `service` - Facade used by adapters (`ProcessingService`)

// Re-export core types for convenience
pub use lingua_core::{
    CapabilityRequirement, EngineHandles, LanguageCode, ModelState, ModelStatus, ProcessError,
    ProcessEvent, ProcessOptions, ProcessRequest, ProcessResult, Settings,
};

pub mod cancellation;
pub mod lifecycle;
pub mod orchestrator;
pub mod resolver;
mod service;

pub use cancellation::{CancellationController, LeaseId, ProcessLease, cancellable};
pub use lifecycle::{ModelLifecycleManager, ProgressCallback, ProgressTracker};
pub use orchestrator::ProcessOrchestrator;
pub use resolver::{BridgeCase, BridgePlan, LanguageCapabilityResolver};
pub use service::ProcessingService;

// Re-export the token type threaded through every call
pub use tokio_util::sync::CancellationToken;
