//! Capability bring-up.
//!
//! Every requirement of a call is checked before any of them is downloaded,
//! so an unusable capability fails the call before a status event is sent.
//! Summarization is checked and downloaded with the configuration the call
//! will create its summarizer with.

use std::sync::Arc;

use lingua_core::{
    CapabilityRequirement, ModelState, ModelStatus, ProcessError, ProcessEvent, ProcessResult,
    StatusEventEmitter, SummarizerParams,
};
use tokio_util::sync::CancellationToken;

use crate::lifecycle::{ModelLifecycleManager, ProgressCallback};

/// Per-call bookkeeping.
#[derive(Debug, Default)]
pub(crate) struct CallState {
    /// At least one model download happened (or was joined) during the call.
    pub downloaded: bool,
}

pub(crate) struct CapabilityGate<'a> {
    pub lifecycle: &'a ModelLifecycleManager,
    pub emitter: &'a Arc<dyn StatusEventEmitter>,
    pub summarizer: &'a SummarizerParams,
}

impl CapabilityGate<'_> {
    /// Make every requirement ready for use.
    pub async fn ensure_all(
        &self,
        requirements: &[CapabilityRequirement],
        state: &mut CallState,
        cancel: &CancellationToken,
    ) -> ProcessResult<()> {
        let mut statuses = Vec::with_capacity(requirements.len());
        for requirement in requirements {
            let status = self
                .lifecycle
                .check_status_with(requirement, self.summarizer, cancel)
                .await?;
            if let Some(message) = status.error_message() {
                tracing::warn!(capability = %requirement, error = message, "Capability unavailable");
                return Err(ProcessError::capability_unavailable(message));
            }
            statuses.push(status);
        }

        for (requirement, status) in requirements.iter().zip(statuses) {
            self.bring_up(requirement, status, state, cancel).await?;
        }
        Ok(())
    }

    async fn bring_up(
        &self,
        requirement: &CapabilityRequirement,
        status: ModelStatus,
        state: &mut CallState,
        cancel: &CancellationToken,
    ) -> ProcessResult<()> {
        if cancel.is_cancelled() {
            return Err(ProcessError::Cancelled);
        }

        let first = match status.state() {
            ModelState::Available => return Ok(()),
            ModelState::Unavailable => {
                return Err(ProcessError::capability_unavailable(
                    status.error_message().unwrap_or_default(),
                ));
            }
            // Started elsewhere; creating the instance joins it
            ModelState::Downloading => status,
            ModelState::Downloadable => ModelStatus::download_started(),
        };
        self.emit(requirement, first);
        state.downloaded = true;

        let on_progress: ProgressCallback = {
            let emitter = Arc::clone(self.emitter);
            let capability = requirement.clone();
            Arc::new(move |progress| {
                emitter.emit(ProcessEvent::model_status(
                    capability.clone(),
                    ModelStatus::downloading(progress),
                ));
            })
        };

        let result = self
            .lifecycle
            .download_with(requirement, self.summarizer, on_progress, cancel)
            .await;
        match result {
            Ok(terminal) => {
                self.emit(requirement, terminal);
                Ok(())
            }
            Err(err) => {
                self.emit(requirement, ModelStatus::unavailable(err.to_string()));
                Err(err)
            }
        }
    }

    fn emit(&self, requirement: &CapabilityRequirement, status: ModelStatus) {
        self.emitter
            .emit(ProcessEvent::model_status(requirement.clone(), status));
    }
}
