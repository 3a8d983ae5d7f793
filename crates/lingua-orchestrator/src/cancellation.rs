//! Cancellation of in-flight orchestration calls.
//!
//! Every call gets its own `CancellationToken` through a `ProcessLease`.
//! The token is checked before each suspension point and again before a
//! result is consumed, so a result that raced with cancellation is dropped.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use lingua_core::{ProcessError, ProcessResult};
use tokio_util::sync::CancellationToken;

/// Lease ID for tracking in-flight calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LeaseId(u64);

#[derive(Debug, Default)]
struct LeaseRegistry {
    next_id: u64,
    active: HashMap<LeaseId, CancellationToken>,
}

/// Issues and cancels per-call cancellation tokens.
#[derive(Debug, Clone, Default)]
pub struct CancellationController {
    registry: Arc<Mutex<LeaseRegistry>>,
}

impl CancellationController {
    /// Create a controller with no active calls.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a fresh token for one orchestration call.
    ///
    /// The token is unregistered when the lease is dropped.
    pub fn issue(&self) -> ProcessLease {
        let mut registry = self.lock();
        registry.next_id += 1;
        let id = LeaseId(registry.next_id);
        let token = CancellationToken::new();
        registry.active.insert(id, token.clone());
        drop(registry);

        tracing::trace!(lease = id.0, "Issued cancellation lease");
        ProcessLease {
            id,
            token,
            registry: Arc::clone(&self.registry),
        }
    }

    /// Abort every in-flight call. Synchronous and idempotent.
    pub fn cancel_processing(&self) {
        let tokens: Vec<CancellationToken> = self.lock().active.drain().map(|(_, t)| t).collect();
        if !tokens.is_empty() {
            tracing::info!(count = tokens.len(), "Cancelling in-flight processing");
        }
        for token in tokens {
            token.cancel();
        }
    }

    /// Number of calls currently holding a lease.
    pub fn active_count(&self) -> usize {
        self.lock().active.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, LeaseRegistry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Ownership of one call's cancellation token.
#[derive(Debug)]
pub struct ProcessLease {
    id: LeaseId,
    token: CancellationToken,
    registry: Arc<Mutex<LeaseRegistry>>,
}

impl ProcessLease {
    /// This lease's ID.
    pub const fn id(&self) -> LeaseId {
        self.id
    }

    /// The token to thread through the call.
    pub const fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Whether the call has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Drop for ProcessLease {
    fn drop(&mut self) {
        self.registry
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .active
            .remove(&self.id);
    }
}

/// Run `operation` unless or until `cancel` fires.
///
/// Checks the token before starting and again after completion; a result
/// that finished concurrently with cancellation is discarded.
pub async fn cancellable<T, F>(cancel: &CancellationToken, operation: F) -> ProcessResult<T>
where
    F: Future<Output = ProcessResult<T>>,
{
    if cancel.is_cancelled() {
        return Err(ProcessError::Cancelled);
    }

    let result = tokio::select! {
        biased;

        () = cancel.cancelled() => return Err(ProcessError::Cancelled),

        result = operation => result,
    };

    if cancel.is_cancelled() {
        return Err(ProcessError::Cancelled);
    }
    result
}
