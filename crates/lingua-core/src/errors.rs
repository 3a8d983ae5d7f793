//! Processing error taxonomy.
//!
//! These errors are serializable so adapters can forward them to the UI
//! unchanged. Engine messages are carried as strings and displayed verbatim.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for orchestration calls.
#[derive(Clone, Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProcessError {
    /// The capability is absent or cannot be used on this device.
    #[error("{message}")]
    CapabilityUnavailable {
        /// Message reported by the lifecycle check.
        message: String,
    },

    /// Model download failed after it had started.
    #[error("{message}")]
    DownloadFailed {
        /// Message reported by the engine.
        message: String,
    },

    /// Translate, summarize or detect failed on a ready capability.
    #[error("{message}")]
    Operation {
        /// Message reported by the engine.
        message: String,
    },

    /// The request was rejected before any engine call.
    #[error("Invalid request: {message}")]
    InvalidRequest {
        /// What was wrong with the request.
        message: String,
    },

    /// The call was cancelled.
    #[error("Processing cancelled")]
    Cancelled,
}

impl ProcessError {
    /// Create a capability unavailable error.
    pub fn capability_unavailable(message: impl Into<String>) -> Self {
        Self::CapabilityUnavailable {
            message: message.into(),
        }
    }

    /// Create a download failed error.
    pub fn download_failed(message: impl Into<String>) -> Self {
        Self::DownloadFailed {
            message: message.into(),
        }
    }

    /// Create an operation error.
    pub fn operation(message: impl Into<String>) -> Self {
        Self::Operation {
            message: message.into(),
        }
    }

    /// Create an invalid request error.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Check if this is a cancellation.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Whether the UI should show an error banner for this error.
    ///
    /// Cancellation is user-initiated and is never reported as a failure.
    #[must_use]
    pub const fn is_reportable(&self) -> bool {
        !self.is_cancelled()
    }
}

/// Convenience result type for orchestration calls.
pub type ProcessResult<T> = Result<T, ProcessError>;
