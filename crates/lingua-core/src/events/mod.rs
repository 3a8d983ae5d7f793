//! Events emitted while processing.
//!
//! # Wire Format
//!
//! Events are serialized with a `type` tag:
//!
//! ```json
//! { "type": "model_status_update",
//!   "capability": { "kind": "summarization" },
//!   "status": { "state": "downloading", "downloadProgress": 40 } }
//! ```

use serde::{Deserialize, Serialize};

use crate::domain::{CapabilityRequirement, ModelStatus};

/// Canonical event union for status listeners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProcessEvent {
    /// A capability's model status changed during a download.
    ModelStatusUpdate {
        /// Capability the status belongs to.
        capability: CapabilityRequirement,
        /// New status.
        status: ModelStatus,
    },
}

impl ProcessEvent {
    /// Create a model status update event.
    #[must_use]
    pub const fn model_status(capability: CapabilityRequirement, status: ModelStatus) -> Self {
        Self::ModelStatusUpdate { capability, status }
    }

    /// Capability this event refers to.
    #[must_use]
    pub const fn capability(&self) -> &CapabilityRequirement {
        match self {
            Self::ModelStatusUpdate { capability, .. } => capability,
        }
    }

    /// Status carried by this event.
    #[must_use]
    pub const fn status(&self) -> &ModelStatus {
        match self {
            Self::ModelStatusUpdate { status, .. } => status,
        }
    }

    /// Get the event name for wire protocols.
    #[must_use]
    pub const fn event_name(&self) -> &'static str {
        match self {
            Self::ModelStatusUpdate { .. } => "modelStatusUpdate",
        }
    }
}
