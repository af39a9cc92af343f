//! Classification of raw resource status strings.
//!
//! The service reports a type-specific status vocabulary, but the protocol
//! only needs "done / failed / not yet": exactly two sentinels are terminal
//! and every other value (all the `CREATE_IN_PROGRESS`-style strings) is
//! treated uniformly as still pending.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::OrchestrationError;
use crate::identifiers::ResourceKind;

/// Raw status marking a successfully provisioned resource.
pub const ACTIVE_STATUS: &str = "ACTIVE";

/// Raw status marking a resource that failed provisioning.
pub const FAILED_STATUS: &str = "FAILED";

/// What a raw status string means to the orchestration protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusClassification {
    /// The resource finished provisioning and is usable.
    Active,
    /// The resource failed terminally and will not recover.
    Failed,
    /// The resource has not reached a terminal status yet.
    Pending,
}

impl StatusClassification {
    /// Classifies a raw status string.
    #[must_use]
    pub fn classify(raw_status: &str) -> Self {
        match raw_status {
            ACTIVE_STATUS => Self::Active,
            FAILED_STATUS => Self::Failed,
            _ => Self::Pending,
        }
    }

    /// Returns true when the status will not change without external action.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Active | Self::Failed)
    }
}

impl fmt::Display for StatusClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Failed => write!(f, "failed"),
            Self::Pending => write!(f, "pending"),
        }
    }
}

/// Converts a post-create status observation into the stage outcome.
///
/// # Errors
///
/// Returns [`OrchestrationError::SetupFailure`] for a failed resource and
/// [`OrchestrationError::SetupInProgress`] for anything not yet terminal.
pub fn setup_outcome(
    raw_status: &str,
    kind: ResourceKind,
    resource_id: &str,
) -> Result<(), OrchestrationError> {
    match StatusClassification::classify(raw_status) {
        StatusClassification::Active => {
            tracing::info!(%kind, resource_id, "successfully created ACTIVE resource");
            Ok(())
        }
        StatusClassification::Failed => Err(OrchestrationError::SetupFailure {
            kind,
            resource_id: resource_id.to_string(),
        }),
        StatusClassification::Pending => Err(OrchestrationError::SetupInProgress {
            kind,
            resource_id: resource_id.to_string(),
            status: raw_status.to_string(),
        }),
    }
}
