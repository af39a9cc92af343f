//! Error taxonomy for stage and cleanup invocations.
//!
//! The external driver distinguishes "stop" from "retry me later" by
//! inspecting [`OrchestrationError::is_retryable`], not by matching on
//! individual variants.

use thiserror::Error;

use crate::api::ApiError;
use crate::identifiers::{ResourceIdKey, ResourceKind};

/// Errors surfaced by stage and cleanup entry points.
#[derive(Debug, Error)]
pub enum OrchestrationError {
    /// A remote resource reported a terminal failed status. The resource
    /// cannot self-heal, so the driver must stop this generation.
    #[error("{kind}: [{resource_id}] setup failed")]
    SetupFailure {
        /// The kind of resource that failed.
        kind: ResourceKind,
        /// The identifier of the failed resource.
        resource_id: String,
    },

    /// The resource exists but has not reached a terminal status yet. The
    /// driver should re-invoke the same stage later.
    #[error("{kind}: [{resource_id}] setup is in progress with current status [{status}]")]
    SetupInProgress {
        /// The kind of resource still provisioning.
        kind: ResourceKind,
        /// The identifier of the resource still provisioning.
        resource_id: String,
        /// The raw status observed on the last probe.
        status: String,
    },

    /// Deletions were issued but verification still found outdated
    /// resources. The driver should re-invoke the same cleanup later.
    #[error("outdated {kind} cleanup is in progress, remaining: {remaining:?}")]
    CleanupInProgress {
        /// The kind of resource still being collected.
        kind: ResourceKind,
        /// Identifiers the verification pass still observed.
        remaining: Vec<String>,
    },

    /// The pipeline was invoked against a state it cannot operate on, e.g.
    /// cleanup found no dataset group at all. Not retryable.
    #[error("{0}")]
    Precondition(String),

    /// A stage asked the identifier map for a key the planner never set.
    #[error("resource identifier map is missing [{key}]")]
    MissingIdentifier {
        /// The absent key.
        key: ResourceIdKey,
    },

    /// A remote error this crate does not interpret (permissions, throttling,
    /// and the like). Retry policy for these belongs to the client layer.
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl OrchestrationError {
    /// Returns true when the driver should re-invoke the failing unit later
    /// instead of stopping the pipeline.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::SetupInProgress { .. } | Self::CleanupInProgress { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_progress_errors_are_retryable() {
        let setup = OrchestrationError::SetupInProgress {
            kind: ResourceKind::Predictor,
            resource_id: "arn:p".to_string(),
            status: "CREATE_IN_PROGRESS".to_string(),
        };
        let cleanup = OrchestrationError::CleanupInProgress {
            kind: ResourceKind::Dataset,
            remaining: vec!["arn:ds".to_string()],
        };

        assert!(setup.is_retryable());
        assert!(cleanup.is_retryable());
    }

    #[test]
    fn test_fatal_errors_are_not_retryable() {
        let failure = OrchestrationError::SetupFailure {
            kind: ResourceKind::Forecast,
            resource_id: "arn:f".to_string(),
        };
        let precondition = OrchestrationError::Precondition("no dataset group".to_string());
        let missing = OrchestrationError::MissingIdentifier {
            key: ResourceIdKey::DatasetArn,
        };
        let remote = OrchestrationError::Api(ApiError::Remote {
            message: "throttled".to_string(),
        });

        assert!(!failure.is_retryable());
        assert!(!precondition.is_retryable());
        assert!(!missing.is_retryable());
        assert!(!remote.is_retryable());
    }

    #[test]
    fn test_setup_failure_message_names_resource() {
        let err = OrchestrationError::SetupFailure {
            kind: ResourceKind::Predictor,
            resource_id: "arn:aws:forecast:us-west-2:123:predictor/p_1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "predictor: [arn:aws:forecast:us-west-2:123:predictor/p_1] setup failed"
        );
    }
}
