//! Idempotent provisioning stages.
//!
//! Every stage follows the same shape against the asynchronous provisioning
//! API: probe the resource this generation expects to own, succeed
//! immediately if it is already active, fail fatally if it already failed,
//! and otherwise issue an idempotent create and re-probe once. A resource
//! still provisioning after that surfaces as a retryable signal for the
//! external driver, which re-invokes the stage later.
//!
//! The dataset-group stage is the documented exception: the service offers
//! no describe for groups, its create is synchronous, and "already exists"
//! counts as success.

mod dataset;
mod dataset_group;
mod export_job;
mod forecast;
mod import_job;
mod predictor;

pub use dataset::DatasetStage;
pub use dataset_group::DatasetGroupStage;
pub use export_job::ForecastExportJobStage;
pub use forecast::ForecastStage;
pub use import_job::DatasetImportJobStage;
pub use predictor::PredictorStage;

use async_trait::async_trait;

use crate::api::{ApiError, ApiResult, ForecastApi};
use crate::errors::OrchestrationError;
use crate::identifiers::{ResourceIdKey, ResourceIdMap, ResourceKind};
use crate::status::{setup_outcome, StatusClassification};

/// Service domain for dataset and dataset-group creation.
pub(crate) const DOMAIN: &str = "CUSTOM";

/// The per-resource capabilities the provisioning runner needs.
#[async_trait]
pub trait StageResource: Send + Sync {
    /// The kind of resource this stage provisions.
    fn kind(&self) -> ResourceKind;

    /// The identifier-map key holding the ARN this stage expects to produce.
    fn arn_key(&self) -> ResourceIdKey;

    /// Reports the resource's raw status, failing with
    /// [`ApiError::NotFound`] when it does not exist.
    async fn describe(&self, api: &dyn ForecastApi, arn: &str) -> ApiResult<String>;

    /// Submits the create request built from the identifier map.
    async fn create(
        &self,
        api: &dyn ForecastApi,
        ids: &ResourceIdMap,
    ) -> Result<(), OrchestrationError>;
}

/// Runs the probe → create → re-probe protocol for one resource.
///
/// # Errors
///
/// - [`OrchestrationError::SetupFailure`] when the resource reports a
///   terminal failed status, on either probe.
/// - [`OrchestrationError::SetupInProgress`] when the post-create probe sees
///   a non-terminal status; the driver retries the stage later.
/// - Pass-through API and identifier-map errors.
pub async fn provision(
    resource: &dyn StageResource,
    api: &dyn ForecastApi,
    ids: &ResourceIdMap,
) -> Result<(), OrchestrationError> {
    let kind = resource.kind();
    let arn = ids.get(resource.arn_key())?.to_string();

    match resource.describe(api, &arn).await {
        Ok(status) => match StatusClassification::classify(&status) {
            StatusClassification::Active => {
                tracing::info!(%kind, %arn, "resource is already ACTIVE, nothing to create");
                return Ok(());
            }
            StatusClassification::Failed => {
                return Err(OrchestrationError::SetupFailure {
                    kind,
                    resource_id: arn,
                });
            }
            StatusClassification::Pending => {
                tracing::info!(%kind, %arn, %status, "resource exists but is not terminal yet");
            }
        },
        Err(ApiError::NotFound { .. }) => {
            tracing::info!(%kind, %arn, "cannot find resource, proceeding to create a new one");
        }
        Err(err) => return Err(err.into()),
    }

    match resource.create(api, ids).await {
        Ok(()) => {
            tracing::info!(%kind, %arn, "finished triggering create call");
        }
        Err(OrchestrationError::Api(ApiError::AlreadyExists { .. })) => {
            tracing::info!(%kind, %arn, "resource already exists, treating create as success");
        }
        Err(err) => return Err(err),
    }

    let status = resource.describe(api, &arn).await?;
    setup_outcome(&status, kind, &arn)
}
