//! Generational garbage collection of superseded resources.
//!
//! Each routine recomputes its outdated set from the remote listing on every
//! invocation: the backing service is the only source of truth, and a
//! previous invocation's deletions may or may not have converged by now.
//! Deletion acknowledgments are asynchronous, so after deleting, most
//! routines re-list and raise a retryable signal until the outdated set is
//! observed empty.

mod dataset_groups;
mod datasets;
mod export_jobs;
mod forecasts;
mod import_jobs;
mod predictors;

pub use dataset_groups::delete_outdated_dataset_groups;
pub use datasets::delete_outdated_datasets;
pub use export_jobs::delete_outdated_forecast_export_jobs;
pub use forecasts::{delete_outdated_forecasts, RETAINED_FORECAST_COUNT};
pub use import_jobs::delete_outdated_dataset_import_jobs;
pub use predictors::delete_outdated_predictors;

use crate::api::{ApiError, ApiResult, ForecastApi};
use crate::identifiers::ResourceKind;
use crate::paginate::drain_pages;

/// Filter key selecting on a summary's raw status.
pub(crate) const STATUS_FILTER_KEY: &str = "Status";

/// How a dependent resource kind hangs off its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineageRule {
    /// The dependent kind whose outdated set derives from the parent's.
    pub dependent: ResourceKind,
    /// The parent kind.
    pub parent: ResourceKind,
    /// Filter key matching a dependent summary against a parent identity.
    pub parent_filter_key: &'static str,
}

/// Import jobs hang off datasets.
pub const IMPORT_JOB_LINEAGE: LineageRule = LineageRule {
    dependent: ResourceKind::DatasetImportJob,
    parent: ResourceKind::Dataset,
    parent_filter_key: "DatasetArn",
};

/// Forecasts hang off predictors.
pub const FORECAST_LINEAGE: LineageRule = LineageRule {
    dependent: ResourceKind::Forecast,
    parent: ResourceKind::Predictor,
    parent_filter_key: "PredictorArn",
};

/// Export jobs hang off forecasts.
pub const EXPORT_JOB_LINEAGE: LineageRule = LineageRule {
    dependent: ResourceKind::ForecastExportJob,
    parent: ResourceKind::Forecast,
    parent_filter_key: "ForecastArn",
};

/// Every dependent kind's lineage, consistent with the creation chain
/// (dataset group → dataset → import job; predictor → forecast → export job).
pub const LINEAGE_RULES: &[LineageRule] =
    &[IMPORT_JOB_LINEAGE, FORECAST_LINEAGE, EXPORT_JOB_LINEAGE];

/// Treats a missing resource as already deleted.
///
/// # Errors
///
/// Every delete failure other than `NotFound` passes through.
pub(crate) fn swallow_missing(
    result: ApiResult<()>,
    kind: ResourceKind,
    arn: &str,
) -> ApiResult<()> {
    match result {
        Err(ApiError::NotFound { .. }) => {
            tracing::info!(%kind, arn, "resource has already been deleted");
            Ok(())
        }
        other => other,
    }
}

/// Lists every dataset group ARN.
pub(crate) async fn list_dataset_group_arns(api: &dyn ForecastApi) -> ApiResult<Vec<String>> {
    let groups = drain_pages(|token| api.list_dataset_groups(token)).await?;
    Ok(groups.into_iter().map(|g| g.dataset_group_arn).collect())
}

/// Lists every dataset ARN except the preserved one.
pub(crate) async fn list_outdated_dataset_arns(
    api: &dyn ForecastApi,
    preserved_dataset_arn: &str,
) -> ApiResult<Vec<String>> {
    let datasets = drain_pages(|token| api.list_datasets(token)).await?;
    Ok(datasets
        .into_iter()
        .map(|d| d.dataset_arn)
        .filter(|arn| arn != preserved_dataset_arn)
        .collect())
}

/// Lists every predictor ARN except the preserved one.
pub(crate) async fn list_outdated_predictor_arns(
    api: &dyn ForecastApi,
    preserved_predictor_arn: &str,
) -> ApiResult<Vec<String>> {
    let predictors = drain_pages(|token| api.list_predictors(token)).await?;
    Ok(predictors
        .into_iter()
        .map(|p| p.predictor_arn)
        .filter(|arn| arn != preserved_predictor_arn)
        .collect())
}
