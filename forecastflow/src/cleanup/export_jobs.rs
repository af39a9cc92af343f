//! Outdated forecast export job collection.
//!
//! Export jobs are selected with a single inverted filter (everything whose
//! forecast is not the preserved one) rather than the two-level parent walk
//! used for import jobs. The service filters server-side, so one listing per
//! pass suffices.

use crate::api::{Filter, ForecastApi};
use crate::errors::OrchestrationError;
use crate::identifiers::{ResourceIdKey, ResourceIdMap, ResourceKind};
use crate::paginate::drain_pages;

use super::{swallow_missing, EXPORT_JOB_LINEAGE};

/// Deletes every export job not belonging to the preserved forecast and
/// verifies the deletions converged.
///
/// # Errors
///
/// [`OrchestrationError::CleanupInProgress`] when the recomputed outdated
/// set is still non-empty after deleting.
pub async fn delete_outdated_forecast_export_jobs(
    api: &dyn ForecastApi,
    ids: &ResourceIdMap,
) -> Result<(), OrchestrationError> {
    let preserved_forecast = ids.get(ResourceIdKey::ForecastArn)?;
    let kind = ResourceKind::ForecastExportJob;
    tracing::info!(preserved_forecast, "collecting outdated forecast export jobs");

    let outdated = list_outdated_export_job_arns(api, preserved_forecast).await?;
    if outdated.is_empty() {
        tracing::info!("no outdated forecast export job found");
        return Ok(());
    }

    for arn in &outdated {
        swallow_missing(api.delete_forecast_export_job(arn).await, kind, arn)?;
    }

    let remaining = list_outdated_export_job_arns(api, preserved_forecast).await?;
    if !remaining.is_empty() {
        return Err(OrchestrationError::CleanupInProgress { kind, remaining });
    }

    tracing::info!("successfully cleaned up outdated forecast export jobs");
    Ok(())
}

async fn list_outdated_export_job_arns(
    api: &dyn ForecastApi,
    preserved_forecast_arn: &str,
) -> Result<Vec<String>, OrchestrationError> {
    let filters = [Filter::is_not(
        EXPORT_JOB_LINEAGE.parent_filter_key,
        preserved_forecast_arn,
    )];
    let jobs = drain_pages(|token| api.list_forecast_export_jobs(&filters, token)).await?;
    Ok(jobs.into_iter().map(|j| j.forecast_export_job_arn).collect())
}
