//! Outdated dataset import job collection.
//!
//! Import jobs have no preserved identifier of their own: a job is outdated
//! exactly when the dataset it imported into is outdated. The two-level
//! computation (outdated datasets, then their import jobs) is redone in full
//! for the verification pass, because dataset cleanup may have progressed
//! between the two listings.

use crate::api::{Filter, ForecastApi};
use crate::errors::OrchestrationError;
use crate::identifiers::{ResourceIdKey, ResourceIdMap, ResourceKind};
use crate::paginate::drain_pages;

use super::{list_outdated_dataset_arns, swallow_missing, IMPORT_JOB_LINEAGE};

/// Deletes every import job belonging to an outdated dataset and verifies
/// the deletions converged.
///
/// # Errors
///
/// [`OrchestrationError::CleanupInProgress`] when the recomputed outdated
/// set is still non-empty after deleting.
pub async fn delete_outdated_dataset_import_jobs(
    api: &dyn ForecastApi,
    ids: &ResourceIdMap,
) -> Result<(), OrchestrationError> {
    let preserved_dataset = ids.get(ResourceIdKey::DatasetArn)?;
    let kind = ResourceKind::DatasetImportJob;
    tracing::info!(preserved_dataset, "collecting outdated dataset import jobs");

    let outdated = list_outdated_import_job_arns(api, preserved_dataset).await?;
    if outdated.is_empty() {
        tracing::info!("no outdated dataset import job found");
        return Ok(());
    }

    for arn in &outdated {
        tracing::info!(%arn, "about to delete dataset import job");
        swallow_missing(api.delete_dataset_import_job(arn).await, kind, arn)?;
    }

    let remaining = list_outdated_import_job_arns(api, preserved_dataset).await?;
    if !remaining.is_empty() {
        return Err(OrchestrationError::CleanupInProgress { kind, remaining });
    }

    tracing::info!("successfully cleaned up outdated dataset import jobs");
    Ok(())
}

/// Lists the import jobs of every outdated dataset, one filtered listing per
/// parent.
async fn list_outdated_import_job_arns(
    api: &dyn ForecastApi,
    preserved_dataset_arn: &str,
) -> Result<Vec<String>, OrchestrationError> {
    let outdated_datasets = list_outdated_dataset_arns(api, preserved_dataset_arn).await?;

    let mut outdated_jobs = Vec::new();
    for dataset_arn in &outdated_datasets {
        let filters = [Filter::is(IMPORT_JOB_LINEAGE.parent_filter_key, dataset_arn)];
        let jobs = drain_pages(|token| api.list_dataset_import_jobs(&filters, token)).await?;
        outdated_jobs.extend(jobs.into_iter().map(|j| j.dataset_import_job_arn));
    }

    Ok(outdated_jobs)
}
