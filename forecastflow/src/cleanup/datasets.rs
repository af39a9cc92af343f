//! Outdated dataset collection.

use crate::api::ForecastApi;
use crate::errors::OrchestrationError;
use crate::identifiers::{ResourceIdKey, ResourceIdMap, ResourceKind};

use super::{list_outdated_dataset_arns, swallow_missing};

/// Deletes every dataset except the preserved one and verifies the deletions
/// converged.
///
/// # Errors
///
/// [`OrchestrationError::CleanupInProgress`] when the recomputed outdated
/// set is still non-empty after deleting.
pub async fn delete_outdated_datasets(
    api: &dyn ForecastApi,
    ids: &ResourceIdMap,
) -> Result<(), OrchestrationError> {
    let preserved = ids.get(ResourceIdKey::DatasetArn)?;
    let kind = ResourceKind::Dataset;
    tracing::info!(preserved, "collecting outdated datasets");

    let outdated = list_outdated_dataset_arns(api, preserved).await?;
    if outdated.is_empty() {
        tracing::info!("no outdated dataset found");
        return Ok(());
    }

    for arn in &outdated {
        swallow_missing(api.delete_dataset(arn).await, kind, arn)?;
    }

    let remaining = list_outdated_dataset_arns(api, preserved).await?;
    if !remaining.is_empty() {
        return Err(OrchestrationError::CleanupInProgress { kind, remaining });
    }

    tracing::info!("successfully cleaned up outdated datasets");
    Ok(())
}
