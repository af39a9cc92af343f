//! Outdated dataset group collection.

use crate::api::ForecastApi;
use crate::errors::OrchestrationError;
use crate::identifiers::{ResourceIdKey, ResourceIdMap, ResourceKind};

use super::{list_dataset_group_arns, swallow_missing};

/// Deletes every dataset group except the preserved one and verifies the
/// deletions converged.
///
/// At least one dataset group must exist by the time this runs (the
/// creation stage for the current generation has already completed), so an
/// empty listing means the pipeline was invoked out of order.
///
/// # Errors
///
/// - [`OrchestrationError::Precondition`] when no dataset group exists at
///   all.
/// - [`OrchestrationError::CleanupInProgress`] when the post-delete listing
///   is not exactly the preserved group.
pub async fn delete_outdated_dataset_groups(
    api: &dyn ForecastApi,
    ids: &ResourceIdMap,
) -> Result<(), OrchestrationError> {
    let preserved = ids.get(ResourceIdKey::DatasetGroupArn)?;
    let kind = ResourceKind::DatasetGroup;
    tracing::info!(preserved, "collecting outdated dataset groups");

    let mut outdated = list_dataset_group_arns(api).await?;
    if outdated.is_empty() {
        return Err(OrchestrationError::Precondition(
            "there is no existing dataset group".to_string(),
        ));
    }

    outdated.retain(|arn| arn != preserved);
    if outdated.is_empty() {
        tracing::info!("no outdated dataset group found");
        return Ok(());
    }

    for arn in &outdated {
        swallow_missing(api.delete_dataset_group(arn).await, kind, arn)?;
    }

    let remaining = list_dataset_group_arns(api).await?;
    if remaining.len() != 1 || remaining[0] != preserved {
        return Err(OrchestrationError::CleanupInProgress { kind, remaining });
    }

    tracing::info!("successfully cleaned up outdated dataset groups");
    Ok(())
}
