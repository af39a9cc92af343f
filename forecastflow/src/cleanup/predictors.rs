//! Outdated predictor collection.

use crate::api::ForecastApi;
use crate::errors::OrchestrationError;
use crate::identifiers::{ResourceIdKey, ResourceIdMap, ResourceKind};

use super::{list_outdated_predictor_arns, swallow_missing};

/// Deletes every predictor except the preserved one and verifies the
/// deletions converged.
///
/// # Errors
///
/// [`OrchestrationError::CleanupInProgress`] when the recomputed outdated
/// set is still non-empty after deleting.
pub async fn delete_outdated_predictors(
    api: &dyn ForecastApi,
    ids: &ResourceIdMap,
) -> Result<(), OrchestrationError> {
    let preserved = ids.get(ResourceIdKey::PredictorArn)?;
    let kind = ResourceKind::Predictor;
    tracing::info!(preserved, "collecting outdated predictors");

    let outdated = list_outdated_predictor_arns(api, preserved).await?;
    if outdated.is_empty() {
        tracing::info!("no outdated predictor found");
        return Ok(());
    }

    for arn in &outdated {
        swallow_missing(api.delete_predictor(arn).await, kind, arn)?;
    }

    let remaining = list_outdated_predictor_arns(api, preserved).await?;
    if !remaining.is_empty() {
        return Err(OrchestrationError::CleanupInProgress { kind, remaining });
    }

    tracing::info!("successfully cleaned up outdated predictors");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::PredictorSummary;
    use crate::testing::{creation_time, FakeForecast};

    fn predictor(arn: &str) -> PredictorSummary {
        PredictorSummary {
            predictor_arn: arn.to_string(),
            predictor_name: arn.rsplit('/').next().unwrap_or(arn).to_string(),
            creation_time: creation_time(1_600_000_000),
        }
    }

    fn ids(preserved: &str) -> ResourceIdMap {
        ResourceIdMap::new().with(ResourceIdKey::PredictorArn, preserved)
    }

    #[tokio::test]
    async fn test_no_outdated_predictor_is_a_no_op() {
        let fake = FakeForecast::new();
        fake.add_predictor(predictor("arn:p/current"));

        delete_outdated_predictors(&fake, &ids("arn:p/current"))
            .await
            .unwrap();

        assert_eq!(fake.call_count("delete_predictor"), 0);
    }

    #[tokio::test]
    async fn test_deletes_outdated_predictors_and_verifies() {
        let fake = FakeForecast::new();
        fake.add_predictor(predictor("arn:p/old"));
        fake.add_predictor(predictor("arn:p/current"));

        delete_outdated_predictors(&fake, &ids("arn:p/current"))
            .await
            .unwrap();

        assert_eq!(fake.calls_of("delete_predictor"), vec!["arn:p/old"]);
        assert_eq!(fake.call_count("list_predictors"), 2);
    }

    #[tokio::test]
    async fn test_unconverged_deletion_is_retryable() {
        let fake = FakeForecast::new();
        fake.set_deletes_converge(false);
        fake.add_predictor(predictor("arn:p/old"));
        fake.add_predictor(predictor("arn:p/current"));

        let err = delete_outdated_predictors(&fake, &ids("arn:p/current"))
            .await
            .unwrap_err();

        assert!(err.is_retryable());
    }
}
