//! Dataset provisioning.

use async_trait::async_trait;

use crate::api::{ApiResult, CreateDatasetRequest, ForecastApi, SchemaAttribute};
use crate::errors::OrchestrationError;
use crate::identifiers::{ResourceIdKey, ResourceIdMap, ResourceKind};

use super::{StageResource, DOMAIN};

const DATASET_TYPE: &str = "TARGET_TIME_SERIES";

/// Creates the generation's target time-series dataset.
#[derive(Debug, Clone, Copy, Default)]
pub struct DatasetStage;

/// The fixed training-data layout: attribute order must match the columns of
/// the demand file.
fn training_schema() -> Vec<SchemaAttribute> {
    vec![
        SchemaAttribute::new("item_id", "string"),
        SchemaAttribute::new("timestamp", "timestamp"),
        SchemaAttribute::new("target_value", "integer"),
    ]
}

#[async_trait]
impl StageResource for DatasetStage {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Dataset
    }

    fn arn_key(&self) -> ResourceIdKey {
        ResourceIdKey::DatasetArn
    }

    async fn describe(&self, api: &dyn ForecastApi, arn: &str) -> ApiResult<String> {
        api.describe_dataset(arn).await
    }

    async fn create(
        &self,
        api: &dyn ForecastApi,
        ids: &ResourceIdMap,
    ) -> Result<(), OrchestrationError> {
        let request = CreateDatasetRequest {
            dataset_name: ids.get(ResourceIdKey::DatasetName)?.to_string(),
            domain: DOMAIN.to_string(),
            dataset_type: DATASET_TYPE.to_string(),
            data_frequency: ids.get(ResourceIdKey::DataFrequency)?.to_string(),
            schema: training_schema(),
        };
        api.create_dataset(request).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::stages::provision;
    use crate::status::{ACTIVE_STATUS, FAILED_STATUS};
    use crate::testing::FakeForecast;

    fn ids() -> ResourceIdMap {
        ResourceIdMap::new()
            .with(ResourceIdKey::DatasetName, "ds_1600000000000")
            .with(ResourceIdKey::DatasetArn, "arn:ds/ds_1600000000000")
            .with(ResourceIdKey::DataFrequency, "D")
    }

    #[tokio::test]
    async fn test_active_on_probe_never_creates() {
        let fake = FakeForecast::new();
        fake.script_describe(ResourceKind::Dataset, Ok(ACTIVE_STATUS.to_string()));

        provision(&DatasetStage, &fake, &ids()).await.unwrap();

        assert_eq!(fake.call_count("describe_dataset"), 1);
        assert_eq!(fake.call_count("create_dataset"), 0);
    }

    #[tokio::test]
    async fn test_failed_on_probe_is_fatal_without_create() {
        let fake = FakeForecast::new();
        fake.script_describe(ResourceKind::Dataset, Ok(FAILED_STATUS.to_string()));

        let err = provision(&DatasetStage, &fake, &ids()).await.unwrap_err();

        assert!(matches!(err, OrchestrationError::SetupFailure { .. }));
        assert!(!err.is_retryable());
        assert_eq!(fake.call_count("create_dataset"), 0);
    }

    #[tokio::test]
    async fn test_not_found_creates_once_then_reprobes_once() {
        let fake = FakeForecast::new();
        fake.script_describe(
            ResourceKind::Dataset,
            Err(ApiError::NotFound {
                message: "no dataset".to_string(),
            }),
        );
        fake.script_describe(ResourceKind::Dataset, Ok("CREATE_IN_PROGRESS".to_string()));

        let err = provision(&DatasetStage, &fake, &ids()).await.unwrap_err();

        assert!(err.is_retryable());
        assert_eq!(fake.call_count("describe_dataset"), 2);
        assert_eq!(fake.call_count("create_dataset"), 1);
    }

    #[tokio::test]
    async fn test_not_found_then_active_succeeds() {
        let fake = FakeForecast::new();
        fake.script_describe(
            ResourceKind::Dataset,
            Err(ApiError::NotFound {
                message: "no dataset".to_string(),
            }),
        );
        fake.script_describe(ResourceKind::Dataset, Ok(ACTIVE_STATUS.to_string()));

        provision(&DatasetStage, &fake, &ids()).await.unwrap();

        let requests = fake.dataset_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].dataset_name, "ds_1600000000000");
        assert_eq!(requests[0].domain, "CUSTOM");
        assert_eq!(requests[0].dataset_type, "TARGET_TIME_SERIES");
        assert_eq!(requests[0].data_frequency, "D");
        assert_eq!(requests[0].schema.len(), 3);
        assert_eq!(requests[0].schema[0].attribute_name, "item_id");
        assert_eq!(requests[0].schema[1].attribute_type, "timestamp");
    }

    #[tokio::test]
    async fn test_failed_after_create_is_fatal() {
        let fake = FakeForecast::new();
        fake.script_describe(
            ResourceKind::Dataset,
            Err(ApiError::NotFound {
                message: "no dataset".to_string(),
            }),
        );
        fake.script_describe(ResourceKind::Dataset, Ok(FAILED_STATUS.to_string()));

        let err = provision(&DatasetStage, &fake, &ids()).await.unwrap_err();
        assert!(matches!(err, OrchestrationError::SetupFailure { .. }));
    }

    #[tokio::test]
    async fn test_pending_probe_still_creates_idempotently() {
        // A resource observed mid-provisioning gets an idempotent create
        // before the re-probe; AlreadyExists from the service is success.
        let fake = FakeForecast::new();
        fake.script_describe(ResourceKind::Dataset, Ok("CREATE_PENDING".to_string()));
        fake.script_op(
            "create_dataset",
            Err(ApiError::AlreadyExists {
                message: "ds_1600000000000".to_string(),
            }),
        );
        fake.script_describe(ResourceKind::Dataset, Ok(ACTIVE_STATUS.to_string()));

        provision(&DatasetStage, &fake, &ids()).await.unwrap();

        assert_eq!(fake.call_count("describe_dataset"), 2);
        assert_eq!(fake.call_count("create_dataset"), 1);
    }

    #[tokio::test]
    async fn test_remote_error_on_probe_passes_through() {
        let fake = FakeForecast::new();
        fake.script_describe(
            ResourceKind::Dataset,
            Err(ApiError::Remote {
                message: "throttled".to_string(),
            }),
        );

        let err = provision(&DatasetStage, &fake, &ids()).await.unwrap_err();
        assert!(matches!(err, OrchestrationError::Api(ApiError::Remote { .. })));
        assert_eq!(fake.call_count("create_dataset"), 0);
    }
}
