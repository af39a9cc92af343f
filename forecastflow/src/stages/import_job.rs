//! Dataset import job provisioning.

use async_trait::async_trait;

use crate::api::{ApiResult, CreateDatasetImportJobRequest, ForecastApi};
use crate::config::PipelineConfig;
use crate::errors::OrchestrationError;
use crate::identifiers::{ResourceIdKey, ResourceIdMap, ResourceKind};

use super::StageResource;

/// Timestamp format of the demand training data.
const TIMESTAMP_FORMAT: &str = "yyyy-MM-dd HH:mm:ss";

/// Imports the generation's training data into its dataset.
#[derive(Debug, Clone)]
pub struct DatasetImportJobStage {
    training_data_uri: String,
    role_arn: String,
}

impl DatasetImportJobStage {
    /// Builds the stage from the deployment configuration.
    #[must_use]
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            training_data_uri: config.training_data_uri(),
            role_arn: config.import_role_arn.clone(),
        }
    }
}

#[async_trait]
impl StageResource for DatasetImportJobStage {
    fn kind(&self) -> ResourceKind {
        ResourceKind::DatasetImportJob
    }

    fn arn_key(&self) -> ResourceIdKey {
        ResourceIdKey::DatasetImportJobArn
    }

    async fn describe(&self, api: &dyn ForecastApi, arn: &str) -> ApiResult<String> {
        api.describe_dataset_import_job(arn).await
    }

    async fn create(
        &self,
        api: &dyn ForecastApi,
        ids: &ResourceIdMap,
    ) -> Result<(), OrchestrationError> {
        let request = CreateDatasetImportJobRequest {
            dataset_import_job_name: ids.get(ResourceIdKey::DatasetImportJobName)?.to_string(),
            dataset_arn: ids.get(ResourceIdKey::DatasetArn)?.to_string(),
            data_source: self.training_data_uri.clone(),
            role_arn: self.role_arn.clone(),
            timestamp_format: TIMESTAMP_FORMAT.to_string(),
        };
        api.create_dataset_import_job(request).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::stages::provision;
    use crate::status::ACTIVE_STATUS;
    use crate::testing::FakeForecast;

    fn config() -> PipelineConfig {
        PipelineConfig {
            forecast_horizon_days: 3,
            predictor_algorithm_arn: None,
            import_role_arn: "arn:aws:iam::123:role/import".to_string(),
            export_role_arn: "arn:aws:iam::123:role/export".to_string(),
            prediction_bucket: "prediction-bucket".to_string(),
            training_data_folder: "demand".to_string(),
            export_folder: "results".to_string(),
            training_data_file: "demand.csv".to_string(),
        }
    }

    fn ids() -> ResourceIdMap {
        ResourceIdMap::new()
            .with(ResourceIdKey::DatasetArn, "arn:ds")
            .with(ResourceIdKey::DatasetImportJobName, "dsij_1600000000000")
            .with(ResourceIdKey::DatasetImportJobArn, "arn:dsij/dsij_1600000000000")
    }

    #[tokio::test]
    async fn test_create_composes_source_from_config() {
        let fake = FakeForecast::new();
        fake.script_describe(
            ResourceKind::DatasetImportJob,
            Err(ApiError::NotFound {
                message: "no import job".to_string(),
            }),
        );
        fake.script_describe(ResourceKind::DatasetImportJob, Ok(ACTIVE_STATUS.to_string()));

        let stage = DatasetImportJobStage::new(&config());
        provision(&stage, &fake, &ids()).await.unwrap();

        let requests = fake.import_job_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].data_source, "s3://prediction-bucket/demand/demand.csv");
        assert_eq!(requests[0].role_arn, "arn:aws:iam::123:role/import");
        assert_eq!(requests[0].timestamp_format, "yyyy-MM-dd HH:mm:ss");
        assert_eq!(requests[0].dataset_arn, "arn:ds");
    }

    #[tokio::test]
    async fn test_active_import_job_short_circuits() {
        let fake = FakeForecast::new();
        fake.script_describe(ResourceKind::DatasetImportJob, Ok(ACTIVE_STATUS.to_string()));

        let stage = DatasetImportJobStage::new(&config());
        provision(&stage, &fake, &ids()).await.unwrap();

        assert_eq!(fake.call_count("create_dataset_import_job"), 0);
    }

    #[tokio::test]
    async fn test_pending_after_create_is_retryable() {
        let fake = FakeForecast::new();
        fake.script_describe(
            ResourceKind::DatasetImportJob,
            Err(ApiError::NotFound {
                message: "no import job".to_string(),
            }),
        );
        fake.script_describe(
            ResourceKind::DatasetImportJob,
            Ok("CREATE_IN_PROGRESS".to_string()),
        );

        let stage = DatasetImportJobStage::new(&config());
        let err = provision(&stage, &fake, &ids()).await.unwrap_err();

        match err {
            OrchestrationError::SetupInProgress { kind, status, .. } => {
                assert_eq!(kind, ResourceKind::DatasetImportJob);
                assert_eq!(status, "CREATE_IN_PROGRESS");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
