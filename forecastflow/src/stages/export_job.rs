//! Forecast export job provisioning.

use async_trait::async_trait;

use crate::api::{ApiResult, CreateForecastExportJobRequest, ForecastApi};
use crate::config::PipelineConfig;
use crate::errors::OrchestrationError;
use crate::identifiers::{ResourceIdKey, ResourceIdMap, ResourceKind};

use super::StageResource;

/// Exports the generation's forecast results to object storage.
#[derive(Debug, Clone)]
pub struct ForecastExportJobStage {
    destination_uri: String,
    role_arn: String,
}

impl ForecastExportJobStage {
    /// Builds the stage from the deployment configuration.
    #[must_use]
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            destination_uri: config.export_uri(),
            role_arn: config.export_role_arn.clone(),
        }
    }
}

#[async_trait]
impl StageResource for ForecastExportJobStage {
    fn kind(&self) -> ResourceKind {
        ResourceKind::ForecastExportJob
    }

    fn arn_key(&self) -> ResourceIdKey {
        ResourceIdKey::ForecastExportJobArn
    }

    async fn describe(&self, api: &dyn ForecastApi, arn: &str) -> ApiResult<String> {
        api.describe_forecast_export_job(arn).await
    }

    async fn create(
        &self,
        api: &dyn ForecastApi,
        ids: &ResourceIdMap,
    ) -> Result<(), OrchestrationError> {
        let request = CreateForecastExportJobRequest {
            forecast_export_job_name: ids.get(ResourceIdKey::ForecastExportJobName)?.to_string(),
            forecast_arn: ids.get(ResourceIdKey::ForecastArn)?.to_string(),
            destination: self.destination_uri.clone(),
            role_arn: self.role_arn.clone(),
        };
        api.create_forecast_export_job(request).await?;
        Ok(())
    }
}
