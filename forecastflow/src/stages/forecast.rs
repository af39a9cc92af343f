//! Forecast provisioning.

use async_trait::async_trait;

use crate::api::{ApiResult, CreateForecastRequest, ForecastApi};
use crate::errors::OrchestrationError;
use crate::identifiers::{ResourceIdKey, ResourceIdMap, ResourceKind};

use super::StageResource;

/// Generates the generation's forecast from its predictor.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForecastStage;

#[async_trait]
impl StageResource for ForecastStage {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Forecast
    }

    fn arn_key(&self) -> ResourceIdKey {
        ResourceIdKey::ForecastArn
    }

    async fn describe(&self, api: &dyn ForecastApi, arn: &str) -> ApiResult<String> {
        api.describe_forecast(arn).await
    }

    async fn create(
        &self,
        api: &dyn ForecastApi,
        ids: &ResourceIdMap,
    ) -> Result<(), OrchestrationError> {
        let request = CreateForecastRequest {
            forecast_name: ids.get(ResourceIdKey::ForecastName)?.to_string(),
            predictor_arn: ids.get(ResourceIdKey::PredictorArn)?.to_string(),
        };
        api.create_forecast(request).await?;
        Ok(())
    }
}
