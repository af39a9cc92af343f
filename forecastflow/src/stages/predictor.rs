//! Predictor provisioning.

use async_trait::async_trait;

use crate::api::{ApiResult, CreatePredictorRequest, ForecastApi};
use crate::config::PipelineConfig;
use crate::errors::OrchestrationError;
use crate::frequency::DataFrequency;
use crate::identifiers::{ResourceIdKey, ResourceIdMap, ResourceKind};

use super::StageResource;

const SECONDS_IN_A_DAY: u32 = 86_400;

/// Trains the generation's predictor on its dataset group.
#[derive(Debug, Clone)]
pub struct PredictorStage {
    horizon_days: u32,
    algorithm_arn: Option<String>,
}

impl PredictorStage {
    /// Builds the stage from the deployment configuration.
    #[must_use]
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            horizon_days: config.forecast_horizon_days,
            algorithm_arn: config.predictor_algorithm_arn.clone(),
        }
    }

    /// Converts the configured horizon in days into intervals of the
    /// generation's data frequency, truncating.
    fn forecast_horizon(&self, frequency: DataFrequency) -> Result<u32, OrchestrationError> {
        let interval_seconds = frequency.interval_seconds().ok_or_else(|| {
            OrchestrationError::Precondition(format!(
                "data frequency [{frequency}] has no interval-seconds mapping for horizon derivation"
            ))
        })?;
        Ok(self.horizon_days * SECONDS_IN_A_DAY / interval_seconds)
    }
}

#[async_trait]
impl StageResource for PredictorStage {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Predictor
    }

    fn arn_key(&self) -> ResourceIdKey {
        ResourceIdKey::PredictorArn
    }

    async fn describe(&self, api: &dyn ForecastApi, arn: &str) -> ApiResult<String> {
        api.describe_predictor(arn).await
    }

    async fn create(
        &self,
        api: &dyn ForecastApi,
        ids: &ResourceIdMap,
    ) -> Result<(), OrchestrationError> {
        let frequency: DataFrequency = ids
            .get(ResourceIdKey::DataFrequency)?
            .parse()
            .map_err(|err| OrchestrationError::Precondition(format!("{err}")))?;
        let forecast_horizon = self.forecast_horizon(frequency)?;
        tracing::info!(
            horizon_days = self.horizon_days,
            %frequency,
            forecast_horizon,
            "derived forecast horizon"
        );

        let request = CreatePredictorRequest {
            predictor_name: ids.get(ResourceIdKey::PredictorName)?.to_string(),
            forecast_horizon,
            forecast_frequency: frequency.as_str().to_string(),
            dataset_group_arn: ids.get(ResourceIdKey::DatasetGroupArn)?.to_string(),
            algorithm_arn: self.algorithm_arn.clone(),
            perform_auto_ml: self.algorithm_arn.is_none(),
        };
        api.create_predictor(request).await?;
        Ok(())
    }
}
