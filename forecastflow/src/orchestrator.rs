//! The entry-point surface the external driver invokes.
//!
//! One async method per stage, cleanup and planner unit, mirroring the
//! one-handler-per-unit deployment: the driver invokes a unit, treats a
//! retryable error as "re-invoke me later" and anything else as a hard stop.
//! Invocations hold no state between calls; every method rebuilds its view
//! of the world from the remote service.

use std::sync::Arc;
use std::time::Duration;

use crate::api::ForecastApi;
use crate::cleanup;
use crate::config::PipelineConfig;
use crate::errors::OrchestrationError;
use crate::frequency::DataFrequency;
use crate::identifiers::ResourceIdMap;
use crate::planner;
use crate::stages::{
    provision, DatasetGroupStage, DatasetImportJobStage, DatasetStage, ForecastExportJobStage,
    ForecastStage, PredictorStage,
};

/// Orchestrates the provisioning pipeline against one deployment.
pub struct ForecastOrchestrator {
    api: Arc<dyn ForecastApi>,
    config: PipelineConfig,
}

impl ForecastOrchestrator {
    /// Creates an orchestrator from a client and deployment configuration.
    #[must_use]
    pub fn new(api: Arc<dyn ForecastApi>, config: PipelineConfig) -> Self {
        Self { api, config }
    }

    /// Plans the identifier map for a fresh generation.
    ///
    /// # Errors
    ///
    /// Fails on a malformed function ARN.
    pub fn plan_generation(
        &self,
        timestamp_millis: i64,
        function_arn: &str,
        prediction_window: Duration,
    ) -> Result<ResourceIdMap, OrchestrationError> {
        let arn_prefix = planner::derive_resource_arn_prefix(function_arn)?;
        let frequency = DataFrequency::for_window(prediction_window);
        Ok(planner::build_resource_id_map(
            timestamp_millis,
            &arn_prefix,
            frequency,
        ))
    }

    /// Plans the identifier map for a steady-state (cron) generation, which
    /// reuses the latest dataset and predictor.
    ///
    /// # Errors
    ///
    /// [`OrchestrationError::Precondition`] when no dataset or no predictor
    /// exists yet; the pipeline has to bootstrap through a fresh generation
    /// first.
    pub async fn plan_cron_generation(
        &self,
        timestamp_millis: i64,
        function_arn: &str,
    ) -> Result<ResourceIdMap, OrchestrationError> {
        let latest_dataset = planner::latest_dataset(self.api.as_ref())
            .await?
            .ok_or_else(|| {
                OrchestrationError::Precondition("cannot find any dataset".to_string())
            })?;
        let latest_predictor = planner::latest_predictor(self.api.as_ref())
            .await?
            .ok_or_else(|| {
                OrchestrationError::Precondition("cannot find any predictor".to_string())
            })?;

        let arn_prefix = planner::derive_resource_arn_prefix(function_arn)?;
        Ok(planner::build_cron_resource_id_map(
            timestamp_millis,
            &arn_prefix,
            &latest_dataset.dataset_name,
            &latest_predictor.predictor_arn,
        ))
    }

    /// Creates the generation's dataset group.
    ///
    /// # Errors
    ///
    /// See [`OrchestrationError`].
    pub async fn create_dataset_group(
        &self,
        ids: &ResourceIdMap,
    ) -> Result<(), OrchestrationError> {
        DatasetGroupStage.run(self.api.as_ref(), ids).await
    }

    /// Creates the generation's dataset.
    ///
    /// # Errors
    ///
    /// See [`OrchestrationError`].
    pub async fn create_dataset(&self, ids: &ResourceIdMap) -> Result<(), OrchestrationError> {
        provision(&DatasetStage, self.api.as_ref(), ids).await
    }

    /// Starts the generation's dataset import job.
    ///
    /// # Errors
    ///
    /// See [`OrchestrationError`].
    pub async fn create_dataset_import_job(
        &self,
        ids: &ResourceIdMap,
    ) -> Result<(), OrchestrationError> {
        let stage = DatasetImportJobStage::new(&self.config);
        provision(&stage, self.api.as_ref(), ids).await
    }

    /// Starts training the generation's predictor.
    ///
    /// # Errors
    ///
    /// See [`OrchestrationError`].
    pub async fn create_predictor(&self, ids: &ResourceIdMap) -> Result<(), OrchestrationError> {
        let stage = PredictorStage::new(&self.config);
        provision(&stage, self.api.as_ref(), ids).await
    }

    /// Starts generating the generation's forecast.
    ///
    /// # Errors
    ///
    /// See [`OrchestrationError`].
    pub async fn create_forecast(&self, ids: &ResourceIdMap) -> Result<(), OrchestrationError> {
        provision(&ForecastStage, self.api.as_ref(), ids).await
    }

    /// Starts the generation's forecast export job.
    ///
    /// # Errors
    ///
    /// See [`OrchestrationError`].
    pub async fn create_forecast_export_job(
        &self,
        ids: &ResourceIdMap,
    ) -> Result<(), OrchestrationError> {
        let stage = ForecastExportJobStage::new(&self.config);
        provision(&stage, self.api.as_ref(), ids).await
    }

    /// Collects dataset groups superseded by this generation.
    ///
    /// # Errors
    ///
    /// See [`OrchestrationError`].
    pub async fn delete_outdated_dataset_groups(
        &self,
        ids: &ResourceIdMap,
    ) -> Result<(), OrchestrationError> {
        cleanup::delete_outdated_dataset_groups(self.api.as_ref(), ids).await
    }

    /// Collects datasets superseded by this generation.
    ///
    /// # Errors
    ///
    /// See [`OrchestrationError`].
    pub async fn delete_outdated_datasets(
        &self,
        ids: &ResourceIdMap,
    ) -> Result<(), OrchestrationError> {
        cleanup::delete_outdated_datasets(self.api.as_ref(), ids).await
    }

    /// Collects import jobs belonging to superseded datasets.
    ///
    /// # Errors
    ///
    /// See [`OrchestrationError`].
    pub async fn delete_outdated_dataset_import_jobs(
        &self,
        ids: &ResourceIdMap,
    ) -> Result<(), OrchestrationError> {
        cleanup::delete_outdated_dataset_import_jobs(self.api.as_ref(), ids).await
    }

    /// Collects predictors superseded by this generation.
    ///
    /// # Errors
    ///
    /// See [`OrchestrationError`].
    pub async fn delete_outdated_predictors(
        &self,
        ids: &ResourceIdMap,
    ) -> Result<(), OrchestrationError> {
        cleanup::delete_outdated_predictors(self.api.as_ref(), ids).await
    }

    /// Collects forecasts outside the retention window.
    ///
    /// # Errors
    ///
    /// See [`OrchestrationError`].
    pub async fn delete_outdated_forecasts(
        &self,
        ids: &ResourceIdMap,
    ) -> Result<(), OrchestrationError> {
        cleanup::delete_outdated_forecasts(self.api.as_ref(), ids).await
    }

    /// Collects export jobs belonging to superseded forecasts.
    ///
    /// # Errors
    ///
    /// See [`OrchestrationError`].
    pub async fn delete_outdated_forecast_export_jobs(
        &self,
        ids: &ResourceIdMap,
    ) -> Result<(), OrchestrationError> {
        cleanup::delete_outdated_forecast_export_jobs(self.api.as_ref(), ids).await
    }
}
