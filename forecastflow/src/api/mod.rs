//! The provisioning capability this crate consumes.
//!
//! The remote service owns every resource's lifecycle: create calls return a
//! synchronous acknowledgment only, status transitions happen out of process,
//! and delete calls acknowledge without implying the resource is gone. This
//! module defines the trait the orchestrator talks through plus the error
//! surface of that capability; the concrete client (an SDK wrapper in
//! production, [`crate::testing::FakeForecast`] in tests) lives behind it.

mod types;

use async_trait::async_trait;
use thiserror::Error;

pub use types::{
    CreateDatasetGroupRequest, CreateDatasetImportJobRequest, CreateDatasetRequest,
    CreateForecastExportJobRequest, CreateForecastRequest, CreatePredictorRequest,
    DatasetGroupSummary, DatasetImportJobSummary, DatasetSummary, Filter, FilterCondition,
    ForecastExportJobSummary, ForecastSummary, Page, PredictorSummary, SchemaAttribute,
};

/// Failures of the provisioning capability.
///
/// Only `NotFound` and `AlreadyExists` are interpreted by the orchestration
/// protocol; everything else passes through unmodified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The identified resource does not exist.
    #[error("resource not found: {message}")]
    NotFound {
        /// Service-provided detail.
        message: String,
    },

    /// A resource with the requested identity already exists.
    #[error("resource already exists: {message}")]
    AlreadyExists {
        /// Service-provided detail.
        message: String,
    },

    /// Any other remote failure (permissions, throttling, transport).
    #[error("remote call failed: {message}")]
    Remote {
        /// Service-provided detail.
        message: String,
    },
}

impl ApiError {
    /// Returns true for the missing-resource condition.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result alias for capability calls.
pub type ApiResult<T> = Result<T, ApiError>;

/// Async client for the forecasting service's provisioning operations.
///
/// Describe operations return the resource's raw status string and fail with
/// [`ApiError::NotFound`] when the resource is absent. List operations are
/// token-paginated; drain them with [`crate::paginate::drain_pages`]. The
/// service offers no describe for dataset groups.
#[async_trait]
pub trait ForecastApi: Send + Sync {
    /// Creates a dataset group. Synchronous: a success acknowledgment means
    /// the group exists.
    async fn create_dataset_group(&self, request: CreateDatasetGroupRequest) -> ApiResult<()>;

    /// Deletes a dataset group.
    async fn delete_dataset_group(&self, dataset_group_arn: &str) -> ApiResult<()>;

    /// Lists one page of dataset groups.
    async fn list_dataset_groups(
        &self,
        next_token: Option<String>,
    ) -> ApiResult<Page<DatasetGroupSummary>>;

    /// Starts creating a dataset.
    async fn create_dataset(&self, request: CreateDatasetRequest) -> ApiResult<()>;

    /// Reports a dataset's raw status.
    async fn describe_dataset(&self, dataset_arn: &str) -> ApiResult<String>;

    /// Deletes a dataset.
    async fn delete_dataset(&self, dataset_arn: &str) -> ApiResult<()>;

    /// Lists one page of datasets.
    async fn list_datasets(&self, next_token: Option<String>) -> ApiResult<Page<DatasetSummary>>;

    /// Starts a dataset import job.
    async fn create_dataset_import_job(
        &self,
        request: CreateDatasetImportJobRequest,
    ) -> ApiResult<()>;

    /// Reports a dataset import job's raw status.
    async fn describe_dataset_import_job(&self, dataset_import_job_arn: &str)
        -> ApiResult<String>;

    /// Deletes a dataset import job.
    async fn delete_dataset_import_job(&self, dataset_import_job_arn: &str) -> ApiResult<()>;

    /// Lists one page of dataset import jobs matching `filters`.
    async fn list_dataset_import_jobs(
        &self,
        filters: &[Filter],
        next_token: Option<String>,
    ) -> ApiResult<Page<DatasetImportJobSummary>>;

    /// Starts training a predictor.
    async fn create_predictor(&self, request: CreatePredictorRequest) -> ApiResult<()>;

    /// Reports a predictor's raw status.
    async fn describe_predictor(&self, predictor_arn: &str) -> ApiResult<String>;

    /// Deletes a predictor.
    async fn delete_predictor(&self, predictor_arn: &str) -> ApiResult<()>;

    /// Lists one page of predictors.
    async fn list_predictors(
        &self,
        next_token: Option<String>,
    ) -> ApiResult<Page<PredictorSummary>>;

    /// Starts generating a forecast.
    async fn create_forecast(&self, request: CreateForecastRequest) -> ApiResult<()>;

    /// Reports a forecast's raw status.
    async fn describe_forecast(&self, forecast_arn: &str) -> ApiResult<String>;

    /// Deletes a forecast.
    async fn delete_forecast(&self, forecast_arn: &str) -> ApiResult<()>;

    /// Lists one page of forecasts matching `filters`.
    async fn list_forecasts(
        &self,
        filters: &[Filter],
        next_token: Option<String>,
    ) -> ApiResult<Page<ForecastSummary>>;

    /// Starts a forecast export job.
    async fn create_forecast_export_job(
        &self,
        request: CreateForecastExportJobRequest,
    ) -> ApiResult<()>;

    /// Reports a forecast export job's raw status.
    async fn describe_forecast_export_job(
        &self,
        forecast_export_job_arn: &str,
    ) -> ApiResult<String>;

    /// Deletes a forecast export job.
    async fn delete_forecast_export_job(&self, forecast_export_job_arn: &str) -> ApiResult<()>;

    /// Lists one page of forecast export jobs matching `filters`.
    async fn list_forecast_export_jobs(
        &self,
        filters: &[Filter],
        next_token: Option<String>,
    ) -> ApiResult<Page<ForecastExportJobSummary>>;
}
