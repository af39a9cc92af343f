//! Request and summary models for the provisioning capability.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One page of a token-paginated list operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// The items on this page, in service order.
    pub items: Vec<T>,
    /// Continuation token for the next page, absent on the last page.
    pub next_token: Option<String>,
}

impl<T> Page<T> {
    /// Creates the final page of a listing.
    #[must_use]
    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            next_token: None,
        }
    }
}

/// Comparison applied by a list filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterCondition {
    /// Keep items whose field equals the filter value.
    Is,
    /// Keep items whose field differs from the filter value.
    IsNot,
}

/// A server-side filter on a list operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    /// The summary field the filter applies to.
    pub key: String,
    /// The value compared against.
    pub value: String,
    /// The comparison to apply.
    pub condition: FilterCondition,
}

impl Filter {
    /// Builds an equality filter.
    #[must_use]
    pub fn is(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            condition: FilterCondition::Is,
        }
    }

    /// Builds an inequality filter.
    #[must_use]
    pub fn is_not(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            condition: FilterCondition::IsNot,
        }
    }
}

/// One attribute of a dataset schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaAttribute {
    /// Column name in the training data.
    pub attribute_name: String,
    /// Column type in the training data.
    pub attribute_type: String,
}

impl SchemaAttribute {
    /// Creates a schema attribute.
    #[must_use]
    pub fn new(name: impl Into<String>, attribute_type: impl Into<String>) -> Self {
        Self {
            attribute_name: name.into(),
            attribute_type: attribute_type.into(),
        }
    }
}

/// Inputs for creating a dataset group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateDatasetGroupRequest {
    /// Name of the group.
    pub dataset_group_name: String,
    /// Datasets the group owns.
    pub dataset_arns: Vec<String>,
    /// Service domain of the group.
    pub domain: String,
}

/// Inputs for creating a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateDatasetRequest {
    /// Name of the dataset.
    pub dataset_name: String,
    /// Service domain of the dataset.
    pub domain: String,
    /// Role of the dataset within its group.
    pub dataset_type: String,
    /// Interval between records in the training data.
    pub data_frequency: String,
    /// Column layout of the training data, in file order.
    pub schema: Vec<SchemaAttribute>,
}

/// Inputs for creating a dataset import job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateDatasetImportJobRequest {
    /// Name of the import job.
    pub dataset_import_job_name: String,
    /// Dataset the job imports into.
    pub dataset_arn: String,
    /// Object-storage URI of the training data.
    pub data_source: String,
    /// Role the service assumes to read the training data.
    pub role_arn: String,
    /// Timestamp format of the training data.
    pub timestamp_format: String,
}

/// Inputs for creating a predictor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePredictorRequest {
    /// Name of the predictor.
    pub predictor_name: String,
    /// Number of frequency intervals to predict.
    pub forecast_horizon: u32,
    /// Interval the predictor forecasts at.
    pub forecast_frequency: String,
    /// Dataset group the predictor trains on.
    pub dataset_group_arn: String,
    /// Training algorithm, absent when the service should pick one.
    pub algorithm_arn: Option<String>,
    /// Whether the service selects the algorithm automatically.
    pub perform_auto_ml: bool,
}

/// Inputs for creating a forecast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateForecastRequest {
    /// Name of the forecast.
    pub forecast_name: String,
    /// Predictor the forecast is generated from.
    pub predictor_arn: String,
}

/// Inputs for creating a forecast export job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateForecastExportJobRequest {
    /// Name of the export job.
    pub forecast_export_job_name: String,
    /// Forecast the job exports.
    pub forecast_arn: String,
    /// Object-storage URI the results are written to.
    pub destination: String,
    /// Role the service assumes to write the results.
    pub role_arn: String,
}

/// A dataset group as observed via list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetGroupSummary {
    /// ARN of the group.
    pub dataset_group_arn: String,
    /// Name of the group.
    pub dataset_group_name: String,
    /// When the group was created.
    pub creation_time: DateTime<Utc>,
}

/// A dataset as observed via list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSummary {
    /// ARN of the dataset.
    pub dataset_arn: String,
    /// Name of the dataset.
    pub dataset_name: String,
    /// When the dataset was created.
    pub creation_time: DateTime<Utc>,
}

/// A dataset import job as observed via list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetImportJobSummary {
    /// ARN of the import job.
    pub dataset_import_job_arn: String,
    /// Name of the import job.
    pub dataset_import_job_name: String,
    /// Dataset the job imports into.
    pub dataset_arn: String,
    /// Raw status reported by the service.
    pub status: String,
    /// When the job was created.
    pub creation_time: DateTime<Utc>,
}

/// A predictor as observed via list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictorSummary {
    /// ARN of the predictor.
    pub predictor_arn: String,
    /// Name of the predictor.
    pub predictor_name: String,
    /// When the predictor was created.
    pub creation_time: DateTime<Utc>,
}

/// A forecast as observed via list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastSummary {
    /// ARN of the forecast.
    pub forecast_arn: String,
    /// Name of the forecast.
    pub forecast_name: String,
    /// Predictor the forecast was generated from.
    pub predictor_arn: String,
    /// Raw status reported by the service.
    pub status: String,
    /// When the forecast was created.
    pub creation_time: DateTime<Utc>,
}

/// A forecast export job as observed via list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastExportJobSummary {
    /// ARN of the export job.
    pub forecast_export_job_arn: String,
    /// Name of the export job.
    pub forecast_export_job_name: String,
    /// Forecast the job exports.
    pub forecast_arn: String,
    /// Raw status reported by the service.
    pub status: String,
    /// When the job was created.
    pub creation_time: DateTime<Utc>,
}
