//! Resource identifiers shared across stage and cleanup invocations.
//!
//! A pipeline generation is identified by the map the planner builds once per
//! run and the driver passes, as JSON, into every stage and cleanup
//! invocation. Stages never invent identifiers: they read what they need from
//! the map and submit exactly those values to the provisioning API.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::errors::OrchestrationError;

/// The kinds of remote resources the pipeline provisions and collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    /// The dataset group owning a generation's dataset.
    DatasetGroup,
    /// The target time-series dataset.
    Dataset,
    /// The job importing training data into a dataset.
    DatasetImportJob,
    /// The trained predictor.
    Predictor,
    /// A forecast produced by a predictor.
    Forecast,
    /// The job exporting a forecast's results.
    ForecastExportJob,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DatasetGroup => write!(f, "datasetGroup"),
            Self::Dataset => write!(f, "dataset"),
            Self::DatasetImportJob => write!(f, "datasetImportJob"),
            Self::Predictor => write!(f, "predictor"),
            Self::Forecast => write!(f, "forecast"),
            Self::ForecastExportJob => write!(f, "forecastExportJob"),
        }
    }
}

/// Keys of the resource identifier map.
///
/// The vocabulary is fixed: the planner writes these keys and the stages read
/// them. Serialized names match the flat JSON object the external driver
/// shuttles between invocations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ResourceIdKey {
    /// Service ARN prefix for the account and region of this deployment.
    #[serde(rename = "ForecastResourceArnPrefixKey")]
    ForecastResourceArnPrefix,
    /// Name of the generation's dataset.
    DatasetName,
    /// ARN of the generation's dataset.
    DatasetArn,
    /// Name of the generation's dataset group.
    DatasetGroupName,
    /// ARN of the generation's dataset group.
    DatasetGroupArn,
    /// Name of the generation's dataset import job.
    DatasetImportJobName,
    /// ARN of the generation's dataset import job.
    DatasetImportJobArn,
    /// Name of the generation's predictor.
    PredictorName,
    /// ARN of the generation's predictor.
    PredictorArn,
    /// Name of the generation's forecast.
    ForecastName,
    /// ARN of the generation's forecast.
    ForecastArn,
    /// Name of the generation's forecast export job.
    ForecastExportJobName,
    /// ARN of the generation's forecast export job.
    ForecastExportJobArn,
    /// Data frequency code shared by dataset and predictor creation.
    DataFrequency,
}

impl ResourceIdKey {
    /// Returns the serialized name of this key.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ForecastResourceArnPrefix => "ForecastResourceArnPrefixKey",
            Self::DatasetName => "DatasetName",
            Self::DatasetArn => "DatasetArn",
            Self::DatasetGroupName => "DatasetGroupName",
            Self::DatasetGroupArn => "DatasetGroupArn",
            Self::DatasetImportJobName => "DatasetImportJobName",
            Self::DatasetImportJobArn => "DatasetImportJobArn",
            Self::PredictorName => "PredictorName",
            Self::PredictorArn => "PredictorArn",
            Self::ForecastName => "ForecastName",
            Self::ForecastArn => "ForecastArn",
            Self::ForecastExportJobName => "ForecastExportJobName",
            Self::ForecastExportJobArn => "ForecastExportJobArn",
            Self::DataFrequency => "DataFrequency",
        }
    }
}

impl fmt::Display for ResourceIdKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable mapping from identifier keys to opaque string values.
///
/// Built once per pipeline generation by the planner; every stage and cleanup
/// entry point receives a reference to it. Values are opaque to this crate
/// (ARNs, resource names, a frequency code).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceIdMap {
    entries: BTreeMap<ResourceIdKey, String>,
}

impl ResourceIdMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the map with `key` set to `value`.
    #[must_use]
    pub fn with(mut self, key: ResourceIdKey, value: impl Into<String>) -> Self {
        self.entries.insert(key, value.into());
        self
    }

    /// Looks up a required identifier.
    ///
    /// # Errors
    ///
    /// Returns [`OrchestrationError::MissingIdentifier`] when the planner
    /// never set the key, which means the pipeline was invoked out of order.
    pub fn get(&self, key: ResourceIdKey) -> Result<&str, OrchestrationError> {
        self.entries
            .get(&key)
            .map(String::as_str)
            .ok_or(OrchestrationError::MissingIdentifier { key })
    }

    /// Looks up an identifier that may legitimately be absent.
    #[must_use]
    pub fn get_opt(&self, key: ResourceIdKey) -> Option<&str> {
        self.entries.get(&key).map(String::as_str)
    }

    /// Returns the number of identifiers in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when the map holds no identifiers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parses a map from the driver's JSON payload.
    ///
    /// # Errors
    ///
    /// Returns the underlying serde error for malformed payloads or unknown
    /// keys.
    pub fn from_json(payload: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(payload)
    }

    /// Serializes the map to the JSON payload handed back to the driver.
    ///
    /// # Errors
    ///
    /// Returns the underlying serde error; cannot fail for well-formed maps.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.entries)
    }
}
