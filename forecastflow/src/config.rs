//! Pipeline configuration.
//!
//! Everything the stages need beyond the identifier map lives in one struct
//! injected into the orchestrator at construction. Nothing in this crate
//! reads the environment at call time, which keeps the protocol testable
//! without process-wide state.

use thiserror::Error;

/// Errors raised while loading configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required environment variable is unset or empty.
    #[error("missing environment variable [{name}]")]
    MissingVar {
        /// The variable's name.
        name: &'static str,
    },

    /// A numeric environment variable failed to parse.
    #[error("environment variable [{name}] is not a number: [{value}]")]
    InvalidNumber {
        /// The variable's name.
        name: &'static str,
        /// The rejected value.
        value: String,
    },
}

const HORIZON_DAYS_VAR: &str = "FORECAST_HORIZON_IN_DAYS";
const ALGORITHM_ARN_VAR: &str = "FORECAST_PREDICTOR_ALGORITHM_ARN";
const IMPORT_ROLE_ARN_VAR: &str = "FORECAST_IMPORT_TRAINING_DATA_ROLE_ARN";
const EXPORT_ROLE_ARN_VAR: &str = "FORECAST_EXPORT_RESULT_ROLE_ARN";
const BUCKET_VAR: &str = "PREDICTION_S3_BUCKET_NAME";
const SRC_FOLDER_VAR: &str = "SRC_S3_FOLDER";
const TGT_FOLDER_VAR: &str = "TGT_S3_FOLDER";
const TRAINING_FILE_VAR: &str = "S3_TRAINING_DATA_FILE_NAME";

/// Deployment-level settings for the provisioning pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// How far ahead, in days, each generation predicts.
    pub forecast_horizon_days: u32,
    /// Training algorithm ARN; `None` requests automatic selection.
    pub predictor_algorithm_arn: Option<String>,
    /// Role assumed by the service to read training data.
    pub import_role_arn: String,
    /// Role assumed by the service to write export results.
    pub export_role_arn: String,
    /// Bucket holding training data and export results.
    pub prediction_bucket: String,
    /// Folder of the training data within the bucket.
    pub training_data_folder: String,
    /// Folder export results are written to within the bucket.
    pub export_folder: String,
    /// File name of the training data.
    pub training_data_file: String,
}

impl PipelineConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required variable is missing or the
    /// horizon is not a number.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required variable is missing or the
    /// horizon is not a number.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| -> Result<String, ConfigError> {
            match lookup(name) {
                Some(value) if !value.trim().is_empty() => Ok(value),
                _ => Err(ConfigError::MissingVar { name }),
            }
        };

        let horizon_raw = required(HORIZON_DAYS_VAR)?;
        let forecast_horizon_days =
            horizon_raw
                .trim()
                .parse::<u32>()
                .map_err(|_| ConfigError::InvalidNumber {
                    name: HORIZON_DAYS_VAR,
                    value: horizon_raw.clone(),
                })?;

        // A blank algorithm ARN means automatic model selection.
        let predictor_algorithm_arn =
            lookup(ALGORITHM_ARN_VAR).filter(|arn| !arn.trim().is_empty());

        Ok(Self {
            forecast_horizon_days,
            predictor_algorithm_arn,
            import_role_arn: required(IMPORT_ROLE_ARN_VAR)?,
            export_role_arn: required(EXPORT_ROLE_ARN_VAR)?,
            prediction_bucket: required(BUCKET_VAR)?,
            training_data_folder: required(SRC_FOLDER_VAR)?,
            export_folder: required(TGT_FOLDER_VAR)?,
            training_data_file: required(TRAINING_FILE_VAR)?,
        })
    }

    /// Object-storage URI of the training data file.
    #[must_use]
    pub fn training_data_uri(&self) -> String {
        format!(
            "s3://{}/{}/{}",
            self.prediction_bucket, self.training_data_folder, self.training_data_file
        )
    }

    /// Object-storage URI export results are written under.
    #[must_use]
    pub fn export_uri(&self) -> String {
        format!("s3://{}/{}", self.prediction_bucket, self.export_folder)
    }
}
