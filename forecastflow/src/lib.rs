//! # Forecastflow
//!
//! Lifecycle orchestration for the remote resources behind a recurring
//! forecasting pipeline: a dataset group, a dataset, an import job, a
//! predictor, a forecast and an export job, each created asynchronously by a
//! provisioning service and superseded by the next generation.
//!
//! The crate provides:
//!
//! - **Idempotent provisioning stages**: probe, then create, then re-probe,
//!   safe to re-invoke under the external driver's at-least-once contract
//! - **Generational garbage collection**: delete everything outside the
//!   preserved lineage and verify the deletions converged
//! - **Retryable-vs-fatal error classification**: the driver retries
//!   in-progress signals and stops on everything else
//! - **Generation planning**: deterministic names and ARNs derived from a
//!   timestamp and the deployment's ARN prefix
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use forecastflow::prelude::*;
//!
//! let orchestrator = ForecastOrchestrator::new(client, PipelineConfig::from_env()?);
//! let ids = orchestrator.plan_generation(now_millis, function_arn, window)?;
//!
//! // Invoked per stage by the external driver:
//! orchestrator.create_dataset(&ids).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod api;
pub mod cleanup;
pub mod config;
pub mod errors;
pub mod frequency;
pub mod identifiers;
pub mod observability;
pub mod orchestrator;
pub mod paginate;
pub mod planner;
pub mod stages;
pub mod status;
pub mod testing;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::api::{ApiError, Filter, FilterCondition, ForecastApi, Page};
    pub use crate::cleanup::{
        delete_outdated_dataset_groups, delete_outdated_dataset_import_jobs,
        delete_outdated_datasets, delete_outdated_forecast_export_jobs,
        delete_outdated_forecasts, delete_outdated_predictors, RETAINED_FORECAST_COUNT,
    };
    pub use crate::config::PipelineConfig;
    pub use crate::errors::OrchestrationError;
    pub use crate::frequency::DataFrequency;
    pub use crate::identifiers::{ResourceIdKey, ResourceIdMap, ResourceKind};
    pub use crate::orchestrator::ForecastOrchestrator;
    pub use crate::paginate::drain_pages;
    pub use crate::planner::{
        build_cron_resource_id_map, build_resource_id_map, derive_resource_arn_prefix,
    };
    pub use crate::stages::{
        provision, DatasetGroupStage, DatasetImportJobStage, DatasetStage,
        ForecastExportJobStage, ForecastStage, PredictorStage, StageResource,
    };
    pub use crate::status::StatusClassification;
}
