//! Planning the identifiers of a pipeline generation.
//!
//! Every resource a generation creates embeds the same millisecond timestamp
//! in its name, which is what makes generational garbage collection possible:
//! the preserved lineage is exactly the set of names carrying the current
//! timestamp. Both builders here are pure functions of their inputs.

use crate::api::{DatasetSummary, ForecastApi, PredictorSummary};
use crate::errors::OrchestrationError;
use crate::frequency::DataFrequency;
use crate::identifiers::{ResourceIdKey, ResourceIdMap};
use crate::paginate::drain_pages;

const ARN_COMPONENT_SPLITTER: char = ':';
const FORECAST_SERVICE_NAME: &str = "forecast";

pub(crate) const DATASET_NAME_PREFIX: &str = "ds_";
pub(crate) const DATASET_GROUP_NAME_PREFIX: &str = "dsg_";
pub(crate) const DATASET_IMPORT_JOB_NAME_PREFIX: &str = "dsij_";
pub(crate) const PREDICTOR_NAME_PREFIX: &str = "p_";
pub(crate) const FORECAST_NAME_PREFIX: &str = "f_";
pub(crate) const FORECAST_EXPORT_JOB_NAME_PREFIX: &str = "fej_";

/// Derives the forecasting service's ARN prefix from the invoking function's
/// ARN.
///
/// `arn:aws:lambda:us-east-1:443299619838:function:CreateDataset` becomes
/// `arn:aws:forecast:us-east-1:443299619838:`, keeping the partition, region
/// and account while swapping the service name.
///
/// # Errors
///
/// Returns [`OrchestrationError::Precondition`] when the input does not have
/// the expected ARN component layout.
pub fn derive_resource_arn_prefix(function_arn: &str) -> Result<String, OrchestrationError> {
    let components: Vec<&str> = function_arn.split(ARN_COMPONENT_SPLITTER).collect();
    if components.len() < 5 {
        return Err(OrchestrationError::Precondition(format!(
            "cannot derive resource ARN prefix from malformed function ARN [{function_arn}]"
        )));
    }

    Ok(format!(
        "{}:{}:{}:{}:{}:",
        components[0], // arn
        components[1], // partition: "aws" or "aws-cn"
        FORECAST_SERVICE_NAME,
        components[3], // region
        components[4], // account id
    ))
}

/// Builds the identifier map for a fresh generation.
///
/// Pure: the same timestamp, prefix and frequency always produce the same
/// map.
#[must_use]
pub fn build_resource_id_map(
    timestamp_millis: i64,
    arn_prefix: &str,
    data_frequency: DataFrequency,
) -> ResourceIdMap {
    let dataset_name = format!("{DATASET_NAME_PREFIX}{timestamp_millis}");
    let dataset_group_name = format!("{DATASET_GROUP_NAME_PREFIX}{timestamp_millis}");
    let import_job_name = format!("{DATASET_IMPORT_JOB_NAME_PREFIX}{timestamp_millis}");
    let predictor_name = format!("{PREDICTOR_NAME_PREFIX}{timestamp_millis}");
    let forecast_name = format!("{FORECAST_NAME_PREFIX}{timestamp_millis}");

    ResourceIdMap::new()
        .with(ResourceIdKey::ForecastResourceArnPrefix, arn_prefix)
        .with(ResourceIdKey::DatasetName, dataset_name.clone())
        .with(
            ResourceIdKey::DatasetArn,
            format!("{arn_prefix}dataset/{dataset_name}"),
        )
        .with(ResourceIdKey::DatasetGroupName, dataset_group_name.clone())
        .with(
            ResourceIdKey::DatasetGroupArn,
            format!("{arn_prefix}dataset-group/{dataset_group_name}"),
        )
        .with(ResourceIdKey::DatasetImportJobName, import_job_name.clone())
        .with(
            ResourceIdKey::DatasetImportJobArn,
            format!("{arn_prefix}dataset-import-job/{dataset_name}/{import_job_name}"),
        )
        .with(ResourceIdKey::PredictorName, predictor_name.clone())
        .with(
            ResourceIdKey::PredictorArn,
            format!("{arn_prefix}predictor/{predictor_name}"),
        )
        .with(ResourceIdKey::ForecastName, forecast_name.clone())
        .with(
            ResourceIdKey::ForecastArn,
            format!("{arn_prefix}forecast/{forecast_name}"),
        )
        .with(ResourceIdKey::DataFrequency, data_frequency.as_str())
}

/// Builds the identifier map for a steady-state (cron) generation.
///
/// A cron generation re-imports fresh demand into the latest dataset and
/// generates a new forecast plus export from the latest predictor, so only
/// the import job, forecast and export job get new names.
#[must_use]
pub fn build_cron_resource_id_map(
    timestamp_millis: i64,
    arn_prefix: &str,
    dataset_name: &str,
    predictor_arn: &str,
) -> ResourceIdMap {
    let import_job_name = format!("{DATASET_IMPORT_JOB_NAME_PREFIX}{timestamp_millis}");
    let forecast_name = format!("{FORECAST_NAME_PREFIX}{timestamp_millis}");
    let export_job_name = format!("{FORECAST_EXPORT_JOB_NAME_PREFIX}{timestamp_millis}");

    ResourceIdMap::new()
        .with(
            ResourceIdKey::DatasetArn,
            format!("{arn_prefix}dataset/{dataset_name}"),
        )
        .with(ResourceIdKey::DatasetImportJobName, import_job_name.clone())
        .with(
            ResourceIdKey::DatasetImportJobArn,
            format!("{arn_prefix}dataset-import-job/{dataset_name}/{import_job_name}"),
        )
        .with(ResourceIdKey::PredictorArn, predictor_arn)
        .with(ResourceIdKey::ForecastName, forecast_name.clone())
        .with(
            ResourceIdKey::ForecastArn,
            format!("{arn_prefix}forecast/{forecast_name}"),
        )
        .with(ResourceIdKey::ForecastExportJobName, export_job_name.clone())
        .with(
            ResourceIdKey::ForecastExportJobArn,
            format!("{arn_prefix}forecast-export-job/{forecast_name}/{export_job_name}"),
        )
}

/// Finds the most recently created dataset.
///
/// # Errors
///
/// Propagates list failures unmodified.
pub async fn latest_dataset(
    api: &dyn ForecastApi,
) -> Result<Option<DatasetSummary>, OrchestrationError> {
    let datasets = drain_pages(|token| api.list_datasets(token)).await?;
    Ok(datasets.into_iter().max_by_key(|d| d.creation_time))
}

/// Finds the most recently created predictor.
///
/// # Errors
///
/// Propagates list failures unmodified.
pub async fn latest_predictor(
    api: &dyn ForecastApi,
) -> Result<Option<PredictorSummary>, OrchestrationError> {
    let predictors = drain_pages(|token| api.list_predictors(token)).await?;
    Ok(predictors.into_iter().max_by_key(|p| p.creation_time))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PREFIX: &str = "arn:aws:forecast:us-west-2:443299619838:";

    #[test]
    fn test_derive_prefix_swaps_service() {
        let prefix = derive_resource_arn_prefix(
            "arn:aws:lambda:us-east-1:443299619838:function:CreateDataset",
        )
        .unwrap();
        assert_eq!(prefix, "arn:aws:forecast:us-east-1:443299619838:");
    }

    #[test]
    fn test_derive_prefix_keeps_partition() {
        let prefix =
            derive_resource_arn_prefix("arn:aws-cn:lambda:cn-north-1:123:function:f").unwrap();
        assert_eq!(prefix, "arn:aws-cn:forecast:cn-north-1:123:");
    }

    #[test]
    fn test_derive_prefix_rejects_malformed_arn() {
        let err = derive_resource_arn_prefix("not-an-arn").unwrap_err();
        assert!(matches!(err, OrchestrationError::Precondition(_)));
    }

    #[test]
    fn test_build_map_is_pure() {
        let first = build_resource_id_map(1_600_000_000_000, PREFIX, DataFrequency::Daily);
        let second = build_resource_id_map(1_600_000_000_000, PREFIX, DataFrequency::Daily);
        assert_eq!(first, second);
    }

    #[test]
    fn test_build_map_composes_arns() {
        let ids = build_resource_id_map(1_600_000_000_000, PREFIX, DataFrequency::ThirtyMinutes);

        assert_eq!(
            ids.get(ResourceIdKey::DatasetArn).unwrap(),
            format!("{PREFIX}dataset/ds_1600000000000")
        );
        assert_eq!(
            ids.get(ResourceIdKey::DatasetGroupArn).unwrap(),
            format!("{PREFIX}dataset-group/dsg_1600000000000")
        );
        assert_eq!(
            ids.get(ResourceIdKey::DatasetImportJobArn).unwrap(),
            format!("{PREFIX}dataset-import-job/ds_1600000000000/dsij_1600000000000")
        );
        assert_eq!(
            ids.get(ResourceIdKey::PredictorArn).unwrap(),
            format!("{PREFIX}predictor/p_1600000000000")
        );
        assert_eq!(ids.get(ResourceIdKey::DataFrequency).unwrap(), "30min");
        // A fresh generation has no export job of its own.
        assert!(ids.get_opt(ResourceIdKey::ForecastExportJobArn).is_none());
    }

    #[test]
    fn test_build_cron_map_reuses_lineage() {
        let ids = build_cron_resource_id_map(
            1_700_000_000_000,
            PREFIX,
            "ds_1600000000000",
            "arn:aws:forecast:us-west-2:443299619838:predictor/p_1600000000000",
        );

        assert_eq!(
            ids.get(ResourceIdKey::DatasetArn).unwrap(),
            format!("{PREFIX}dataset/ds_1600000000000")
        );
        assert_eq!(
            ids.get(ResourceIdKey::DatasetImportJobArn).unwrap(),
            format!("{PREFIX}dataset-import-job/ds_1600000000000/dsij_1700000000000")
        );
        assert_eq!(
            ids.get(ResourceIdKey::PredictorArn).unwrap(),
            "arn:aws:forecast:us-west-2:443299619838:predictor/p_1600000000000"
        );
        assert_eq!(
            ids.get(ResourceIdKey::ForecastExportJobArn).unwrap(),
            format!("{PREFIX}forecast-export-job/f_1700000000000/fej_1700000000000")
        );
        // The cron variant never renames the dataset group.
        assert!(ids.get_opt(ResourceIdKey::DatasetGroupArn).is_none());
    }
}
