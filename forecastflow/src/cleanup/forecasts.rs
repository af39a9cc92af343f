//! Outdated forecast collection with bounded retention.
//!
//! Forecasts are the one resource kept as a rolling window rather than a
//! single preserved instance: recent forecasts stay queryable while older
//! generations age out. Unlike the other cleanup routines this one does not
//! re-list to verify convergence: deletion here is fire-and-forget, bounded
//! by the retention count.

use crate::api::{Filter, ForecastApi, ForecastSummary};
use crate::errors::OrchestrationError;
use crate::identifiers::{ResourceIdKey, ResourceIdMap, ResourceKind};
use crate::paginate::drain_pages;
use crate::status::ACTIVE_STATUS;

use super::{list_outdated_predictor_arns, swallow_missing, FORECAST_LINEAGE, STATUS_FILTER_KEY};

/// How many recent forecasts of the preserved predictor are kept, besides
/// the current run's forecast.
pub const RETAINED_FORECAST_COUNT: usize = 5;

/// Deletes every forecast of every outdated predictor, then trims the
/// preserved predictor's active forecasts down to the retention window.
///
/// The current run's forecast is always kept; of the rest, the
/// [`RETAINED_FORECAST_COUNT`] most recent survive.
///
/// # Errors
///
/// Pass-through API and identifier-map errors only; this routine raises no
/// cleanup-in-progress signal.
pub async fn delete_outdated_forecasts(
    api: &dyn ForecastApi,
    ids: &ResourceIdMap,
) -> Result<(), OrchestrationError> {
    let current_forecast = ids.get(ResourceIdKey::ForecastArn)?;
    let preserved_predictor = ids.get(ResourceIdKey::PredictorArn)?;
    let kind = ResourceKind::Forecast;
    tracing::info!(
        current_forecast,
        preserved_predictor,
        "collecting outdated forecasts"
    );

    // Every forecast of an outdated predictor is outdated, whatever its
    // status.
    let outdated_predictors = list_outdated_predictor_arns(api, preserved_predictor).await?;
    for predictor_arn in &outdated_predictors {
        tracing::info!(%predictor_arn, "deleting forecasts of outdated predictor");
        let forecasts = list_forecasts_of_predictor(api, predictor_arn, None).await?;
        for forecast in forecasts {
            swallow_missing(
                api.delete_forecast(&forecast.forecast_arn).await,
                kind,
                &forecast.forecast_arn,
            )?;
        }
    }

    // Trim the preserved predictor's active forecasts to the retention
    // window, newest kept.
    let mut candidates =
        list_forecasts_of_predictor(api, preserved_predictor, Some(ACTIVE_STATUS)).await?;
    candidates.retain(|f| f.forecast_arn != current_forecast);

    if candidates.len() > RETAINED_FORECAST_COUNT {
        let excess = candidates.len() - RETAINED_FORECAST_COUNT;
        candidates.sort_by_key(|f| f.creation_time);
        for forecast in candidates.iter().take(excess) {
            tracing::info!(arn = %forecast.forecast_arn, "about to delete forecast");
            swallow_missing(
                api.delete_forecast(&forecast.forecast_arn).await,
                kind,
                &forecast.forecast_arn,
            )?;
        }
    } else {
        tracing::info!(
            count = candidates.len(),
            "not enough prior forecasts to trim"
        );
    }

    Ok(())
}

/// Lists a predictor's forecasts, optionally restricted to one status.
async fn list_forecasts_of_predictor(
    api: &dyn ForecastApi,
    predictor_arn: &str,
    status: Option<&str>,
) -> Result<Vec<ForecastSummary>, OrchestrationError> {
    let mut filters = vec![Filter::is(FORECAST_LINEAGE.parent_filter_key, predictor_arn)];
    if let Some(status) = status {
        filters.push(Filter::is(STATUS_FILTER_KEY, status));
    }
    Ok(drain_pages(|token| api.list_forecasts(&filters, token)).await?)
}
