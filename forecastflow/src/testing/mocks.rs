//! An in-memory [`ForecastApi`] for exercising the orchestration protocol.
//!
//! The fake keeps a seedable store of resource summaries, evaluates list
//! filters the way the remote service does, records every call, and lets
//! tests script describe responses and per-operation failures. Deletions
//! remove from the store by default; switch that off with
//! [`FakeForecast::set_deletes_converge`] to simulate deletions that have
//! not converged by the time a cleanup routine re-lists.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};

use crate::api::{
    ApiError, ApiResult, CreateDatasetGroupRequest, CreateDatasetImportJobRequest,
    CreateDatasetRequest, CreateForecastExportJobRequest, CreateForecastRequest,
    CreatePredictorRequest, DatasetGroupSummary, DatasetImportJobSummary, DatasetSummary, Filter,
    FilterCondition, ForecastApi, ForecastExportJobSummary, ForecastSummary, Page,
    PredictorSummary,
};
use crate::identifiers::ResourceKind;

#[derive(Debug, Default)]
struct Store {
    dataset_groups: Vec<DatasetGroupSummary>,
    datasets: Vec<DatasetSummary>,
    import_jobs: Vec<DatasetImportJobSummary>,
    predictors: Vec<PredictorSummary>,
    forecasts: Vec<ForecastSummary>,
    export_jobs: Vec<ForecastExportJobSummary>,
}

#[derive(Debug, Default)]
struct DescribeScripts {
    dataset: VecDeque<ApiResult<String>>,
    import_job: VecDeque<ApiResult<String>>,
    predictor: VecDeque<ApiResult<String>>,
    forecast: VecDeque<ApiResult<String>>,
    export_job: VecDeque<ApiResult<String>>,
}

#[derive(Debug, Default)]
struct CreateRequests {
    dataset_groups: Vec<CreateDatasetGroupRequest>,
    datasets: Vec<CreateDatasetRequest>,
    import_jobs: Vec<CreateDatasetImportJobRequest>,
    predictors: Vec<CreatePredictorRequest>,
    forecasts: Vec<CreateForecastRequest>,
    export_jobs: Vec<CreateForecastExportJobRequest>,
}

/// In-memory provisioning service with call recording.
#[derive(Debug, Default)]
pub struct FakeForecast {
    store: Mutex<Store>,
    describes: Mutex<DescribeScripts>,
    op_results: Mutex<HashMap<&'static str, VecDeque<ApiResult<()>>>>,
    calls: Mutex<Vec<(String, String)>>,
    requests: Mutex<CreateRequests>,
    deletes_converge: Mutex<bool>,
}

impl FakeForecast {
    /// Creates an empty fake whose deletions converge immediately.
    #[must_use]
    pub fn new() -> Self {
        Self {
            deletes_converge: Mutex::new(true),
            ..Self::default()
        }
    }

    /// Controls whether deletions actually remove resources from the store.
    pub fn set_deletes_converge(&self, converge: bool) {
        *self.deletes_converge.lock() = converge;
    }

    /// Queues the next describe response for a resource kind.
    ///
    /// Unscripted describes answer with `NotFound`.
    pub fn script_describe(&self, kind: ResourceKind, response: ApiResult<String>) {
        let mut scripts = self.describes.lock();
        match kind {
            ResourceKind::Dataset => scripts.dataset.push_back(response),
            ResourceKind::DatasetImportJob => scripts.import_job.push_back(response),
            ResourceKind::Predictor => scripts.predictor.push_back(response),
            ResourceKind::Forecast => scripts.forecast.push_back(response),
            ResourceKind::ForecastExportJob => scripts.export_job.push_back(response),
            // The service offers no describe for dataset groups.
            ResourceKind::DatasetGroup => {}
        }
    }

    /// Queues a result for the next invocation of `operation`
    /// (a create or delete method name, e.g. `"delete_dataset"`).
    pub fn script_op(&self, operation: &'static str, result: ApiResult<()>) {
        self.op_results
            .lock()
            .entry(operation)
            .or_default()
            .push_back(result);
    }

    /// Seeds a dataset group.
    pub fn add_dataset_group(&self, summary: DatasetGroupSummary) {
        self.store.lock().dataset_groups.push(summary);
    }

    /// Seeds a dataset.
    pub fn add_dataset(&self, summary: DatasetSummary) {
        self.store.lock().datasets.push(summary);
    }

    /// Seeds a dataset import job.
    pub fn add_import_job(&self, summary: DatasetImportJobSummary) {
        self.store.lock().import_jobs.push(summary);
    }

    /// Seeds a predictor.
    pub fn add_predictor(&self, summary: PredictorSummary) {
        self.store.lock().predictors.push(summary);
    }

    /// Seeds a forecast.
    pub fn add_forecast(&self, summary: ForecastSummary) {
        self.store.lock().forecasts.push(summary);
    }

    /// Seeds a forecast export job.
    pub fn add_export_job(&self, summary: ForecastExportJobSummary) {
        self.store.lock().export_jobs.push(summary);
    }

    /// Number of calls made to `operation`.
    #[must_use]
    pub fn call_count(&self, operation: &str) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|(op, _)| op == operation)
            .count()
    }

    /// Arguments of every call made to `operation`, in call order.
    #[must_use]
    pub fn calls_of(&self, operation: &str) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .filter(|(op, _)| op == operation)
            .map(|(_, arg)| arg.clone())
            .collect()
    }

    /// Recorded predictor creation requests.
    #[must_use]
    pub fn predictor_requests(&self) -> Vec<CreatePredictorRequest> {
        self.requests.lock().predictors.clone()
    }

    /// Recorded dataset creation requests.
    #[must_use]
    pub fn dataset_requests(&self) -> Vec<CreateDatasetRequest> {
        self.requests.lock().datasets.clone()
    }

    /// Recorded dataset group creation requests.
    #[must_use]
    pub fn dataset_group_requests(&self) -> Vec<CreateDatasetGroupRequest> {
        self.requests.lock().dataset_groups.clone()
    }

    /// Recorded import job creation requests.
    #[must_use]
    pub fn import_job_requests(&self) -> Vec<CreateDatasetImportJobRequest> {
        self.requests.lock().import_jobs.clone()
    }

    /// Recorded forecast creation requests.
    #[must_use]
    pub fn forecast_requests(&self) -> Vec<CreateForecastRequest> {
        self.requests.lock().forecasts.clone()
    }

    /// Recorded export job creation requests.
    #[must_use]
    pub fn export_job_requests(&self) -> Vec<CreateForecastExportJobRequest> {
        self.requests.lock().export_jobs.clone()
    }

    fn record(&self, operation: &str, argument: &str) {
        self.calls
            .lock()
            .push((operation.to_string(), argument.to_string()));
    }

    fn op_result(&self, operation: &'static str) -> ApiResult<()> {
        self.op_results
            .lock()
            .get_mut(operation)
            .and_then(VecDeque::pop_front)
            .unwrap_or(Ok(()))
    }

    fn next_describe(&self, kind: ResourceKind, arn: &str) -> ApiResult<String> {
        let mut scripts = self.describes.lock();
        let queue = match kind {
            ResourceKind::Dataset => &mut scripts.dataset,
            ResourceKind::DatasetImportJob => &mut scripts.import_job,
            ResourceKind::Predictor => &mut scripts.predictor,
            ResourceKind::Forecast => &mut scripts.forecast,
            ResourceKind::ForecastExportJob => &mut scripts.export_job,
            ResourceKind::DatasetGroup => {
                return Err(ApiError::Remote {
                    message: "describe is not offered for dataset groups".to_string(),
                })
            }
        };
        queue.pop_front().unwrap_or_else(|| {
            Err(ApiError::NotFound {
                message: format!("cannot find {kind} [{arn}]"),
            })
        })
    }
}

fn matches<F>(filters: &[Filter], field: F) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    filters.iter().all(|filter| {
        let value = field(&filter.key);
        match filter.condition {
            FilterCondition::Is => value.as_deref() == Some(filter.value.as_str()),
            FilterCondition::IsNot => value.as_deref() != Some(filter.value.as_str()),
        }
    })
}

#[async_trait]
impl ForecastApi for FakeForecast {
    async fn create_dataset_group(&self, request: CreateDatasetGroupRequest) -> ApiResult<()> {
        self.record("create_dataset_group", &request.dataset_group_name);
        self.requests.lock().dataset_groups.push(request);
        self.op_result("create_dataset_group")
    }

    async fn delete_dataset_group(&self, dataset_group_arn: &str) -> ApiResult<()> {
        self.record("delete_dataset_group", dataset_group_arn);
        self.op_result("delete_dataset_group")?;
        if *self.deletes_converge.lock() {
            self.store
                .lock()
                .dataset_groups
                .retain(|g| g.dataset_group_arn != dataset_group_arn);
        }
        Ok(())
    }

    async fn list_dataset_groups(
        &self,
        _next_token: Option<String>,
    ) -> ApiResult<Page<DatasetGroupSummary>> {
        self.record("list_dataset_groups", "");
        Ok(Page::last(self.store.lock().dataset_groups.clone()))
    }

    async fn create_dataset(&self, request: CreateDatasetRequest) -> ApiResult<()> {
        self.record("create_dataset", &request.dataset_name);
        self.requests.lock().datasets.push(request);
        self.op_result("create_dataset")
    }

    async fn describe_dataset(&self, dataset_arn: &str) -> ApiResult<String> {
        self.record("describe_dataset", dataset_arn);
        self.next_describe(ResourceKind::Dataset, dataset_arn)
    }

    async fn delete_dataset(&self, dataset_arn: &str) -> ApiResult<()> {
        self.record("delete_dataset", dataset_arn);
        self.op_result("delete_dataset")?;
        if *self.deletes_converge.lock() {
            self.store
                .lock()
                .datasets
                .retain(|d| d.dataset_arn != dataset_arn);
        }
        Ok(())
    }

    async fn list_datasets(&self, _next_token: Option<String>) -> ApiResult<Page<DatasetSummary>> {
        self.record("list_datasets", "");
        Ok(Page::last(self.store.lock().datasets.clone()))
    }

    async fn create_dataset_import_job(
        &self,
        request: CreateDatasetImportJobRequest,
    ) -> ApiResult<()> {
        self.record("create_dataset_import_job", &request.dataset_import_job_name);
        self.requests.lock().import_jobs.push(request);
        self.op_result("create_dataset_import_job")
    }

    async fn describe_dataset_import_job(
        &self,
        dataset_import_job_arn: &str,
    ) -> ApiResult<String> {
        self.record("describe_dataset_import_job", dataset_import_job_arn);
        self.next_describe(ResourceKind::DatasetImportJob, dataset_import_job_arn)
    }

    async fn delete_dataset_import_job(&self, dataset_import_job_arn: &str) -> ApiResult<()> {
        self.record("delete_dataset_import_job", dataset_import_job_arn);
        self.op_result("delete_dataset_import_job")?;
        if *self.deletes_converge.lock() {
            self.store
                .lock()
                .import_jobs
                .retain(|j| j.dataset_import_job_arn != dataset_import_job_arn);
        }
        Ok(())
    }

    async fn list_dataset_import_jobs(
        &self,
        filters: &[Filter],
        _next_token: Option<String>,
    ) -> ApiResult<Page<DatasetImportJobSummary>> {
        self.record("list_dataset_import_jobs", "");
        let jobs = self
            .store
            .lock()
            .import_jobs
            .iter()
            .filter(|job| {
                matches(filters, |key| match key {
                    "DatasetArn" => Some(job.dataset_arn.clone()),
                    "Status" => Some(job.status.clone()),
                    _ => None,
                })
            })
            .cloned()
            .collect();
        Ok(Page::last(jobs))
    }

    async fn create_predictor(&self, request: CreatePredictorRequest) -> ApiResult<()> {
        self.record("create_predictor", &request.predictor_name);
        self.requests.lock().predictors.push(request);
        self.op_result("create_predictor")
    }

    async fn describe_predictor(&self, predictor_arn: &str) -> ApiResult<String> {
        self.record("describe_predictor", predictor_arn);
        self.next_describe(ResourceKind::Predictor, predictor_arn)
    }

    async fn delete_predictor(&self, predictor_arn: &str) -> ApiResult<()> {
        self.record("delete_predictor", predictor_arn);
        self.op_result("delete_predictor")?;
        if *self.deletes_converge.lock() {
            self.store
                .lock()
                .predictors
                .retain(|p| p.predictor_arn != predictor_arn);
        }
        Ok(())
    }

    async fn list_predictors(
        &self,
        _next_token: Option<String>,
    ) -> ApiResult<Page<PredictorSummary>> {
        self.record("list_predictors", "");
        Ok(Page::last(self.store.lock().predictors.clone()))
    }

    async fn create_forecast(&self, request: CreateForecastRequest) -> ApiResult<()> {
        self.record("create_forecast", &request.forecast_name);
        self.requests.lock().forecasts.push(request);
        self.op_result("create_forecast")
    }

    async fn describe_forecast(&self, forecast_arn: &str) -> ApiResult<String> {
        self.record("describe_forecast", forecast_arn);
        self.next_describe(ResourceKind::Forecast, forecast_arn)
    }

    async fn delete_forecast(&self, forecast_arn: &str) -> ApiResult<()> {
        self.record("delete_forecast", forecast_arn);
        self.op_result("delete_forecast")?;
        if *self.deletes_converge.lock() {
            self.store
                .lock()
                .forecasts
                .retain(|f| f.forecast_arn != forecast_arn);
        }
        Ok(())
    }

    async fn list_forecasts(
        &self,
        filters: &[Filter],
        _next_token: Option<String>,
    ) -> ApiResult<Page<ForecastSummary>> {
        self.record("list_forecasts", "");
        let forecasts = self
            .store
            .lock()
            .forecasts
            .iter()
            .filter(|forecast| {
                matches(filters, |key| match key {
                    "PredictorArn" => Some(forecast.predictor_arn.clone()),
                    "Status" => Some(forecast.status.clone()),
                    _ => None,
                })
            })
            .cloned()
            .collect();
        Ok(Page::last(forecasts))
    }

    async fn create_forecast_export_job(
        &self,
        request: CreateForecastExportJobRequest,
    ) -> ApiResult<()> {
        self.record(
            "create_forecast_export_job",
            &request.forecast_export_job_name,
        );
        self.requests.lock().export_jobs.push(request);
        self.op_result("create_forecast_export_job")
    }

    async fn describe_forecast_export_job(
        &self,
        forecast_export_job_arn: &str,
    ) -> ApiResult<String> {
        self.record("describe_forecast_export_job", forecast_export_job_arn);
        self.next_describe(ResourceKind::ForecastExportJob, forecast_export_job_arn)
    }

    async fn delete_forecast_export_job(&self, forecast_export_job_arn: &str) -> ApiResult<()> {
        self.record("delete_forecast_export_job", forecast_export_job_arn);
        self.op_result("delete_forecast_export_job")?;
        if *self.deletes_converge.lock() {
            self.store
                .lock()
                .export_jobs
                .retain(|j| j.forecast_export_job_arn != forecast_export_job_arn);
        }
        Ok(())
    }

    async fn list_forecast_export_jobs(
        &self,
        filters: &[Filter],
        _next_token: Option<String>,
    ) -> ApiResult<Page<ForecastExportJobSummary>> {
        self.record("list_forecast_export_jobs", "");
        let jobs = self
            .store
            .lock()
            .export_jobs
            .iter()
            .filter(|job| {
                matches(filters, |key| match key {
                    "ForecastArn" => Some(job.forecast_arn.clone()),
                    "Status" => Some(job.status.clone()),
                    _ => None,
                })
            })
            .cloned()
            .collect();
        Ok(Page::last(jobs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::creation_time;

    fn forecast(arn: &str, predictor_arn: &str, status: &str) -> ForecastSummary {
        ForecastSummary {
            forecast_arn: arn.to_string(),
            forecast_name: arn.rsplit('/').next().unwrap_or(arn).to_string(),
            predictor_arn: predictor_arn.to_string(),
            status: status.to_string(),
            creation_time: creation_time(1_600_000_000),
        }
    }

    #[tokio::test]
    async fn test_list_forecasts_applies_filters() {
        let fake = FakeForecast::new();
        fake.add_forecast(forecast("arn:f1", "arn:p1", "ACTIVE"));
        fake.add_forecast(forecast("arn:f2", "arn:p1", "CREATE_IN_PROGRESS"));
        fake.add_forecast(forecast("arn:f3", "arn:p2", "ACTIVE"));

        let filters = [
            Filter::is("PredictorArn", "arn:p1"),
            Filter::is("Status", "ACTIVE"),
        ];
        let page = fake.list_forecasts(&filters, None).await.unwrap();

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].forecast_arn, "arn:f1");
    }

    #[tokio::test]
    async fn test_is_not_filter() {
        let fake = FakeForecast::new();
        fake.add_forecast(forecast("arn:f1", "arn:p1", "ACTIVE"));
        fake.add_forecast(forecast("arn:f2", "arn:p2", "ACTIVE"));

        let filters = [Filter::is_not("PredictorArn", "arn:p1")];
        let page = fake.list_forecasts(&filters, None).await.unwrap();

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].forecast_arn, "arn:f2");
    }

    #[tokio::test]
    async fn test_delete_converges_by_default() {
        let fake = FakeForecast::new();
        fake.add_forecast(forecast("arn:f1", "arn:p1", "ACTIVE"));

        fake.delete_forecast("arn:f1").await.unwrap();

        let page = fake.list_forecasts(&[], None).await.unwrap();
        assert!(page.items.is_empty());
        assert_eq!(fake.calls_of("delete_forecast"), vec!["arn:f1"]);
    }

    #[tokio::test]
    async fn test_delete_without_convergence_keeps_listing() {
        let fake = FakeForecast::new();
        fake.set_deletes_converge(false);
        fake.add_forecast(forecast("arn:f1", "arn:p1", "ACTIVE"));

        fake.delete_forecast("arn:f1").await.unwrap();

        let page = fake.list_forecasts(&[], None).await.unwrap();
        assert_eq!(page.items.len(), 1);
    }

    #[tokio::test]
    async fn test_unscripted_describe_is_not_found() {
        let fake = FakeForecast::new();
        let err = fake.describe_dataset("arn:ds").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_scripted_op_failure_fires_once() {
        let fake = FakeForecast::new();
        fake.script_op(
            "delete_dataset",
            Err(ApiError::NotFound {
                message: "gone".to_string(),
            }),
        );

        assert!(fake.delete_dataset("arn:ds").await.is_err());
        assert!(fake.delete_dataset("arn:ds").await.is_ok());
    }
}
