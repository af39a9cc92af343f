//! Dataset group provisioning.

use crate::api::{ApiError, CreateDatasetGroupRequest, ForecastApi};
use crate::errors::OrchestrationError;
use crate::identifiers::{ResourceIdKey, ResourceIdMap, ResourceKind};

use super::DOMAIN;

/// Creates the generation's dataset group.
///
/// Unlike the other stages this one never probes: the service offers no
/// describe for dataset groups, and group creation is synchronous, so a
/// successful acknowledgment already means the group exists. An
/// `AlreadyExists` rejection is the idempotent-success case for re-invoked
/// stages.
#[derive(Debug, Clone, Copy, Default)]
pub struct DatasetGroupStage;

impl DatasetGroupStage {
    /// Runs the stage.
    ///
    /// # Errors
    ///
    /// Pass-through API and identifier-map errors; `AlreadyExists` is not an
    /// error here.
    pub async fn run(
        &self,
        api: &dyn ForecastApi,
        ids: &ResourceIdMap,
    ) -> Result<(), OrchestrationError> {
        let dataset_arn = ids.get(ResourceIdKey::DatasetArn)?;
        let dataset_group_name = ids.get(ResourceIdKey::DatasetGroupName)?;
        let kind = ResourceKind::DatasetGroup;

        let request = CreateDatasetGroupRequest {
            dataset_group_name: dataset_group_name.to_string(),
            dataset_arns: vec![dataset_arn.to_string()],
            domain: DOMAIN.to_string(),
        };

        match api.create_dataset_group(request).await {
            Ok(()) => {}
            Err(ApiError::AlreadyExists { .. }) => {
                tracing::info!(%kind, dataset_group_name, "dataset group already exists");
            }
            Err(err) => return Err(err.into()),
        }

        tracing::info!(%kind, dataset_group_name, "successfully set up dataset group");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeForecast;

    fn ids() -> ResourceIdMap {
        ResourceIdMap::new()
            .with(ResourceIdKey::DatasetArn, "arn:ds")
            .with(ResourceIdKey::DatasetGroupName, "dsg_1600000000000")
    }

    #[tokio::test]
    async fn test_creates_group_with_dataset() {
        let fake = FakeForecast::new();

        DatasetGroupStage.run(&fake, &ids()).await.unwrap();

        let requests = fake.dataset_group_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].dataset_group_name, "dsg_1600000000000");
        assert_eq!(requests[0].dataset_arns, vec!["arn:ds".to_string()]);
        assert_eq!(requests[0].domain, "CUSTOM");
    }

    #[tokio::test]
    async fn test_already_exists_is_success() {
        let fake = FakeForecast::new();
        fake.script_op(
            "create_dataset_group",
            Err(ApiError::AlreadyExists {
                message: "dsg_1600000000000".to_string(),
            }),
        );

        DatasetGroupStage.run(&fake, &ids()).await.unwrap();
    }

    #[tokio::test]
    async fn test_remote_error_passes_through() {
        let fake = FakeForecast::new();
        fake.script_op(
            "create_dataset_group",
            Err(ApiError::Remote {
                message: "access denied".to_string(),
            }),
        );

        let err = DatasetGroupStage.run(&fake, &ids()).await.unwrap_err();
        assert!(matches!(err, OrchestrationError::Api(ApiError::Remote { .. })));
    }

    #[tokio::test]
    async fn test_missing_identifier_is_fatal() {
        let fake = FakeForecast::new();
        let incomplete = ResourceIdMap::new().with(ResourceIdKey::DatasetArn, "arn:ds");

        let err = DatasetGroupStage.run(&fake, &incomplete).await.unwrap_err();
        assert!(matches!(err, OrchestrationError::MissingIdentifier { .. }));
        assert_eq!(fake.call_count("create_dataset_group"), 0);
    }
}
