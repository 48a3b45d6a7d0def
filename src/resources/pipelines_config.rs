//
//  bitbucket-provision
//  resources/pipelines_config.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use async_trait::async_trait;
use tracing::info;

use super::{found, ManagedResource, ResourceId, Scoped};
use crate::api::cloud::{pipelines_config_path, PipelinesConfig};
use crate::api::{BitbucketClient, ClientError};

/// Desired Pipelines enablement of a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelinesConfigSpec {
    pub repository_id: String,
    pub enabled: bool,
}

impl ResourceId for Scoped<PipelinesConfig> {
    fn id(&self) -> String {
        self.repository_id.clone()
    }
}

/// Pipelines enablement, identified by repository id.
///
/// The setting always exists. Deleting it disables Pipelines.
#[derive(Debug, Clone, Copy)]
pub struct PipelinesConfigResource<'a> {
    client: &'a BitbucketClient,
}

impl<'a> PipelinesConfigResource<'a> {
    pub fn new(client: &'a BitbucketClient) -> Self {
        Self { client }
    }

    async fn put(
        &self,
        repository_id: &str,
        enabled: bool,
    ) -> Result<Scoped<PipelinesConfig>, ClientError> {
        let path = pipelines_config_path(self.client.workspace(), repository_id);
        let config: PipelinesConfig = self.client.put(&path, &PipelinesConfig { enabled }).await?;
        info!(repository = %repository_id, enabled = config.enabled, "Updated pipelines config");
        Ok(Scoped::new(repository_id, config))
    }
}

#[async_trait]
impl ManagedResource for PipelinesConfigResource<'_> {
    type Spec = PipelinesConfigSpec;
    type State = Scoped<PipelinesConfig>;

    async fn create(
        &self,
        spec: &PipelinesConfigSpec,
    ) -> Result<Scoped<PipelinesConfig>, ClientError> {
        self.put(&spec.repository_id, spec.enabled).await
    }

    async fn read(&self, id: &str) -> Result<Option<Scoped<PipelinesConfig>>, ClientError> {
        let path = pipelines_config_path(self.client.workspace(), id);
        let config = found(self.client.get::<PipelinesConfig>(&path).await)?;
        Ok(config.map(|c| Scoped::new(id, c)))
    }

    async fn update(
        &self,
        id: &str,
        spec: &PipelinesConfigSpec,
    ) -> Result<Scoped<PipelinesConfig>, ClientError> {
        self.put(id, spec.enabled).await
    }

    async fn delete(&self, id: &str) -> Result<(), ClientError> {
        self.put(id, false).await?;
        Ok(())
    }
}
