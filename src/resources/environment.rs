//
//  bitbucket-provision
//  resources/environment.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use async_trait::async_trait;
use tracing::info;

use super::{found, ManagedResource, ResourceId, Scoped};
use crate::api::cloud::{
    environment_changes_path, environment_path, environments_path, DeploymentTier, Environment,
    EnvironmentChanges,
};
use crate::api::{ApiRequest, BitbucketClient, ClientError};
use crate::util::{decode_id, encode_id};

/// Desired state of a deployment environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentSpec {
    pub repository_id: String,
    pub name: String,

    /// Fixed at creation. Updates only rename.
    pub tier: DeploymentTier,
}

impl ResourceId for Scoped<Environment> {
    fn id(&self) -> String {
        encode_id(&self.repository_id, &self.value.uuid)
    }
}

/// Deployment environments of repositories in the session's workspace.
#[derive(Debug, Clone, Copy)]
pub struct EnvironmentResource<'a> {
    client: &'a BitbucketClient,
}

impl<'a> EnvironmentResource<'a> {
    pub fn new(client: &'a BitbucketClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ManagedResource for EnvironmentResource<'_> {
    type Spec = EnvironmentSpec;
    type State = Scoped<Environment>;

    async fn create(&self, spec: &EnvironmentSpec) -> Result<Scoped<Environment>, ClientError> {
        let path = environments_path(self.client.workspace(), &spec.repository_id);
        let created: Environment = self
            .client
            .post(&path, &Environment::new(spec.name.clone(), spec.tier))
            .await?;
        info!(uuid = %created.uuid, name = %created.name, "Created environment");
        Ok(Scoped::new(spec.repository_id.clone(), created))
    }

    async fn read(&self, id: &str) -> Result<Option<Scoped<Environment>>, ClientError> {
        let (repository_id, uuid) = decode_id(id)?;
        let path = environment_path(self.client.workspace(), repository_id, uuid);
        let environment = found(self.client.get::<Environment>(&path).await)?;
        Ok(environment.map(|e| Scoped::new(repository_id, e)))
    }

    /// Renames the environment, then reads it back.
    ///
    /// The change endpoint does not return the entity. If the read-back
    /// answers 404 the environment is gone. That 404 is returned as the
    /// error rather than as an absent state, so callers that want to drop
    /// the entity should check [`ClientError::is_not_found`].
    async fn update(
        &self,
        id: &str,
        spec: &EnvironmentSpec,
    ) -> Result<Scoped<Environment>, ClientError> {
        let (repository_id, uuid) = decode_id(id)?;
        let workspace = self.client.workspace();

        let request = ApiRequest::post(environment_changes_path(workspace, repository_id, uuid))
            .json(&EnvironmentChanges::rename(spec.name.clone()))?;
        self.client.send_unit(request).await?;

        let environment: Environment = self
            .client
            .get(&environment_path(workspace, repository_id, uuid))
            .await?;
        Ok(Scoped::new(repository_id, environment))
    }

    async fn delete(&self, id: &str) -> Result<(), ClientError> {
        let (repository_id, uuid) = decode_id(id)?;
        self.client
            .delete(&environment_path(self.client.workspace(), repository_id, uuid))
            .await?;
        info!(id = %id, "Deleted environment");
        Ok(())
    }
}
