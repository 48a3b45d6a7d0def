//
//  bitbucket-provision
//  resources/dynamic_pipelines_provider.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use async_trait::async_trait;
use tracing::info;

use super::{found, ManagedResource, ResourceId, Scoped};
use crate::api::cloud::{dynamic_pipelines_provider_path, DynamicPipelinesProvider};
use crate::api::{ApiRequest, BitbucketClient, ClientError};

/// Desired dynamic pipelines provider of a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamicPipelinesProviderSpec {
    pub repository_id: String,

    /// Atlassian Resource Identifier of the provider app.
    pub app_ari: String,
}

impl ResourceId for Scoped<DynamicPipelinesProvider> {
    fn id(&self) -> String {
        self.repository_id.clone()
    }
}

/// Dynamic pipelines provider, identified by repository id.
///
/// Lives on the internal API. Deleting it clears the provider.
#[derive(Debug, Clone, Copy)]
pub struct DynamicPipelinesProviderResource<'a> {
    client: &'a BitbucketClient,
}

impl<'a> DynamicPipelinesProviderResource<'a> {
    pub fn new(client: &'a BitbucketClient) -> Self {
        Self { client }
    }

    fn get_request(&self, repository_id: &str) -> ApiRequest {
        ApiRequest::get(dynamic_pipelines_provider_path(
            self.client.workspace(),
            repository_id,
        ))
        .internal()
    }

    fn post_request(&self, repository_id: &str, app_ari: &str) -> Result<ApiRequest, ClientError> {
        let body = DynamicPipelinesProvider {
            app_ari: app_ari.to_string(),
        };
        ApiRequest::post(dynamic_pipelines_provider_path(
            self.client.workspace(),
            repository_id,
        ))
        .internal()
        .json(&body)
    }
}

#[async_trait]
impl ManagedResource for DynamicPipelinesProviderResource<'_> {
    type Spec = DynamicPipelinesProviderSpec;
    type State = Scoped<DynamicPipelinesProvider>;

    async fn create(
        &self,
        spec: &DynamicPipelinesProviderSpec,
    ) -> Result<Scoped<DynamicPipelinesProvider>, ClientError> {
        self.update(&spec.repository_id, spec).await
    }

    async fn read(
        &self,
        id: &str,
    ) -> Result<Option<Scoped<DynamicPipelinesProvider>>, ClientError> {
        let provider = found(
            self.client
                .send::<DynamicPipelinesProvider>(self.get_request(id))
                .await,
        )?;
        Ok(provider.map(|p| Scoped::new(id, p)))
    }

    async fn update(
        &self,
        id: &str,
        spec: &DynamicPipelinesProviderSpec,
    ) -> Result<Scoped<DynamicPipelinesProvider>, ClientError> {
        let request = self.post_request(id, &spec.app_ari)?;
        let provider: DynamicPipelinesProvider = self.client.send(request).await?;
        info!(repository = %id, "Set dynamic pipelines provider");
        Ok(Scoped::new(id, provider))
    }

    async fn delete(&self, id: &str) -> Result<(), ClientError> {
        let request = self.post_request(id, "")?;
        self.client.send_unit(request).await?;
        info!(repository = %id, "Cleared dynamic pipelines provider");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::client;
    use mockito::Matcher;

    const PATH: &str = "/internal/repositories/ws/r-1/pipelines-config/dynamic-pipelines-provider";

    fn spec() -> DynamicPipelinesProviderSpec {
        DynamicPipelinesProviderSpec {
            repository_id: "r-1".to_string(),
            app_ari: "ari:cloud:ecosystem::app/abc".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_posts_app_ari_to_internal_api() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", PATH)
            .match_body(Matcher::Json(
                serde_json::json!({"appAri": "ari:cloud:ecosystem::app/abc"}),
            ))
            .with_status(200)
            .with_body(r#"{"appAri": "ari:cloud:ecosystem::app/abc"}"#)
            .expect(1)
            .create_async()
            .await;

        let (client, _) = client(&server.url(), 3).await;
        let state = DynamicPipelinesProviderResource::new(&client)
            .create(&spec())
            .await
            .unwrap();

        assert_eq!(state.id(), "r-1");
        assert_eq!(state.value.app_ari, "ari:cloud:ecosystem::app/abc");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_delete_clears_app_ari() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", PATH)
            .match_body(Matcher::Json(serde_json::json!({"appAri": ""})))
            .with_status(200)
            .with_body(r#"{"appAri": ""}"#)
            .expect(1)
            .create_async()
            .await;

        let (client, _) = client(&server.url(), 3).await;
        DynamicPipelinesProviderResource::new(&client)
            .delete("r-1")
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_read_missing_is_none() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", PATH)
            .with_status(404)
            .create_async()
            .await;

        let (client, _) = client(&server.url(), 3).await;
        let state = DynamicPipelinesProviderResource::new(&client)
            .read("r-1")
            .await
            .unwrap();

        assert!(state.is_none());
    }
}
