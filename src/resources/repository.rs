//
//  bitbucket-provision
//  resources/repository.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use async_trait::async_trait;
use tracing::{debug, info};

use super::{found, ManagedResource, ResourceId};
use crate::api::cloud::{repository_path, ProjectRef, Repository};
use crate::api::{ApiRequest, BitbucketClient, ClientError};
use crate::util::repository_slug;

/// Desired state of a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositorySpec {
    pub name: String,

    /// UUID of the owning project.
    pub project_uuid: String,

    pub is_private: bool,

    /// Adopt a repository that already has this name instead of failing.
    pub use_existing: bool,
}

impl RepositorySpec {
    /// A private repository in the given project.
    pub fn new(name: impl Into<String>, project_uuid: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            project_uuid: project_uuid.into(),
            is_private: true,
            use_existing: false,
        }
    }

    pub fn private(mut self, is_private: bool) -> Self {
        self.is_private = is_private;
        self
    }

    pub fn use_existing(mut self, use_existing: bool) -> Self {
        self.use_existing = use_existing;
        self
    }

    /// The slug Bitbucket derives from the name.
    pub fn slug(&self) -> String {
        repository_slug(&self.name)
    }

    fn body(&self) -> Repository {
        Repository {
            name: self.name.clone(),
            project: Some(ProjectRef::by_uuid(self.project_uuid.clone())),
            is_private: self.is_private,
            ..Default::default()
        }
    }
}

impl ResourceId for Repository {
    fn id(&self) -> String {
        self.uuid.clone()
    }
}

/// Repositories in the session's workspace.
#[derive(Debug, Clone, Copy)]
pub struct RepositoryResource<'a> {
    client: &'a BitbucketClient,
}

impl<'a> RepositoryResource<'a> {
    pub fn new(client: &'a BitbucketClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ManagedResource for RepositoryResource<'_> {
    type Spec = RepositorySpec;
    type State = Repository;

    async fn create(&self, spec: &RepositorySpec) -> Result<Repository, ClientError> {
        let path = repository_path(self.client.workspace(), &spec.slug());

        if spec.use_existing {
            if let Some(existing) = found(self.client.get::<Repository>(&path).await)? {
                debug!(uuid = %existing.uuid, slug = %spec.slug(), "Adopting existing repository");
                return Ok(existing);
            }
        }

        let created: Repository = self
            .client
            .send(ApiRequest::post(path).json(&spec.body())?)
            .await?;
        info!(uuid = %created.uuid, name = %created.name, "Created repository");
        Ok(created)
    }

    async fn read(&self, id: &str) -> Result<Option<Repository>, ClientError> {
        found(
            self.client
                .get(&repository_path(self.client.workspace(), id))
                .await,
        )
    }

    async fn update(&self, id: &str, spec: &RepositorySpec) -> Result<Repository, ClientError> {
        self.client
            .put(&repository_path(self.client.workspace(), id), &spec.body())
            .await
    }

    async fn delete(&self, id: &str) -> Result<(), ClientError> {
        self.client
            .delete(&repository_path(self.client.workspace(), id))
            .await?;
        info!(uuid = %id, "Deleted repository");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::client;
    use mockito::Matcher;

    const REPO: &str = r#"{"uuid": "{r-1}", "name": "My Repo", "slug": "my-repo",
        "is_private": true, "project": {"uuid": "{p-1}", "key": "PRJ"}}"#;

    #[tokio::test]
    async fn test_create_posts_to_slug_path() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/2.0/repositories/ws/my-repo")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(serde_json::json!({
                "name": "My Repo",
                "project": {"uuid": "{p-1}"},
                "is_private": true
            })))
            .with_status(200)
            .with_body(REPO)
            .expect(1)
            .create_async()
            .await;

        let (client, _) = client(&server.url(), 3).await;
        let repo = RepositoryResource::new(&client)
            .create(&RepositorySpec::new("My Repo", "{p-1}"))
            .await
            .unwrap();

        assert_eq!(repo.id(), "{r-1}");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_use_existing_adopts_without_post() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/2.0/repositories/ws/my-repo")
            .with_status(200)
            .with_body(REPO)
            .create_async()
            .await;
        let post = server
            .mock("POST", "/2.0/repositories/ws/my-repo")
            .expect(0)
            .create_async()
            .await;

        let (client, _) = client(&server.url(), 3).await;
        let spec = RepositorySpec::new("My Repo", "{p-1}").use_existing(true);
        let repo = RepositoryResource::new(&client).create(&spec).await.unwrap();

        assert_eq!(repo.uuid, "{r-1}");
        post.assert_async().await;
    }

    #[tokio::test]
    async fn test_use_existing_falls_through_on_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/2.0/repositories/ws/my-repo")
            .with_status(404)
            .create_async()
            .await;
        let post = server
            .mock("POST", "/2.0/repositories/ws/my-repo")
            .with_status(201)
            .with_body(REPO)
            .expect(1)
            .create_async()
            .await;

        let (client, _) = client(&server.url(), 3).await;
        let spec = RepositorySpec::new("My Repo", "{p-1}").use_existing(true);
        RepositoryResource::new(&client).create(&spec).await.unwrap();

        post.assert_async().await;
    }

    #[tokio::test]
    async fn test_use_existing_surfaces_other_errors() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/2.0/repositories/ws/my-repo")
            .with_status(403)
            .with_body("forbidden")
            .create_async()
            .await;
        let post = server
            .mock("POST", "/2.0/repositories/ws/my-repo")
            .expect(0)
            .create_async()
            .await;

        let (client, _) = client(&server.url(), 3).await;
        let spec = RepositorySpec::new("My Repo", "{p-1}").use_existing(true);
        let err = RepositoryResource::new(&client).create(&spec).await.unwrap_err();

        assert_eq!(err.status().map(|s| s.as_u16()), Some(403));
        post.assert_async().await;
    }

    #[tokio::test]
    async fn test_read_missing_is_none() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/2.0/repositories/ws/r-1")
            .with_status(404)
            .create_async()
            .await;

        let (client, _) = client(&server.url(), 3).await;
        let repo = RepositoryResource::new(&client).read("r-1").await.unwrap();
        assert!(repo.is_none());
    }

    #[tokio::test]
    async fn test_update_and_delete_address_uuid() {
        let mut server = mockito::Server::new_async().await;
        let put = server
            .mock("PUT", "/2.0/repositories/ws/r-1")
            .match_body(Matcher::PartialJson(serde_json::json!({"is_private": false})))
            .with_status(200)
            .with_body(REPO)
            .create_async()
            .await;
        let delete = server
            .mock("DELETE", "/2.0/repositories/ws/r-1")
            .with_status(204)
            .create_async()
            .await;

        let (client, _) = client(&server.url(), 3).await;
        let resource = RepositoryResource::new(&client);
        let spec = RepositorySpec::new("My Repo", "{p-1}").private(false);
        resource.update("r-1", &spec).await.unwrap();
        resource.delete("r-1").await.unwrap();

        put.assert_async().await;
        delete.assert_async().await;
    }
}
