//
//  bitbucket-provision
//  resources/restriction.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use async_trait::async_trait;
use tracing::{debug, info};

use super::{first_page, found, ManagedResource, ResourceId, Scoped};
use crate::api::cloud::{restriction_path, restrictions_path, Restriction};
use crate::api::{BitbucketClient, ClientError};
use crate::util::{decode_id, encode_id};

/// Desired state of a branch restriction.
#[derive(Debug, Clone, PartialEq)]
pub struct RestrictionSpec {
    /// Repository the restriction applies to.
    pub repository_id: String,

    pub restriction: Restriction,

    /// Adopt a restriction with the same kind and branch selection.
    pub use_existing: bool,
}

impl ResourceId for Scoped<Restriction> {
    fn id(&self) -> String {
        let child = self.value.id.map(|id| id.to_string()).unwrap_or_default();
        encode_id(&self.repository_id, &child)
    }
}

/// Branch restrictions of repositories in the session's workspace.
#[derive(Debug, Clone, Copy)]
pub struct RestrictionResource<'a> {
    client: &'a BitbucketClient,
}

impl<'a> RestrictionResource<'a> {
    pub fn new(client: &'a BitbucketClient) -> Self {
        Self { client }
    }

    async fn find_existing(&self, spec: &RestrictionSpec) -> Result<Option<Restriction>, ClientError> {
        let path = restrictions_path(self.client.workspace(), &spec.repository_id);
        let existing: Vec<Restriction> = first_page(self.client, &path).await?;
        Ok(existing
            .into_iter()
            .find(|candidate| spec.restriction.same_target(candidate)))
    }
}

#[async_trait]
impl ManagedResource for RestrictionResource<'_> {
    type Spec = RestrictionSpec;
    type State = Scoped<Restriction>;

    async fn create(&self, spec: &RestrictionSpec) -> Result<Scoped<Restriction>, ClientError> {
        spec.restriction.validate()?;

        if spec.use_existing {
            if let Some(existing) = self.find_existing(spec).await? {
                debug!(id = ?existing.id, kind = %existing.kind, "Adopting existing branch restriction");
                return Ok(Scoped::new(spec.repository_id.clone(), existing));
            }
        }

        let path = restrictions_path(self.client.workspace(), &spec.repository_id);
        let created: Restriction = self.client.post(&path, &spec.restriction).await?;
        info!(id = ?created.id, kind = %created.kind, "Created branch restriction");
        Ok(Scoped::new(spec.repository_id.clone(), created))
    }

    async fn read(&self, id: &str) -> Result<Option<Scoped<Restriction>>, ClientError> {
        let (repository_id, restriction_id) = decode_id(id)?;
        let path = restriction_path(self.client.workspace(), repository_id, restriction_id);
        let restriction = found(self.client.get::<Restriction>(&path).await)?;
        Ok(restriction.map(|r| Scoped::new(repository_id, r)))
    }

    async fn update(
        &self,
        id: &str,
        spec: &RestrictionSpec,
    ) -> Result<Scoped<Restriction>, ClientError> {
        spec.restriction.validate()?;
        let (repository_id, restriction_id) = decode_id(id)?;
        let path = restriction_path(self.client.workspace(), repository_id, restriction_id);
        let updated: Restriction = self.client.put(&path, &spec.restriction).await?;
        Ok(Scoped::new(repository_id, updated))
    }

    async fn delete(&self, id: &str) -> Result<(), ClientError> {
        let (repository_id, restriction_id) = decode_id(id)?;
        let path = restriction_path(self.client.workspace(), repository_id, restriction_id);
        self.client.delete(&path).await?;
        info!(id = %id, "Deleted branch restriction");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::cloud::{BranchMatchKind, BranchType};
    use crate::api::test_support::client;
    use mockito::Matcher;

    fn spec(use_existing: bool) -> RestrictionSpec {
        RestrictionSpec {
            repository_id: "r-1".to_string(),
            restriction: Restriction {
                kind: "require_approvals_to_merge".to_string(),
                branch_match_kind: Some(BranchMatchKind::BranchingModel),
                branch_type: Some(BranchType::Production),
                value: Some(2),
                ..Default::default()
            },
            use_existing,
        }
    }

    #[tokio::test]
    async fn test_create_returns_composite_id() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/2.0/repositories/ws/r-1/branch-restrictions")
            .match_body(Matcher::Json(serde_json::json!({
                "kind": "require_approvals_to_merge",
                "branch_match_kind": "branching_model",
                "branch_type": "production",
                "value": 2
            })))
            .with_status(201)
            .with_body(
                r#"{"id": 42, "kind": "require_approvals_to_merge",
                    "branch_match_kind": "branching_model", "branch_type": "production",
                    "pattern": "", "value": 2}"#,
            )
            .expect(1)
            .create_async()
            .await;

        let (client, _) = client(&server.url(), 3).await;
        let state = RestrictionResource::new(&client)
            .create(&spec(false))
            .await
            .unwrap();

        assert_eq!(state.id(), "r-1:42");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_invalid_spec_makes_no_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let mut invalid = spec(false);
        invalid.restriction.value = None;

        let (client, _) = client(&server.url(), 3).await;
        let err = RestrictionResource::new(&client)
            .create(&invalid)
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::Config(_)));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_use_existing_matches_first_page() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/2.0/repositories/ws/r-1/branch-restrictions")
            .with_status(200)
            .with_body(
                r#"{"values": [
                    {"id": 1, "kind": "require_approvals_to_merge", "branch_match_kind": "glob", "pattern": "main", "value": 1},
                    {"id": 2, "kind": "require_approvals_to_merge", "branch_match_kind": "branching_model", "branch_type": "production", "pattern": "", "value": 1}
                ], "next": "https://api.bitbucket.org/2.0/next-page"}"#,
            )
            .create_async()
            .await;
        let post = server
            .mock("POST", "/2.0/repositories/ws/r-1/branch-restrictions")
            .expect(0)
            .create_async()
            .await;

        let (client, _) = client(&server.url(), 3).await;
        let state = RestrictionResource::new(&client)
            .create(&spec(true))
            .await
            .unwrap();

        assert_eq!(state.id(), "r-1:2");
        assert_eq!(state.value.value, Some(1));
        post.assert_async().await;
    }

    #[tokio::test]
    async fn test_read_decodes_id() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/2.0/repositories/ws/r-1/branch-restrictions/9")
            .with_status(404)
            .create_async()
            .await;

        let (client, _) = client(&server.url(), 3).await;
        let resource = RestrictionResource::new(&client);

        assert!(resource.read("r-1:9").await.unwrap().is_none());
        assert!(matches!(
            resource.read("missing-separator").await,
            Err(ClientError::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let mut server = mockito::Server::new_async().await;
        let put = server
            .mock("PUT", "/2.0/repositories/ws/r-1/branch-restrictions/42")
            .with_status(200)
            .with_body(r#"{"id": 42, "kind": "require_approvals_to_merge", "value": 2}"#)
            .create_async()
            .await;
        let delete = server
            .mock("DELETE", "/2.0/repositories/ws/r-1/branch-restrictions/42")
            .with_status(204)
            .create_async()
            .await;

        let (client, _) = client(&server.url(), 3).await;
        let resource = RestrictionResource::new(&client);
        let state = resource.update("r-1:42", &spec(false)).await.unwrap();
        resource.delete("r-1:42").await.unwrap();

        assert_eq!(state.id(), "r-1:42");
        put.assert_async().await;
        delete.assert_async().await;
    }
}
