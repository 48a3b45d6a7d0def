//
//  bitbucket-provision
//  resources/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Managed Resources
//!
//! Create/read/update/delete clients for the Bitbucket Cloud resources this
//! crate provisions. Each client borrows a [`BitbucketClient`] session and
//! implements [`ManagedResource`].
//!
//! ## Identifiers
//!
//! | Resource | Id |
//! |----------|----|
//! | Repository | repository UUID |
//! | Branch restriction | `<repository_id>:<restriction id>` |
//! | Webhook | `<repository_id>:<webhook uuid>` |
//! | Environment | `<repository_id>:<environment uuid>` |
//! | Pipelines config | repository id |
//! | Dynamic pipelines provider | repository id |
//!
//! ## Reading
//!
//! [`ManagedResource::read`] maps a 404 to `Ok(None)`. Any other failure is
//! an error.
//!
//! ## Example
//!
//! ```rust,no_run
//! use bitbucket_provision::api::BitbucketClient;
//! use bitbucket_provision::config::ClientConfig;
//! use bitbucket_provision::resources::{ManagedResource, RepositoryResource, RepositorySpec, ResourceId};
//!
//! # async fn example() -> Result<(), bitbucket_provision::api::ClientError> {
//! let client = BitbucketClient::connect(&ClientConfig::new("acme").with_access_token("t")).await?;
//! let repositories = RepositoryResource::new(&client);
//!
//! let spec = RepositorySpec::new("Website", "{project-uuid}").use_existing(true);
//! let repo = repositories.create(&spec).await?;
//! println!("managed repository {}", repo.id());
//! # Ok(())
//! # }
//! ```

mod dynamic_pipelines_provider;
mod environment;
mod pipelines_config;
mod project;
mod repository;
mod restriction;
mod webhook;

pub use dynamic_pipelines_provider::*;
pub use environment::*;
pub use pipelines_config::*;
pub use project::*;
pub use repository::*;
pub use restriction::*;
pub use webhook::*;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::api::common::{ClientError, PaginatedResponse};
use crate::api::BitbucketClient;

/// Anything with a stable identifier.
pub trait ResourceId {
    /// The identifier used to read, update, and delete the resource.
    fn id(&self) -> String;
}

/// Lifecycle operations of a provisioned resource.
#[async_trait]
pub trait ManagedResource: Send + Sync {
    /// Desired configuration.
    type Spec: Send + Sync;

    /// Observed state as returned by Bitbucket.
    type State: ResourceId + Send;

    /// Creates the resource, or adopts an existing one when the spec allows it.
    async fn create(&self, spec: &Self::Spec) -> Result<Self::State, ClientError>;

    /// Reads the resource. `None` when it does not exist.
    async fn read(&self, id: &str) -> Result<Option<Self::State>, ClientError>;

    /// Applies `spec` to an existing resource.
    async fn update(&self, id: &str, spec: &Self::Spec) -> Result<Self::State, ClientError>;

    /// Deletes the resource.
    async fn delete(&self, id: &str) -> Result<(), ClientError>;
}

/// A resource that lives inside a repository, paired with that repository's id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scoped<T> {
    /// Identifier of the owning repository.
    pub repository_id: String,

    #[serde(flatten)]
    pub value: T,
}

impl<T> Scoped<T> {
    pub fn new(repository_id: impl Into<String>, value: T) -> Self {
        Self {
            repository_id: repository_id.into(),
            value,
        }
    }
}

/// Maps a 404 to `Ok(None)`.
pub(crate) fn found<T>(result: Result<T, ClientError>) -> Result<Option<T>, ClientError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is_not_found() => Ok(None),
        Err(err) => Err(err),
    }
}

/// Fetches the first page of a collection.
///
/// Logs a warning when Bitbucket reports further pages, since those are not
/// searched.
// TODO: follow `next` links so adoption also finds entries past the first page
pub(crate) async fn first_page<T: DeserializeOwned>(
    client: &BitbucketClient,
    path: &str,
) -> Result<Vec<T>, ClientError> {
    let page: PaginatedResponse<T> = client.get(path).await?;
    if let Some(next) = page.next_url() {
        warn!(
            path = %path,
            next = %next,
            "Bitbucket API: more results exist beyond the first page and were not searched"
        );
    }
    Ok(page.values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::common::RequestError;
    use reqwest::StatusCode;

    #[test]
    fn test_found_maps_not_found_to_none() {
        let missing: Result<(), ClientError> =
            Err(RequestError::response(StatusCode::NOT_FOUND, "").into());
        assert!(found(missing).unwrap().is_none());

        let failed: Result<(), ClientError> =
            Err(RequestError::response(StatusCode::FORBIDDEN, "").into());
        assert!(found(failed).is_err());

        assert_eq!(found(Ok(5)).unwrap(), Some(5));
    }

    #[test]
    fn test_scoped_serializes_flat() {
        let scoped = Scoped::new("{r}", serde_json::json!({"uuid": "{h}"}));
        let json = serde_json::to_value(&scoped).unwrap();
        assert_eq!(json, serde_json::json!({"repository_id": "{r}", "uuid": "{h}"}));
    }
}
