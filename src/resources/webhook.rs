//
//  bitbucket-provision
//  resources/webhook.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use std::collections::BTreeSet;

use async_trait::async_trait;
use tracing::{debug, info};

use super::{first_page, found, ManagedResource, ResourceId, Scoped};
use crate::api::cloud::{webhook_path, webhooks_path, Webhook};
use crate::api::{BitbucketClient, ClientError};
use crate::util::{decode_id, encode_id};

/// Desired state of a repository webhook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookSpec {
    pub repository_id: String,

    /// Delivery URL. Also the key used to adopt an existing webhook.
    pub url: String,

    /// Shown as the webhook's description in Bitbucket.
    pub title: String,

    pub events: BTreeSet<String>,

    pub is_active: bool,

    pub use_existing: bool,
}

impl WebhookSpec {
    /// An active webhook with no title.
    pub fn new(
        repository_id: impl Into<String>,
        url: impl Into<String>,
        events: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            repository_id: repository_id.into(),
            url: url.into(),
            title: String::new(),
            events: events.into_iter().map(Into::into).collect(),
            is_active: true,
            use_existing: false,
        }
    }

    fn body(&self) -> Webhook {
        Webhook {
            uuid: String::new(),
            url: self.url.clone(),
            description: self.title.clone(),
            events: self.events.iter().cloned().collect(),
            active: self.is_active,
        }
    }
}

impl ResourceId for Scoped<Webhook> {
    fn id(&self) -> String {
        encode_id(&self.repository_id, &self.value.uuid)
    }
}

/// Webhooks of repositories in the session's workspace.
#[derive(Debug, Clone, Copy)]
pub struct WebhookResource<'a> {
    client: &'a BitbucketClient,
}

impl<'a> WebhookResource<'a> {
    pub fn new(client: &'a BitbucketClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ManagedResource for WebhookResource<'_> {
    type Spec = WebhookSpec;
    type State = Scoped<Webhook>;

    async fn create(&self, spec: &WebhookSpec) -> Result<Scoped<Webhook>, ClientError> {
        let path = webhooks_path(self.client.workspace(), &spec.repository_id);

        if spec.use_existing {
            let existing: Vec<Webhook> = first_page(self.client, &path).await?;
            if let Some(hook) = existing.into_iter().find(|hook| hook.url == spec.url) {
                debug!(uuid = %hook.uuid, url = %hook.url, "Adopting existing webhook");
                return Ok(Scoped::new(spec.repository_id.clone(), hook));
            }
        }

        let created: Webhook = self.client.post(&path, &spec.body()).await?;
        info!(uuid = %created.uuid, url = %created.url, "Created webhook");
        Ok(Scoped::new(spec.repository_id.clone(), created))
    }

    async fn read(&self, id: &str) -> Result<Option<Scoped<Webhook>>, ClientError> {
        let (repository_id, uuid) = decode_id(id)?;
        let path = webhook_path(self.client.workspace(), repository_id, uuid);
        let hook = found(self.client.get::<Webhook>(&path).await)?;
        Ok(hook.map(|h| Scoped::new(repository_id, h)))
    }

    async fn update(&self, id: &str, spec: &WebhookSpec) -> Result<Scoped<Webhook>, ClientError> {
        let (repository_id, uuid) = decode_id(id)?;
        let path = webhook_path(self.client.workspace(), repository_id, uuid);
        let updated: Webhook = self.client.put(&path, &spec.body()).await?;
        Ok(Scoped::new(repository_id, updated))
    }

    async fn delete(&self, id: &str) -> Result<(), ClientError> {
        let (repository_id, uuid) = decode_id(id)?;
        self.client
            .delete(&webhook_path(self.client.workspace(), repository_id, uuid))
            .await?;
        info!(id = %id, "Deleted webhook");
        Ok(())
    }
}
