//
//  bitbucket-provision
//  cli/get.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Read one managed resource and print it as JSON.
//!
//! ```bash
//! bbp get repository '{repo-uuid}'
//! bbp get webhook '{repo-uuid}:{hook-uuid}'
//! bbp get pipelines-config '{repo-uuid}'
//! ```

use anyhow::Result;
use clap::{Args, ValueEnum};
use serde::Serialize;

use crate::resources::{
    DynamicPipelinesProviderResource, EnvironmentResource, ManagedResource,
    PipelinesConfigResource, RepositoryResource, RestrictionResource, WebhookResource,
};

use super::{GlobalOptions, NotFound};

/// The resource kinds `bbp get` can read.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResourceKind {
    Repository,
    Restriction,
    Webhook,
    Environment,
    PipelinesConfig,
    DynamicPipelinesProvider,
}

impl ResourceKind {
    fn label(self) -> &'static str {
        match self {
            Self::Repository => "repository",
            Self::Restriction => "branch restriction",
            Self::Webhook => "webhook",
            Self::Environment => "environment",
            Self::PipelinesConfig => "pipelines config",
            Self::DynamicPipelinesProvider => "dynamic pipelines provider",
        }
    }
}

/// Read a managed resource by id
#[derive(Args, Debug)]
pub struct GetCommand {
    /// Resource kind
    #[arg(value_enum)]
    pub kind: ResourceKind,

    /// Resource id (composite ids are <repository_id>:<id>)
    pub id: String,
}

impl GetCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.connect().await?;

        let json = match self.kind {
            ResourceKind::Repository => read(RepositoryResource::new(&client), &self.id).await?,
            ResourceKind::Restriction => read(RestrictionResource::new(&client), &self.id).await?,
            ResourceKind::Webhook => read(WebhookResource::new(&client), &self.id).await?,
            ResourceKind::Environment => read(EnvironmentResource::new(&client), &self.id).await?,
            ResourceKind::PipelinesConfig => {
                read(PipelinesConfigResource::new(&client), &self.id).await?
            }
            ResourceKind::DynamicPipelinesProvider => {
                read(DynamicPipelinesProviderResource::new(&client), &self.id).await?
            }
        };

        match json {
            Some(json) => {
                println!("{}", json);
                Ok(())
            }
            None => Err(NotFound(format!("{} '{}'", self.kind.label(), self.id)).into()),
        }
    }
}

async fn read<R>(resource: R, id: &str) -> Result<Option<String>>
where
    R: ManagedResource,
    R::State: Serialize,
{
    match resource.read(id).await? {
        Some(state) => Ok(Some(serde_json::to_string_pretty(&state)?)),
        None => Ok(None),
    }
}
