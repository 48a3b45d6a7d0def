//
//  bitbucket-provision
//  api/cloud/pipelines.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Cloud pipelines settings API types.
//!
//! # Overview
//!
//! Two repository-level settings control Bitbucket Pipelines:
//!
//! * `pipelines_config` - whether Pipelines runs at all (public API)
//! * `dynamic-pipelines-provider` - the Forge app that generates pipeline
//!   definitions at run time (internal API)
//!
//! Neither can be deleted. Disabling Pipelines or clearing the provider
//! stands in for deletion.

use serde::{Deserialize, Serialize};

/// Pipelines enablement of a repository.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelinesConfig {
    /// Whether Pipelines is enabled.
    #[serde(default)]
    pub enabled: bool,
}

/// The dynamic pipelines provider of a repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamicPipelinesProvider {
    /// Atlassian Resource Identifier of the provider app. Empty when no
    /// provider is set.
    #[serde(rename = "appAri", default)]
    pub app_ari: String,
}

/// Path of the pipelines configuration of a repository.
pub fn pipelines_config_path(workspace: &str, repository: &str) -> String {
    format!("/repositories/{}/{}/pipelines_config", workspace, repository)
}

/// Path of the dynamic pipelines provider of a repository, on the internal API.
pub fn dynamic_pipelines_provider_path(workspace: &str, repository: &str) -> String {
    format!(
        "/repositories/{}/{}/pipelines-config/dynamic-pipelines-provider",
        workspace, repository
    )
}
