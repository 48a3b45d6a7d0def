//
//  bitbucket-provision
//  api/cloud/environments.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Cloud deployment environment API types.
//!
//! # Overview
//!
//! Every repository with pipelines enabled has deployment environments,
//! each in one of three tiers:
//!
//! ```text
//! Test -> Staging -> Production
//! ```
//!
//! The tier cannot change after creation. Renames go through the
//! `.../changes` endpoint, which answers without the updated entity.

use serde::{Deserialize, Serialize};

/// Deployment tier of an environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeploymentTier {
    Test,
    Staging,
    Production,
}

/// The `environment_type` object of an environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentType {
    pub name: DeploymentTier,
}

/// Access restrictions of an environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentRestrictions {
    /// Only workspace admins may deploy.
    #[serde(default)]
    pub admin_only: bool,
}

/// A deployment environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    /// Unique identifier, assigned by Bitbucket.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub uuid: String,

    pub name: String,

    pub environment_type: EnvironmentType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restrictions: Option<EnvironmentRestrictions>,
}

impl Environment {
    /// A new environment request.
    pub fn new(name: impl Into<String>, tier: DeploymentTier) -> Self {
        Self {
            uuid: String::new(),
            name: name.into(),
            environment_type: EnvironmentType { name: tier },
            restrictions: Some(EnvironmentRestrictions::default()),
        }
    }

    /// The deployment tier.
    pub fn tier(&self) -> DeploymentTier {
        self.environment_type.name
    }
}

/// Body of a `POST .../environments/{uuid}/changes` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvironmentChanges {
    pub change: EnvironmentChange,
}

/// The fields to change. Restrictions are always sent with their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvironmentChange {
    pub name: String,
    pub restrictions: EnvironmentRestrictions,
}

impl EnvironmentChanges {
    /// A rename.
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            change: EnvironmentChange {
                name: name.into(),
                restrictions: EnvironmentRestrictions::default(),
            },
        }
    }
}

/// Path of the environments collection of a repository.
pub fn environments_path(workspace: &str, repository: &str) -> String {
    format!("/repositories/{}/{}/environments", workspace, repository)
}

/// Path of a single environment.
pub fn environment_path(workspace: &str, repository: &str, uuid: &str) -> String {
    format!("{}/{}", environments_path(workspace, repository), uuid)
}

/// Path of the change endpoint of an environment.
pub fn environment_changes_path(workspace: &str, repository: &str, uuid: &str) -> String {
    format!("{}/changes", environment_path(workspace, repository, uuid))
}
