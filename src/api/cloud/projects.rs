//
//  bitbucket-provision
//  api/cloud/projects.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Cloud project API types.
//!
//! Projects group repositories inside a workspace and are addressed by
//! their key.

use serde::{Deserialize, Serialize};

/// A workspace project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Unique identifier (e.g., `{123e4567-e89b-...}`).
    #[serde(default)]
    pub uuid: String,

    /// Short project key (e.g., `PROJ`).
    #[serde(default)]
    pub key: String,

    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Path of a project in `workspace`, addressed by key.
pub fn project_path(workspace: &str, key: &str) -> String {
    format!("/workspaces/{}/projects/{}", workspace, key)
}
