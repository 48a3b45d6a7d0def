//
//  bitbucket-provision
//  api/cloud/repositories.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Cloud repository API types.
//!
//! # Overview
//!
//! Repositories belong to a workspace and to a project within that
//! workspace. They are addressed by slug when created and by UUID after
//! that.
//!
//! # Example
//!
//! ```rust
//! use bitbucket_provision::api::cloud::repositories::{repository_path, ProjectRef, Repository};
//!
//! let request = Repository {
//!     name: "Backend Service".to_string(),
//!     project: Some(ProjectRef::by_uuid("{p-1}")),
//!     is_private: true,
//!     ..Default::default()
//! };
//! assert_eq!(
//!     repository_path("acme", "backend-service"),
//!     "/repositories/acme/backend-service"
//! );
//! # let _ = request;
//! ```
//!
//! # Notes
//!
//! - The `full_name` field follows the format `{workspace}/{repo_slug}`
//! - Only `name`, `project`, and `is_private` are sent on create and update

use serde::{Deserialize, Serialize};

/// A Bitbucket Cloud repository.
///
/// The same type is used as the create/update body and as the response, so
/// read-only fields are skipped when serializing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    /// Unique identifier (e.g., `{123e4567-e89b-...}`).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub uuid: String,

    /// The project this repository belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<ProjectRef>,

    /// Human-readable name.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Whether the repository is private.
    #[serde(default)]
    pub is_private: bool,

    /// URL-safe identifier derived from the name.
    #[serde(default, skip_serializing)]
    pub slug: String,

    /// Full path in format `{workspace_slug}/{repo_slug}`.
    #[serde(default, skip_serializing)]
    pub full_name: String,
}

/// A reference to a project, by UUID or by key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRef {
    /// Project UUID.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub uuid: String,

    /// Project key (e.g., `PROJ`).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub key: String,
}

impl ProjectRef {
    /// A reference by project UUID.
    pub fn by_uuid(uuid: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            key: String::new(),
        }
    }
}

/// Path of a repository, addressed by slug or UUID.
pub fn repository_path(workspace: &str, repository: &str) -> String {
    format!("/repositories/{}/{}", workspace, repository)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_skips_read_only_fields() {
        let repo = Repository {
            uuid: "{r-1}".to_string(),
            name: "site".to_string(),
            slug: "site".to_string(),
            full_name: "acme/site".to_string(),
            project: Some(ProjectRef::by_uuid("{p-1}")),
            is_private: false,
        };

        let json = serde_json::to_value(&repo).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "uuid": "{r-1}",
                "name": "site",
                "project": {"uuid": "{p-1}"},
                "is_private": false
            })
        );
    }

    #[test]
    fn test_deserialize_api_response() {
        let json = r#"{
            "type": "repository",
            "uuid": "{r-1}",
            "name": "Site",
            "slug": "site",
            "full_name": "acme/site",
            "is_private": true,
            "project": {"type": "project", "uuid": "{p-1}", "key": "WEB", "name": "Web"}
        }"#;

        let repo: Repository = serde_json::from_str(json).unwrap();
        assert_eq!(repo.uuid, "{r-1}");
        assert!(repo.is_private);
        assert_eq!(repo.project.unwrap().key, "WEB");
    }
}
