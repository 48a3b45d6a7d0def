//
//  bitbucket-provision
//  api/cloud/webhooks.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Cloud webhook API types.
//!
//! A webhook posts repository events (e.g., `repo:push`,
//! `pullrequest:created`) to an external URL.

use serde::{Deserialize, Serialize};

/// A repository webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Webhook {
    /// Unique identifier, assigned by Bitbucket.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub uuid: String,

    /// Target URL for event deliveries.
    #[serde(default)]
    pub url: String,

    /// Free-form title shown in the repository settings.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// Subscribed event keys.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<String>,

    /// Whether deliveries are enabled.
    #[serde(default = "default_active")]
    pub active: bool,
}

impl Default for Webhook {
    fn default() -> Self {
        Self {
            uuid: String::new(),
            url: String::new(),
            description: String::new(),
            events: Vec::new(),
            active: true,
        }
    }
}

fn default_active() -> bool {
    true
}

/// Path of the webhooks collection of a repository.
pub fn webhooks_path(workspace: &str, repository: &str) -> String {
    format!("/repositories/{}/{}/hooks", workspace, repository)
}

/// Path of a single webhook.
pub fn webhook_path(workspace: &str, repository: &str, uuid: &str) -> String {
    format!("{}/{}", webhooks_path(workspace, repository), uuid)
}
