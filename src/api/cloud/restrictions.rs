//
//  bitbucket-provision
//  api/cloud/restrictions.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Cloud branch restriction API types.
//!
//! # Overview
//!
//! A branch restriction applies one rule (its `kind`) to a set of branches.
//! Branches are selected either through the branching model (by branch type)
//! or by a glob pattern.
//!
//! Only the merge-check kinds that take a numeric value are managed:
//!
//! * `require_approvals_to_merge`
//! * `require_default_reviewer_approvals_to_merge`
//! * `require_passing_builds_to_merge`
//! * `require_commits_behind`
//!
//! # Example
//!
//! ```rust
//! use bitbucket_provision::api::cloud::restrictions::{BranchMatchKind, Restriction};
//!
//! let restriction = Restriction {
//!     kind: "require_approvals_to_merge".to_string(),
//!     branch_match_kind: Some(BranchMatchKind::Glob),
//!     pattern: Some("release/*".to_string()),
//!     value: Some(2),
//!     ..Default::default()
//! };
//! assert!(restriction.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::api::common::ClientError;

/// Restriction kinds this crate manages.
pub const SUPPORTED_KINDS: [&str; 4] = [
    "require_approvals_to_merge",
    "require_default_reviewer_approvals_to_merge",
    "require_passing_builds_to_merge",
    "require_commits_behind",
];

/// How a restriction selects branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BranchMatchKind {
    /// Match by branch type from the branching model.
    BranchingModel,
    /// Match by glob pattern.
    Glob,
}

/// Branch types defined by the branching model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BranchType {
    Feature,
    Bugfix,
    Release,
    Hotfix,
    Development,
    Production,
}

/// A branch restriction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Restriction {
    /// Numeric identifier, assigned by Bitbucket.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// Restriction kind (e.g., `require_approvals_to_merge`).
    #[serde(default)]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_match_kind: Option<BranchMatchKind>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_type: Option<BranchType>,

    /// Glob pattern. Bitbucket returns an empty string for branching-model
    /// restrictions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    /// Numeric setting of the rule (e.g., the number of approvals).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<u32>,
}

impl Restriction {
    /// Checks that the restriction is complete for its kind and match kind.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] naming the first missing or invalid field.
    pub fn validate(&self) -> Result<(), ClientError> {
        if !SUPPORTED_KINDS.contains(&self.kind.as_str()) {
            return Err(ClientError::Config(format!(
                "kind must be one of: {:?}, got '{}'",
                SUPPORTED_KINDS, self.kind
            )));
        }

        match self.branch_match_kind {
            Some(BranchMatchKind::BranchingModel) if self.branch_type.is_none() => {
                return Err(ClientError::Config(
                    "branch_type must be set when branch_match_kind is branching_model".to_string(),
                ));
            }
            Some(BranchMatchKind::Glob) if self.pattern().is_none() => {
                return Err(ClientError::Config(
                    "pattern must be set when branch_match_kind is glob".to_string(),
                ));
            }
            None => {
                return Err(ClientError::Config(
                    "branch_match_kind must be set".to_string(),
                ));
            }
            _ => {}
        }

        if self.value.is_none() {
            return Err(ClientError::Config(format!(
                "value must be set when kind is one of: {:?}",
                SUPPORTED_KINDS
            )));
        }

        Ok(())
    }

    /// The glob pattern, with an empty pattern treated as absent.
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref().filter(|p| !p.is_empty())
    }

    /// Whether `other` restricts the same branches with the same kind.
    ///
    /// Compares kind, match kind, branch type, and pattern. The value and id
    /// are ignored.
    pub fn same_target(&self, other: &Restriction) -> bool {
        self.kind == other.kind
            && self.branch_match_kind == other.branch_match_kind
            && self.branch_type == other.branch_type
            && self.pattern() == other.pattern()
    }
}

/// Path of the branch restrictions collection of a repository.
pub fn restrictions_path(workspace: &str, repository: &str) -> String {
    format!("/repositories/{}/{}/branch-restrictions", workspace, repository)
}

/// Path of a single branch restriction.
pub fn restriction_path(workspace: &str, repository: &str, id: &str) -> String {
    format!("{}/{}", restrictions_path(workspace, repository), id)
}
