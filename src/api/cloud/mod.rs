//
//  bitbucket-provision
//  api/cloud/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Bitbucket Cloud API v2.0 models.
//!
//! This module provides the request and response bodies for every resource
//! the crate manages, together with the path helpers that address them.
//!
//! # Module Organization
//!
//! - [`repositories`] - Repositories and their project reference
//! - [`projects`] - Workspace projects
//! - [`restrictions`] - Branch restrictions (merge checks)
//! - [`webhooks`] - Repository webhooks
//! - [`environments`] - Deployment environments
//! - [`pipelines`] - Pipelines enablement and the dynamic pipelines provider
//!
//! # Notes
//!
//! - UUIDs are returned with curly braces (e.g., `{123e4567-e89b-...}`) and
//!   are accepted anywhere a slug is
//! - Path helpers return paths relative to the API base

pub mod environments;
pub mod pipelines;
pub mod projects;
pub mod repositories;
pub mod restrictions;
pub mod webhooks;

pub use environments::*;
pub use pipelines::*;
pub use projects::*;
pub use repositories::*;
pub use restrictions::*;
pub use webhooks::*;
