//
//  bitbucket-provision
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! This module provides the HTTP session used to talk to Bitbucket Cloud.
//!
//! ## Architecture
//!
//! - [`client`]: The authenticated session and the request executor
//! - [`retry`]: Retry budget and the injectable delay between attempts
//! - [`cloud`]: Typed request/response models for each managed resource
//! - [`common`]: Shared error types and the pagination envelope
//!
//! ## Error Handling
//!
//! Every network or API failure is a [`RequestError`]: the HTTP status plus
//! the cause. Callers branch on the status, most often on
//! [`RequestError::is_not_found`] to tell an absent resource from a failure:
//!
//! - `404`: the resource does not exist
//! - `429` / `5xx`: retried by the executor before surfacing
//! - `500` with a transport cause: the server was never reached

/// Core HTTP session for the Bitbucket Cloud API.
pub mod client;

/// Bitbucket Cloud request and response models.
pub mod cloud;

/// Error types and pagination shared across the API layer.
pub mod common;

/// Retry policy for transient failures.
pub mod retry;

pub use client::{ApiRequest, ApiSurface, BitbucketClient};
pub use common::{ClientError, RequestCause, RequestError};
pub use retry::{RetryDelay, RetryPolicy};
