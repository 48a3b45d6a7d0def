//
//  bitbucket-provision
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Bitbucket Provisioning Library
//!
//! A client library for managing Bitbucket Cloud resources through the REST
//! API, plus the `bbp` command-line driver built on it.
//!
//! ## Overview
//!
//! A session ([`BitbucketClient`]) is opened once from a [`ClientConfig`]. It
//! resolves a bearer token up front, either a static access token or an
//! OAuth2 client-credentials exchange, and then executes requests with
//! bounded retries on `429` and `5xx` responses.
//!
//! ## Module Structure
//!
//! - [`api`]: The session, the request executor, retry policy, and models
//! - [`auth`]: Credential resolution and the OAuth2 token exchange
//! - [`config`]: Layered configuration (defaults, file, environment, flags)
//! - [`resources`]: Create/read/update/delete clients per resource kind
//! - [`cli`]: Command-line interface definitions using clap
//! - [`util`]: Slug and composite id helpers
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use bitbucket_provision::{BitbucketClient, ClientConfig};
//! use bitbucket_provision::resources::{ManagedResource, WebhookResource, WebhookSpec};
//!
//! # async fn example() -> Result<(), bitbucket_provision::api::ClientError> {
//! let config = ClientConfig::new("acme").with_client_credentials("key", "secret");
//! let client = BitbucketClient::connect(&config).await?;
//!
//! let spec = WebhookSpec::new("{repo-uuid}", "https://ci.example.com/hook", ["repo:push"]);
//! let hook = WebhookResource::new(&client).create(&spec).await?;
//! println!("{}", hook.value.uuid);
//! # Ok(())
//! # }
//! ```

/// Command-line interface definitions.
pub mod cli;

/// HTTP session and models for the Bitbucket Cloud API.
///
/// The session handles authentication, URL building, retries, and error
/// classification.
pub mod api;

/// Authentication: static tokens and the OAuth2 client-credentials grant.
pub mod auth;

/// Configuration file and environment handling.
///
/// Configuration is stored in platform-specific locations:
/// - Linux: `~/.config/bbp/config.toml`
/// - macOS: `~/Library/Application Support/bbp/config.toml`
/// - Windows: `%APPDATA%\bbp\config.toml`
pub mod config;

/// Managed resource clients.
pub mod resources;

/// Utility functions and helpers.
pub mod util;

pub use api::BitbucketClient;
pub use cli::Cli;
pub use config::ClientConfig;

/// Application name constant.
///
/// The name of the CLI binary, used for display purposes and configuration paths.
pub const APP_NAME: &str = "bbp";

/// Application version constant.
///
/// The current version, derived from Cargo.toml at compile time. Also sent
/// in the `User-Agent` header.
///
/// # Example
///
/// ```rust
/// use bitbucket_provision::VERSION;
///
/// println!("bbp version {}", VERSION);
/// ```
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the CLI.
///
/// Standardized exit codes following Unix conventions, allowing scripts
/// to programmatically detect the outcome of CLI operations.
///
/// # Exit Code Ranges
///
/// - `0`: Success
/// - `1-3`: General errors and usage issues
/// - `4-7`: Authentication-related issues
/// - `8-15`: Resource-related issues
/// - `32+`: External service issues
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;

    /// General error.
    ///
    /// An unspecified error occurred during execution.
    /// Check stderr for details.
    pub const ERROR: i32 = 1;

    /// Invalid usage, arguments, or configuration.
    ///
    /// Also used when no authentication mode is configured or an id is
    /// malformed.
    pub const USAGE: i32 = 2;

    /// Authentication failed.
    ///
    /// The API answered 401 or 403.
    pub const AUTH_ERROR: i32 = 4;

    /// Resource not found.
    ///
    /// The requested resource does not exist or the credentials cannot see it.
    pub const NOT_FOUND: i32 = 8;

    /// API rate limit exceeded.
    ///
    /// Bitbucket kept answering 429 after every retry.
    pub const RATE_LIMIT: i32 = 32;
}
