//
//  bitbucket-provision
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! This module holds the settings needed to open a session against
//! Bitbucket Cloud: the workspace, one authentication mode, and the retry
//! policy.
//!
//! ## Sources
//!
//! Settings are layered, later sources overriding earlier ones:
//!
//! 1. Built-in defaults (3 retries, 30 second delay, production endpoints)
//! 2. The TOML configuration file
//! 3. `BB_*` environment variables
//! 4. Explicit overrides from the caller (command-line flags)
//!
//! ## Configuration File Location
//!
//! - **Linux**: `~/.config/bbp/config.toml`
//! - **macOS**: `~/Library/Application Support/bbp/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\bbp\config.toml`
//!
//! ## Example Configuration File
//!
//! ```toml
//! workspace = "acme"
//! client_id = "abc123"
//! client_secret = "s3cr3t"
//! num_retries = 5
//! retry_delay = 10
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Setting |
//! |----------|---------|
//! | `BB_WORKSPACE` | `workspace` |
//! | `BB_ACCESS_TOKEN` | `access_token` |
//! | `BB_CLIENT_ID` | `client_id` |
//! | `BB_CLIENT_SECRET` | `client_secret` |
//! | `BB_NUM_RETRIES` | `num_retries` |
//! | `BB_RETRY_DELAY` | `retry_delay` |
//!
//! ## Submodules
//!
//! - [`file`]: Low-level configuration file I/O operations

mod file;

pub use file::*;

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::api::client::{API_BASE_URL, INTERNAL_API_BASE_URL};
use crate::api::common::ClientError;
use crate::api::retry::{RetryPolicy, DEFAULT_NUM_RETRIES, DEFAULT_RETRY_DELAY_SECS};
use crate::auth::{Credentials, TOKEN_URL};

/// Settings for a Bitbucket Cloud session.
///
/// Exactly one authentication mode must be usable: a static access token,
/// or a complete client-id/client-secret pair. When both are present the
/// static token wins. Empty strings are treated as absent.
///
/// # Examples
///
/// ```rust
/// use bitbucket_provision::config::ClientConfig;
///
/// let config = ClientConfig::new("acme").with_access_token("token");
/// assert_eq!(config.num_retries, 3);
/// assert_eq!(config.retry_delay, 30);
/// assert!(config.credentials().is_ok());
/// ```
///
/// ```rust
/// use bitbucket_provision::config::ClientConfig;
///
/// // Neither mode configured
/// let config = ClientConfig::new("acme");
/// assert!(config.credentials().is_err());
/// ```
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Workspace slug that owns the managed repositories and projects.
    pub workspace: String,

    /// Static bearer token. Takes precedence over client credentials.
    pub access_token: Option<String>,

    /// OAuth consumer key for the client-credentials exchange.
    pub client_id: Option<String>,

    /// OAuth consumer secret for the client-credentials exchange.
    pub client_secret: Option<String>,

    /// Attempt budget for retryable responses (429 and 5xx).
    pub num_retries: u32,

    /// Delay between attempts, in seconds.
    pub retry_delay: u64,

    /// Base URL of the public REST API.
    pub api_url: String,

    /// Base URL of the internal REST API.
    pub internal_api_url: String,

    /// OAuth2 token endpoint.
    pub token_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            workspace: String::new(),
            access_token: None,
            client_id: None,
            client_secret: None,
            num_retries: DEFAULT_NUM_RETRIES,
            retry_delay: DEFAULT_RETRY_DELAY_SECS,
            api_url: API_BASE_URL.to_string(),
            internal_api_url: INTERNAL_API_BASE_URL.to_string(),
            token_url: TOKEN_URL.to_string(),
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("workspace", &self.workspace)
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "<redacted>"))
            .field("num_retries", &self.num_retries)
            .field("retry_delay", &self.retry_delay)
            .field("api_url", &self.api_url)
            .field("internal_api_url", &self.internal_api_url)
            .field("token_url", &self.token_url)
            .finish()
    }
}

impl ClientConfig {
    /// Creates a configuration for `workspace` with default settings.
    pub fn new(workspace: impl Into<String>) -> Self {
        Self {
            workspace: workspace.into(),
            ..Default::default()
        }
    }

    /// Sets a static access token.
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Sets the client-id/client-secret pair.
    pub fn with_client_credentials(
        mut self,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        self.client_id = Some(client_id.into());
        self.client_secret = Some(client_secret.into());
        self
    }

    /// Sets the retry budget and the delay between attempts in seconds.
    pub fn with_retries(mut self, num_retries: u32, retry_delay: u64) -> Self {
        self.num_retries = num_retries;
        self.retry_delay = retry_delay;
        self
    }

    /// Resolves the authentication mode.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] when no static token is set and the
    /// client-id/client-secret pair is incomplete.
    pub fn credentials(&self) -> Result<Credentials, ClientError> {
        if let Some(token) = non_empty(&self.access_token) {
            return Ok(Credentials::AccessToken(token.to_string()));
        }

        match (non_empty(&self.client_id), non_empty(&self.client_secret)) {
            (Some(client_id), Some(client_secret)) => Ok(Credentials::ClientCredentials {
                client_id: client_id.to_string(),
                client_secret: client_secret.to_string(),
            }),
            (Some(_), None) => Err(ClientError::Config(
                "client_secret is required when client_id is set".to_string(),
            )),
            (None, Some(_)) => Err(ClientError::Config(
                "client_id is required when client_secret is set".to_string(),
            )),
            (None, None) => Err(ClientError::Config(
                "You must specify either client_id/client_secret for Client Credentials Authentication or access_token".to_string(),
            )),
        }
    }

    /// Checks the workspace and resolves the authentication mode.
    pub fn validate(&self) -> Result<Credentials, ClientError> {
        if self.workspace.trim().is_empty() {
            return Err(ClientError::Config("workspace is required".to_string()));
        }
        self.credentials()
    }

    /// Builds the retry policy described by this configuration.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.num_retries, Duration::from_secs(self.retry_delay))
    }

    /// Returns the default configuration file path.
    ///
    /// `None` when no home directory can be determined.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", crate::APP_NAME).map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Loads a configuration file.
    ///
    /// Keys missing from the file keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = read_config_file(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Loads the file at `path`, or at the default location when `path` is
    /// `None`, then applies the `BB_*` environment variables.
    ///
    /// A missing default file is not an error. A missing explicit file is.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => match Self::default_path() {
                Some(path) if config_exists(&path) => Self::load(&path)?,
                _ => Self::default(),
            },
        };
        config.apply_env()?;
        Ok(config)
    }

    /// Applies the `BB_*` environment variables.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_with(|name| std::env::var(name).ok())
    }

    /// Applies variables from `lookup`, using the same names as [`apply_env`](Self::apply_env).
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(workspace) = lookup("BB_WORKSPACE") {
            self.workspace = workspace;
        }
        if let Some(token) = lookup("BB_ACCESS_TOKEN") {
            self.access_token = Some(token);
        }
        if let Some(client_id) = lookup("BB_CLIENT_ID") {
            self.client_id = Some(client_id);
        }
        if let Some(client_secret) = lookup("BB_CLIENT_SECRET") {
            self.client_secret = Some(client_secret);
        }
        if let Some(value) = lookup("BB_NUM_RETRIES") {
            self.num_retries = value
                .trim()
                .parse()
                .with_context(|| format!("Invalid BB_NUM_RETRIES: {}", value))?;
        }
        if let Some(value) = lookup("BB_RETRY_DELAY") {
            self.retry_delay = value
                .trim()
                .parse()
                .with_context(|| format!("Invalid BB_RETRY_DELAY: {}", value))?;
        }
        Ok(())
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
