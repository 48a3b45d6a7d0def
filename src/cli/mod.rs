//
//  bitbucket-provision
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod api;
mod get;
mod project;

pub use api::ApiCommand;
pub use get::{GetCommand, ResourceKind};
pub use project::ProjectCommand;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::api::BitbucketClient;
use crate::config::ClientConfig;

#[derive(Parser, Debug)]
#[command(
    name = "bbp",
    version,
    about = "Provision Bitbucket Cloud resources from the command line",
    long_about = "bbp reads and manages Bitbucket Cloud repositories, branch restrictions,\n\
                  webhooks, deployment environments, and pipelines settings.",
    propagate_version = true,
    after_help = "Use 'bbp <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Options shared by every command.
///
/// Each flag overrides the configuration file. The `BB_*` variables are read
/// here as well as by [`ClientConfig::apply_env`], so the precedence is:
/// flag or environment, then file, then default.
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Configuration file (defaults to the per-user config.toml)
    #[arg(long, global = true, env = "BB_CONFIG")]
    pub config: Option<PathBuf>,

    /// Workspace slug
    #[arg(long, short = 'w', global = true, env = "BB_WORKSPACE")]
    pub workspace: Option<String>,

    /// Static access token
    #[arg(long, global = true, env = "BB_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// OAuth consumer key
    #[arg(long, global = true, env = "BB_CLIENT_ID")]
    pub client_id: Option<String>,

    /// OAuth consumer secret
    #[arg(long, global = true, env = "BB_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: Option<String>,

    /// Attempt budget for 429 and 5xx responses
    #[arg(long, global = true, env = "BB_NUM_RETRIES")]
    pub num_retries: Option<u32>,

    /// Seconds to wait between attempts
    #[arg(long, global = true, env = "BB_RETRY_DELAY")]
    pub retry_delay: Option<u64>,
}

impl GlobalOptions {
    /// Resolves the layered configuration and applies these options on top.
    pub fn client_config(&self) -> Result<ClientConfig> {
        let mut config = ClientConfig::resolve(self.config.as_deref())
            .context("Failed to load configuration")?;

        if let Some(workspace) = &self.workspace {
            config.workspace = workspace.clone();
        }
        if let Some(token) = &self.access_token {
            config.access_token = Some(token.clone());
        }
        if let Some(client_id) = &self.client_id {
            config.client_id = Some(client_id.clone());
        }
        if let Some(client_secret) = &self.client_secret {
            config.client_secret = Some(client_secret.clone());
        }
        if let Some(num_retries) = self.num_retries {
            config.num_retries = num_retries;
        }
        if let Some(retry_delay) = self.retry_delay {
            config.retry_delay = retry_delay;
        }

        Ok(config)
    }

    /// Opens an authenticated session.
    pub async fn connect(&self) -> Result<BitbucketClient> {
        let config = self.client_config()?;
        Ok(BitbucketClient::connect(&config).await?)
    }
}

/// A lookup that found nothing.
#[derive(Error, Debug)]
#[error("{0} not found")]
pub struct NotFound(pub String);

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send a raw request to the API
    Api(ApiCommand),

    /// Read a managed resource by id
    Get(GetCommand),

    /// Look up a project
    #[command(visible_alias = "proj")]
    Project(ProjectCommand),

    /// Print the version
    Version,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "workspace = \"from-file\"\nnum_retries = 1\n").unwrap();

        let global = GlobalOptions {
            config: Some(path),
            workspace: Some("from-flag".to_string()),
            retry_delay: Some(2),
            ..Default::default()
        };
        let config = global.client_config().unwrap();

        assert_eq!(config.workspace, "from-flag");
        assert_eq!(config.retry_delay, 2);
    }
}
