//
//  bitbucket-provision
//  main.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::Parser;
use reqwest::StatusCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use bitbucket_provision::api::{ClientError, RequestError};
use bitbucket_provision::cli::{Cli, Commands, NotFound};
use bitbucket_provision::exit_codes;

#[tokio::main]
async fn main() {
    // Initialize logging
    init_logging();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Execute command
    let result = run(cli).await;

    // Handle result and exit
    match result {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_code(&e));
        }
    }
}

/// Initialize logging based on environment
fn init_logging() {
    let filter = EnvFilter::try_from_env("BB_DEBUG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Maps a failure to the process exit code
fn exit_code(err: &anyhow::Error) -> i32 {
    if err.downcast_ref::<NotFound>().is_some() {
        return exit_codes::NOT_FOUND;
    }

    let request = match err.downcast_ref::<ClientError>() {
        Some(ClientError::Config(_)) => return exit_codes::USAGE,
        Some(ClientError::Request(request)) => Some(request),
        Some(_) => None,
        None => err.downcast_ref::<RequestError>(),
    };

    match request.map(RequestError::status) {
        Some(StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) => exit_codes::AUTH_ERROR,
        Some(StatusCode::NOT_FOUND) => exit_codes::NOT_FOUND,
        Some(StatusCode::TOO_MANY_REQUESTS) => exit_codes::RATE_LIMIT,
        _ => exit_codes::ERROR,
    }
}

/// Main command dispatcher
async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Api(cmd) => cmd.run(&cli.global).await,
        Commands::Get(cmd) => cmd.run(&cli.global).await,
        Commands::Project(cmd) => cmd.run(&cli.global).await,
        Commands::Version => {
            println!("bbp version {}", bitbucket_provision::VERSION);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(err: impl Into<anyhow::Error>) -> i32 {
        exit_code(&err.into())
    }

    #[test]
    fn test_exit_codes_for_request_errors() {
        for (status, expected) in [
            (StatusCode::UNAUTHORIZED, exit_codes::AUTH_ERROR),
            (StatusCode::FORBIDDEN, exit_codes::AUTH_ERROR),
            (StatusCode::NOT_FOUND, exit_codes::NOT_FOUND),
            (StatusCode::TOO_MANY_REQUESTS, exit_codes::RATE_LIMIT),
            (StatusCode::BAD_GATEWAY, exit_codes::ERROR),
        ] {
            assert_eq!(code(RequestError::response(status, "")), expected);
            assert_eq!(
                code(ClientError::from(RequestError::response(status, ""))),
                expected
            );
        }
    }

    #[test]
    fn test_exit_codes_for_other_errors() {
        assert_eq!(code(ClientError::Config("no auth".into())), exit_codes::USAGE);
        assert_eq!(code(NotFound("webhook 'x'".into())), exit_codes::NOT_FOUND);
        assert_eq!(code(anyhow::anyhow!("boom")), exit_codes::ERROR);
    }
}
