//
//  bitbucket-provision
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! Every API call is authenticated with a bearer token. That token comes
//! from one of two places:
//!
//! - **Access token**: supplied directly and used as-is, with no network call.
//! - **Client credentials**: an OAuth consumer key and secret, exchanged once
//!   for an access token at the OAuth2 token endpoint (see
//!   [`exchange_client_credentials`]).
//!
//! ## Example
//!
//! ```rust,no_run
//! use bitbucket_provision::auth::{Credentials, TOKEN_URL};
//!
//! # async fn example() -> Result<(), bitbucket_provision::api::ClientError> {
//! let http = reqwest::Client::new();
//! let credentials = Credentials::ClientCredentials {
//!     client_id: "key".to_string(),
//!     client_secret: "secret".to_string(),
//! };
//! let token = credentials.resolve(&http, TOKEN_URL).await?;
//! # let _ = token;
//! # Ok(())
//! # }
//! ```

mod oauth;

pub use oauth::*;

use std::fmt;

use reqwest::Client;

use crate::api::common::ClientError;

/// The authentication mode resolved from a
/// [`ClientConfig`](crate::config::ClientConfig).
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// A bearer token supplied by the caller.
    AccessToken(String),

    /// An OAuth consumer key and secret, exchanged for a token at session start.
    ClientCredentials {
        /// The OAuth consumer key.
        client_id: String,
        /// The OAuth consumer secret.
        client_secret: String,
    },
}

impl Credentials {
    /// Produces the bearer token for these credentials.
    ///
    /// An access token is returned unchanged without touching the network.
    /// Client credentials cost exactly one request to `token_url`.
    pub async fn resolve(&self, http: &Client, token_url: &str) -> Result<String, ClientError> {
        match self {
            Self::AccessToken(token) => Ok(token.clone()),
            Self::ClientCredentials {
                client_id,
                client_secret,
            } => {
                let token =
                    exchange_client_credentials(http, token_url, client_id, client_secret).await?;
                Ok(token.access_token)
            }
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AccessToken(_) => f.debug_tuple("AccessToken").field(&"<redacted>").finish(),
            Self::ClientCredentials { client_id, .. } => f
                .debug_struct("ClientCredentials")
                .field("client_id", client_id)
                .field("client_secret", &"<redacted>")
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_access_token_resolves_without_network() {
        // Nothing listens on this address; any request would fail.
        let credentials = Credentials::AccessToken("static".to_string());
        let token = credentials
            .resolve(&Client::new(), "http://127.0.0.1:9/token")
            .await
            .unwrap();
        assert_eq!(token, "static");
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let credentials = Credentials::ClientCredentials {
            client_id: "key".to_string(),
            client_secret: "hunter2".to_string(),
        };
        let debug = format!("{:?}", credentials);
        assert!(debug.contains("key"));
        assert!(!debug.contains("hunter2"));

        let debug = format!("{:?}", Credentials::AccessToken("hunter2".to_string()));
        assert!(!debug.contains("hunter2"));
    }
}
