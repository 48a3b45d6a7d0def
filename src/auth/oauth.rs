//
//  bitbucket-provision
//  auth/oauth.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # OAuth 2.0 Client Credentials
//!
//! Bitbucket Cloud OAuth consumers marked "private" can trade their key and
//! secret for an access token without any user interaction:
//!
//! ```text
//! POST https://bitbucket.org/site/oauth2/access_token
//! Content-Type: application/x-www-form-urlencoded
//!
//! grant_type=client_credentials&client_id=<key>&client_secret=<secret>
//! ```
//!
//! The exchange happens once, when a session is opened. It is never retried.
//! If it fails, the session cannot be created.

use std::fmt;

use reqwest::Client;
use serde::Deserialize;
use tracing::info;

use crate::api::common::{ClientError, RequestCause, RequestError};

/// Bitbucket Cloud OAuth token endpoint.
pub const TOKEN_URL: &str = "https://bitbucket.org/site/oauth2/access_token";

/// The part of the token endpoint response this crate uses.
///
/// Other fields (`refresh_token`, `expires_in`, `scopes`) are ignored.
#[derive(Deserialize)]
pub struct OAuthToken {
    /// The bearer token for API authentication.
    pub access_token: String,
}

impl fmt::Debug for OAuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthToken")
            .field("access_token", &"<redacted>")
            .finish()
    }
}

/// Exchanges a client id and secret for an access token.
///
/// # Errors
///
/// - [`ClientError::Request`] with the response status and raw body text
///   when the endpoint answers outside 2xx
/// - [`ClientError::Request`] with status 500 when the endpoint cannot be
///   reached
/// - [`ClientError::Decode`] when a success body has no `access_token`
///
/// # Example
///
/// ```rust,no_run
/// use bitbucket_provision::auth::{exchange_client_credentials, TOKEN_URL};
///
/// # async fn example() -> Result<(), bitbucket_provision::api::ClientError> {
/// let http = reqwest::Client::new();
/// let token = exchange_client_credentials(&http, TOKEN_URL, "key", "secret").await?;
/// # let _ = token;
/// # Ok(())
/// # }
/// ```
pub async fn exchange_client_credentials(
    http: &Client,
    token_url: &str,
    client_id: &str,
    client_secret: &str,
) -> Result<OAuthToken, ClientError> {
    info!("Bitbucket API: obtaining access token via client credentials");

    let params = [
        ("grant_type", "client_credentials"),
        ("client_id", client_id),
        ("client_secret", client_secret),
    ];

    let response = http
        .post(token_url)
        .form(&params)
        .send()
        .await
        .map_err(RequestError::transport)?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|err| RequestError::new(status, RequestCause::Transport(err)))?;

    if !status.is_success() {
        return Err(RequestError::response(status, body).into());
    }

    let token: OAuthToken = serde_json::from_str(&body)?;
    info!("Bitbucket API: received access token");
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use reqwest::StatusCode;

    fn token_url(server: &mockito::Server) -> String {
        format!("{}/site/oauth2/access_token", server.url())
    }

    #[tokio::test]
    async fn test_exchange_posts_form_and_decodes_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/site/oauth2/access_token")
            .match_header("content-type", "application/x-www-form-urlencoded")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("grant_type".into(), "client_credentials".into()),
                Matcher::UrlEncoded("client_id".into(), "key".into()),
                Matcher::UrlEncoded("client_secret".into(), "secret".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"access_token": "issued", "token_type": "bearer", "expires_in": 7200}"#)
            .expect(1)
            .create_async()
            .await;

        let token = exchange_client_credentials(&Client::new(), &token_url(&server), "key", "secret")
            .await
            .unwrap();

        assert_eq!(token.access_token, "issued");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_rejected_credentials_surface_status_and_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/site/oauth2/access_token")
            .with_status(400)
            .with_body("invalid_client")
            .create_async()
            .await;

        let err = exchange_client_credentials(&Client::new(), &token_url(&server), "key", "bad")
            .await
            .unwrap_err();

        match err {
            ClientError::Request(err) => {
                assert_eq!(err.status(), StatusCode::BAD_REQUEST);
                assert_eq!(err.cause().to_string(), "invalid_client");
            }
            other => panic!("expected request error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_token_body_is_decode_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/site/oauth2/access_token")
            .with_status(200)
            .with_body(r#"{"token_type": "bearer"}"#)
            .create_async()
            .await;

        let err = exchange_client_credentials(&Client::new(), &token_url(&server), "key", "secret")
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_internal_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let url = format!("http://{}/site/oauth2/access_token", addr);
        let err = exchange_client_credentials(&Client::new(), &url, "key", "secret")
            .await
            .unwrap_err();

        match err {
            ClientError::Request(err) => {
                assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
                assert!(matches!(err.cause(), RequestCause::Transport(_)));
            }
            other => panic!("expected request error, got {other:?}"),
        }
    }
}
