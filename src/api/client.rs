//
//  bitbucket-provision
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Client for the Bitbucket Cloud API
//!
//! This module provides [`BitbucketClient`], the session every resource
//! operation runs through, and [`ApiRequest`], the description of a single
//! logical API call.
//!
//! ## Features
//!
//! - One-time token bootstrap when the session is opened
//! - `Authorization: Bearer` injection on every request
//! - Multi-valued query parameters and headers
//! - Bounded retries on `429` and `5xx`, with an injectable delay
//! - Uniform classification of failures into [`RequestError`]
//!
//! ## Example
//!
//! ```rust,no_run
//! use bitbucket_provision::api::{ApiRequest, BitbucketClient};
//! use bitbucket_provision::config::ClientConfig;
//!
//! # async fn example() -> Result<(), bitbucket_provision::api::ClientError> {
//! let config = ClientConfig::new("acme").with_access_token("token");
//! let client = BitbucketClient::connect(&config).await?;
//!
//! let body = client
//!     .execute(ApiRequest::get("/repositories/acme/website").query("fields", "uuid"))
//!     .await?;
//! println!("{}", String::from_utf8_lossy(&body));
//! # Ok(())
//! # }
//! ```

use std::fmt;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

use super::common::{ClientError, RequestCause, RequestError};
use super::retry::{is_retryable, RetryPolicy};
use crate::config::ClientConfig;

/// Base URL of the Bitbucket Cloud REST API.
pub const API_BASE_URL: &str = "https://api.bitbucket.org/2.0";

/// Base URL of the Bitbucket Cloud internal REST API.
///
/// A few pipelines settings are only reachable here.
pub const INTERNAL_API_BASE_URL: &str = "https://api.bitbucket.org/internal";

/// Content type for JSON request bodies.
pub const APPLICATION_JSON: &str = "application/json";

/// Which API base a request is sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiSurface {
    /// The public `2.0` API.
    #[default]
    Public,

    /// The internal API.
    Internal,
}

/// A single logical API call.
///
/// Query parameters and headers are appended, so repeated keys produce
/// multiple values. An empty body means no body is sent.
///
/// # Example
///
/// ```rust
/// use bitbucket_provision::api::ApiRequest;
/// use reqwest::Method;
///
/// let request = ApiRequest::get("/repositories/acme")
///     .query("role", "admin")
///     .query("q", "is_private=true");
///
/// assert_eq!(request.method(), &Method::GET);
/// assert_eq!(request.path(), "/repositories/acme");
/// ```
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    surface: ApiSurface,
    query: Vec<(String, String)>,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl ApiRequest {
    /// Creates a request for `path` relative to the API base.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            surface: ApiSurface::Public,
            query: Vec::new(),
            headers: HeaderMap::new(),
            body: Vec::new(),
        }
    }

    /// Creates a `GET` request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Creates a `POST` request.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Creates a `PUT` request.
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// Creates a `DELETE` request.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Sends the request to the internal API base instead of the public one.
    pub fn internal(self) -> Self {
        self.surface(ApiSurface::Internal)
    }

    /// Selects the API base.
    pub fn surface(mut self, surface: ApiSurface) -> Self {
        self.surface = surface;
        self
    }

    /// Appends a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Appends a header value.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Appends every value of every header in `headers`.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        let mut current: Option<HeaderName> = None;
        for (name, value) in headers {
            if let Some(name) = name {
                current = Some(name);
            }
            if let Some(name) = &current {
                self.headers.append(name.clone(), value);
            }
        }
        self
    }

    /// Sets the raw request body.
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Serializes `body` as JSON and sets `Content-Type: application/json`,
    /// replacing any earlier content type.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ClientError> {
        let encoded = serde_json::to_vec(body).map_err(ClientError::Encode)?;
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
        Ok(self.body(encoded))
    }

    /// The HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The path relative to the API base.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The caller-supplied headers.
    pub fn header_map(&self) -> &HeaderMap {
        &self.headers
    }

    /// The API base this request targets.
    pub fn api_surface(&self) -> ApiSurface {
        self.surface
    }
}

/// An authenticated session against Bitbucket Cloud.
///
/// The bearer token is resolved once, when the session is opened, and never
/// changes afterwards. The session holds no other mutable state, so one
/// instance can serve any number of concurrent calls through `&self`.
///
/// # Creating a Session
///
/// ```rust,no_run
/// use bitbucket_provision::api::BitbucketClient;
/// use bitbucket_provision::config::ClientConfig;
///
/// # async fn example() -> Result<(), bitbucket_provision::api::ClientError> {
/// // Exchanges the consumer key and secret for a token before returning
/// let config = ClientConfig::new("acme").with_client_credentials("key", "secret");
/// let client = BitbucketClient::connect(&config).await?;
/// assert_eq!(client.workspace(), "acme");
/// # Ok(())
/// # }
/// ```
pub struct BitbucketClient {
    http: Client,
    workspace: String,
    api_url: String,
    internal_api_url: String,
    token: String,
    retry: RetryPolicy,
}

impl BitbucketClient {
    /// Opens a session using the retry policy described by `config`.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Config`] when the workspace is missing or no auth mode
    ///   is usable. No network call is made in that case.
    /// - [`ClientError::Request`] or [`ClientError::Decode`] when the
    ///   client-credentials exchange fails.
    pub async fn connect(config: &ClientConfig) -> Result<Self, ClientError> {
        Self::connect_with_retry(config, config.retry_policy()).await
    }

    /// Opens a session with an explicit retry policy.
    ///
    /// The retry settings in `config` are ignored in favor of `retry`.
    pub async fn connect_with_retry(
        config: &ClientConfig,
        retry: RetryPolicy,
    ) -> Result<Self, ClientError> {
        let credentials = config.validate()?;

        let http = Client::builder()
            .user_agent(format!("bbp/{}", crate::VERSION))
            .build()
            .map_err(RequestError::transport)?;

        let token = credentials.resolve(&http, &config.token_url).await?;

        Ok(Self {
            http,
            workspace: config.workspace.clone(),
            api_url: config.api_url.clone(),
            internal_api_url: config.internal_api_url.clone(),
            token,
            retry,
        })
    }

    /// The workspace this session manages.
    pub fn workspace(&self) -> &str {
        &self.workspace
    }

    /// The retry policy applied to every request.
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Returns the base URL for an API surface.
    pub fn base_url(&self, surface: ApiSurface) -> &str {
        match surface {
            ApiSurface::Public => &self.api_url,
            ApiSurface::Internal => &self.internal_api_url,
        }
    }

    /// Executes a request and returns the full response body.
    ///
    /// Responses with status 429 or 5xx are retried according to the
    /// session's [`RetryPolicy`]. Transport failures are not retried.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] for any status outside `200..300`, carrying
    /// the status and the response body text. Transport failures carry
    /// status 500.
    pub async fn execute(&self, request: ApiRequest) -> Result<Vec<u8>, RequestError> {
        let url = self.request_url(&request)?;
        let headers = self.request_headers(&request)?;

        let mut builder = self.http.request(request.method, url).headers(headers);
        if !request.body.is_empty() {
            builder = builder.body(request.body);
        }
        let prepared = builder.build().map_err(RequestError::transport)?;

        let mut failed_attempts: u32 = 0;
        loop {
            let attempt = prepared.try_clone().ok_or_else(|| {
                RequestError::internal("request body cannot be replayed for retries".to_string())
            })?;

            debug!(
                attempt = failed_attempts + 1,
                method = %prepared.method(),
                url = %prepared.url(),
                "Bitbucket API: sending request"
            );

            let response = self
                .http
                .execute(attempt)
                .await
                .map_err(RequestError::transport)?;
            let status = response.status();

            debug!(
                attempt = failed_attempts + 1,
                method = %prepared.method(),
                url = %prepared.url(),
                %status,
                "Bitbucket API: received response"
            );

            if is_retryable(status) {
                failed_attempts += 1;
                if !self.retry.exhausted(failed_attempts) {
                    warn!(
                        %status,
                        attempt = failed_attempts,
                        delay_secs = self.retry.retry_delay().as_secs(),
                        "Bitbucket API: retryable response, retrying"
                    );
                    // Drain so the connection goes back to the pool
                    let _ = response.bytes().await;
                    self.retry.wait().await;
                    continue;
                }
            }

            return read_response(response).await;
        }
    }

    /// Executes a request and decodes the JSON response body.
    pub async fn send<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ClientError> {
        let body = self.execute(request).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Executes a request and discards the response body.
    pub async fn send_unit(&self, request: ApiRequest) -> Result<(), ClientError> {
        self.execute(request).await?;
        Ok(())
    }

    /// Makes a `GET` request to the public API and decodes the JSON response.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.send(ApiRequest::get(path)).await
    }

    /// Makes a `POST` request with a JSON body and decodes the JSON response.
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        self.send(ApiRequest::post(path).json(body)?).await
    }

    /// Makes a `PUT` request with a JSON body and decodes the JSON response.
    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        self.send(ApiRequest::put(path).json(body)?).await
    }

    /// Makes a `DELETE` request. Any response body is ignored.
    pub async fn delete(&self, path: &str) -> Result<(), ClientError> {
        self.send_unit(ApiRequest::delete(path)).await
    }

    fn request_url(&self, request: &ApiRequest) -> Result<Url, RequestError> {
        let joined = join_path(self.base_url(request.surface), &request.path);
        let mut url = Url::parse(&joined).map_err(RequestError::internal)?;

        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(
                request
                    .query
                    .iter()
                    .map(|(key, value)| (key.as_str(), value.as_str())),
            );
        }

        Ok(url)
    }

    fn request_headers(&self, request: &ApiRequest) -> Result<HeaderMap, RequestError> {
        let mut headers = request.headers.clone();

        if !self.token.is_empty() {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", self.token))
                .map_err(|_| {
                    RequestError::internal("access token is not a valid header value".to_string())
                })?;
            value.set_sensitive(true);
            // Replaces any caller-supplied value
            headers.insert(AUTHORIZATION, value);
        }

        Ok(headers)
    }
}

impl fmt::Debug for BitbucketClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BitbucketClient")
            .field("workspace", &self.workspace)
            .field("api_url", &self.api_url)
            .field("internal_api_url", &self.internal_api_url)
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

/// Joins an API base and a path with exactly one `/` between them.
pub fn join_path(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

async fn read_response(response: Response) -> Result<Vec<u8>, RequestError> {
    let status = response.status();
    let body = response
        .bytes()
        .await
        .map_err(|err| RequestError::new(status, RequestCause::Transport(err)))?;

    if !status.is_success() {
        return Err(RequestError::response(
            status,
            String::from_utf8_lossy(&body).into_owned(),
        ));
    }

    Ok(body.to_vec())
}
