//
//  bitbucket-provision
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types for the Bitbucket Cloud client
//!
//! This module provides the error types shared by the request executor, the
//! credential bootstrap, and every resource client, plus the pagination
//! envelope used by list endpoints.
//!
//! # Overview
//!
//! - [`RequestError`] - An HTTP status code plus the underlying cause. This is
//!   the only error produced by network and API failures.
//! - [`ClientError`] - The crate-level error: configuration problems, request
//!   failures, and JSON encode/decode failures.
//! - Pagination types (re-exported from the [`pagination`] submodule)
//!
//! # Example
//!
//! ```rust
//! use bitbucket_provision::api::common::{ClientError, RequestError};
//! use reqwest::StatusCode;
//!
//! fn classify(result: Result<Vec<u8>, ClientError>) -> &'static str {
//!     match result {
//!         Ok(_) => "present",
//!         Err(ClientError::Request(e)) if e.status() == StatusCode::NOT_FOUND => "absent",
//!         Err(_) => "failed",
//!     }
//! }
//!
//! let err = RequestError::response(StatusCode::NOT_FOUND, "gone");
//! assert_eq!(classify(Err(err.into())), "absent");
//! ```

use reqwest::StatusCode;
use thiserror::Error;

mod pagination;

pub use pagination::*;

/// The underlying reason a request failed.
///
/// API failures carry the response body as opaque text. No structure is
/// assumed, so an empty body or a non-JSON body is kept exactly as received.
#[derive(Error, Debug)]
pub enum RequestCause {
    /// The server answered with a failing status. Holds the raw body text.
    #[error("{0}")]
    Response(String),

    /// The connection could not be made or the body could not be read.
    ///
    /// Covers DNS, connect, TLS, and read failures.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// The request URL could not be built from the base and path.
    #[error("invalid request URL: {0}")]
    Url(#[from] url::ParseError),

    /// The request could not be prepared for sending, e.g. a body that
    /// cannot be replayed for a retry.
    #[error("{0}")]
    Internal(String),
}

/// An HTTP status code and the cause of a failed request.
///
/// Failures that never produced a response (transport errors, invalid URLs)
/// use `500 Internal Server Error` as their status marker.
///
/// # Example
///
/// ```rust
/// use bitbucket_provision::api::common::RequestError;
/// use reqwest::StatusCode;
///
/// let err = RequestError::response(StatusCode::BAD_REQUEST, "invalid_client");
/// assert_eq!(err.status(), StatusCode::BAD_REQUEST);
/// assert_eq!(err.cause().to_string(), "invalid_client");
/// ```
#[derive(Error, Debug)]
#[error("request failed with status {status}: {cause}")]
pub struct RequestError {
    status: StatusCode,
    cause: RequestCause,
}

impl RequestError {
    /// Creates an error from a status code and a cause.
    pub fn new(status: StatusCode, cause: RequestCause) -> Self {
        Self { status, cause }
    }

    /// Creates an error from a failing response and its body text.
    pub fn response(status: StatusCode, body: impl Into<String>) -> Self {
        Self::new(status, RequestCause::Response(body.into()))
    }

    /// Wraps a transport failure with the internal-error status marker.
    pub fn transport(err: reqwest::Error) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, RequestCause::Transport(err))
    }

    /// Wraps a local failure with the internal-error status marker.
    pub fn internal(cause: impl Into<RequestCause>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, cause.into())
    }

    /// The HTTP status code of the failed request.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The underlying cause.
    pub fn cause(&self) -> &RequestCause {
        &self.cause
    }

    /// Returns `true` when the server answered `404 Not Found`.
    pub fn is_not_found(&self) -> bool {
        self.status == StatusCode::NOT_FOUND
    }
}

impl From<String> for RequestCause {
    fn from(message: String) -> Self {
        Self::Internal(message)
    }
}

/// Unified error type for client and resource operations.
///
/// | Variant | Raised when |
/// |---------|-------------|
/// | `Config` | No usable auth mode, a malformed resource ID, or an invalid resource spec |
/// | `Request` | Any network or API failure, see [`RequestError`] |
/// | `Decode` | A success response did not contain the expected JSON |
/// | `Encode` | A request body could not be serialized |
///
/// None of these are retried once returned.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Invalid configuration or input, detected before any network call.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A classified network or API failure.
    #[error(transparent)]
    Request(#[from] RequestError),

    /// A success response could not be decoded.
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A request body could not be encoded.
    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),
}

impl ClientError {
    /// The HTTP status code, for errors that carry one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Request(err) => Some(err.status()),
            _ => None,
        }
    }

    /// Returns `true` for a `404 Not Found` request failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Request(err) if err.is_not_found())
    }
}
