//
//  bitbucket-provision
//  cli/api.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Direct API access command
//!
//! Sends one request through the session's executor, so it gets the same
//! bearer authentication and retry behavior as every resource operation.
//!
//! ## Examples
//!
//! ```bash
//! # Get repository info
//! bbp api /repositories/acme/website
//!
//! # Repeated query parameters
//! bbp api /repositories/acme -q fields=values.uuid -q fields=values.name
//!
//! # Create a webhook from a JSON file
//! bbp api -X POST /repositories/acme/website/hooks --input hook.json
//!
//! # Internal API
//! bbp api --internal /repositories/acme/website/pipelines-config/dynamic-pipelines-provider
//! ```

use std::fs;
use std::io::Read;

use anyhow::{bail, Context, Result};
use clap::Args;
use reqwest::header::{HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde_json::Value;

use crate::api::client::APPLICATION_JSON;
use crate::api::{ApiRequest, ClientError};

use super::GlobalOptions;

/// Make direct API requests
#[derive(Args, Debug)]
pub struct ApiCommand {
    /// API path relative to the API base (e.g., /repositories/workspace/repo)
    pub endpoint: String,

    /// HTTP method (GET, POST, PUT, PATCH, DELETE)
    #[arg(long, short = 'X', default_value = "GET")]
    pub method: String,

    /// Request headers as 'Name: value' (can be specified multiple times)
    #[arg(long, short = 'H', action = clap::ArgAction::Append)]
    pub header: Vec<String>,

    /// Query parameters as key=value (can be specified multiple times)
    #[arg(long, short = 'q', action = clap::ArgAction::Append)]
    pub query: Vec<String>,

    /// Read a JSON request body from file (- for stdin)
    #[arg(long, short = 'f')]
    pub input: Option<String>,

    /// Send the request to the internal API
    #[arg(long)]
    pub internal: bool,

    /// Print the response body exactly as received
    #[arg(long)]
    pub raw: bool,
}

impl ApiCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let request = self.build_request()?;
        let client = global.connect().await?;

        let body = client.execute(request).await.map_err(ClientError::from)?;
        println!("{}", self.render(&body)?);
        Ok(())
    }

    fn build_request(&self) -> Result<ApiRequest> {
        let method = self.parse_method()?;
        let mut request = ApiRequest::new(method, self.endpoint.clone());

        if self.internal {
            request = request.internal();
        }

        for pair in &self.query {
            let (key, value) = pair
                .split_once('=')
                .with_context(|| format!("Invalid query format: {}. Expected key=value", pair))?;
            request = request.query(key, value);
        }

        for header in &self.header {
            let (name, value) = header
                .split_once(':')
                .with_context(|| format!("Invalid header format: {}. Expected 'Name: Value'", header))?;
            let name = HeaderName::from_bytes(name.trim().as_bytes())
                .with_context(|| format!("Invalid header name: {}", name))?;
            let value = HeaderValue::from_str(value.trim())
                .with_context(|| format!("Invalid header value for {}", name))?;
            request = request.header(name, value);
        }

        if let Some(body) = self.read_body()? {
            if !request.header_map().contains_key(CONTENT_TYPE) {
                request = request.header(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
            }
            request = request.body(body);
        }

        Ok(request)
    }

    fn parse_method(&self) -> Result<Method> {
        match self.method.to_uppercase().as_str() {
            "GET" => Ok(Method::GET),
            "POST" => Ok(Method::POST),
            "PUT" => Ok(Method::PUT),
            "PATCH" => Ok(Method::PATCH),
            "DELETE" => Ok(Method::DELETE),
            _ => bail!("Unsupported HTTP method: {}", self.method),
        }
    }

    fn read_body(&self) -> Result<Option<Vec<u8>>> {
        let Some(input) = &self.input else {
            return Ok(None);
        };

        let content = if input == "-" {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        } else {
            fs::read_to_string(input).with_context(|| format!("Failed to read {}", input))?
        };

        // Validate before sending
        let value: Value = serde_json::from_str(&content)
            .with_context(|| format!("Request body in {} is not valid JSON", input))?;
        Ok(Some(serde_json::to_vec(&value)?))
    }

    fn render(&self, body: &[u8]) -> Result<String> {
        let text = String::from_utf8_lossy(body);
        if self.raw {
            return Ok(text.into_owned());
        }
        match serde_json::from_slice::<Value>(body) {
            Ok(json) => Ok(serde_json::to_string_pretty(&json)?),
            Err(_) => Ok(text.into_owned()),
        }
    }
}
