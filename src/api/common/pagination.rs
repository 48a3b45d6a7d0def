//
//  bitbucket-provision
//  api/common/pagination.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Pagination envelope for Bitbucket Cloud list responses
//!
//! Bitbucket Cloud wraps every collection in a page object with `values` and
//! optional `next`/`previous` links. This crate only ever reads the first
//! page; following `next` links is not implemented.

use serde::{Deserialize, Serialize};

/// One page of results from a Bitbucket Cloud list endpoint.
///
/// # Example
///
/// ```rust
/// use bitbucket_provision::api::common::PaginatedResponse;
///
/// let json = r#"{
///     "values": ["a", "b"],
///     "pagelen": 10,
///     "next": "https://api.bitbucket.org/2.0/repositories/ws/repo/hooks?page=2"
/// }"#;
///
/// let page: PaginatedResponse<String> = serde_json::from_str(json).unwrap();
/// assert_eq!(page.values.len(), 2);
/// assert!(page.next_url().is_some());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    /// Items in the current page. May be empty.
    #[serde(default = "Vec::new")]
    pub values: Vec<T>,

    /// Current page number (1-indexed), when the endpoint reports it.
    #[serde(default)]
    pub page: Option<u32>,

    /// Maximum number of items per page.
    #[serde(default)]
    pub pagelen: Option<u32>,

    /// Total number of items across all pages, when the endpoint reports it.
    #[serde(default)]
    pub size: Option<u32>,

    /// URL of the next page. `None` on the last page.
    #[serde(default)]
    pub next: Option<String>,

    /// URL of the previous page. `None` on the first page.
    #[serde(default)]
    pub previous: Option<String>,
}

impl<T> PaginatedResponse<T> {
    /// Returns the URL for the next page of results.
    pub fn next_url(&self) -> Option<&str> {
        self.next.as_deref()
    }
}
