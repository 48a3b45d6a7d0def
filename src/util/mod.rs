//
//  bitbucket-provision
//  util/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Utility Module
//!
//! Helpers shared by the resource clients.
//!
//! ## Categories
//!
//! - **String Utilities**: [`repository_slug`]
//! - **Identifier Utilities**: [`encode_id`], [`decode_id`]
//!
//! ## Example
//!
//! ```rust
//! use bitbucket_provision::util::{decode_id, encode_id, repository_slug};
//!
//! assert_eq!(repository_slug("My Service"), "my-service");
//!
//! let id = encode_id("{repo}", "42");
//! assert_eq!(id, "{repo}:42");
//! assert_eq!(decode_id(&id).unwrap(), ("{repo}", "42"));
//! ```

use crate::api::common::ClientError;

/// Separator between the parts of a composite identifier.
pub const ID_SEPARATOR: char = ':';

/// Converts a repository name into the slug Bitbucket assigns to it.
///
/// The name is lowercased and every space becomes `-`. No other characters
/// are touched.
///
/// # Example
///
/// ```rust
/// use bitbucket_provision::util::repository_slug;
///
/// assert_eq!(repository_slug("Backend API"), "backend-api");
/// assert_eq!(repository_slug("already-a-slug"), "already-a-slug");
/// ```
pub fn repository_slug(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}

/// Joins a repository identifier and a child identifier into one id.
pub fn encode_id(repository_id: &str, child_id: &str) -> String {
    format!("{}{}{}", repository_id, ID_SEPARATOR, child_id)
}

/// Splits a composite identifier into repository and child identifiers.
///
/// # Errors
///
/// Returns [`ClientError::Config`] unless `id` has exactly two non-empty
/// parts.
pub fn decode_id(id: &str) -> Result<(&str, &str), ClientError> {
    let mut parts = id.split(ID_SEPARATOR);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(repository_id), Some(child_id), None)
            if !repository_id.is_empty() && !child_id.is_empty() =>
        {
            Ok((repository_id, child_id))
        }
        _ => Err(ClientError::Config(format!(
            "invalid id '{}': expected <repository_id>{}<id>",
            id, ID_SEPARATOR
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_slug() {
        assert_eq!(repository_slug("My Repo Name"), "my-repo-name");
        assert_eq!(repository_slug("  Two  Spaces"), "--two--spaces");
        assert_eq!(repository_slug("MIXED_case.1"), "mixed_case.1");
    }

    #[test]
    fn test_decode_id() {
        assert_eq!(decode_id("{r-1}:{h-1}").unwrap(), ("{r-1}", "{h-1}"));
    }

    #[test]
    fn test_decode_malformed_id() {
        for id in ["", "no-separator", ":child", "repo:", "a:b:c"] {
            assert!(
                matches!(decode_id(id), Err(ClientError::Config(_))),
                "{id} should be rejected"
            );
        }
    }
}
