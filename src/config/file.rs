//
//  bitbucket-provision
//  config/file.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration File I/O Module
//!
//! Small wrappers around the file system used by
//! [`ClientConfig`](super::ClientConfig) when it loads settings from disk.

use std::path::Path;

use anyhow::Result;

/// Reads the contents of a configuration file.
///
/// # Errors
///
/// Returns an error if the file does not exist, cannot be opened, or
/// contains invalid UTF-8.
///
/// # Example
///
/// ```rust,no_run
/// use std::path::Path;
/// use bitbucket_provision::config::read_config_file;
///
/// let content = read_config_file(Path::new("/etc/bbp/config.toml"))?;
/// println!("{}", content);
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn read_config_file(path: &Path) -> Result<String> {
    Ok(std::fs::read_to_string(path)?)
}

/// Checks if a configuration file exists.
pub fn config_exists(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_and_exists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        assert!(!config_exists(&path));
        assert!(read_config_file(&path).is_err());

        std::fs::write(&path, "workspace = \"acme\"\n").unwrap();
        assert!(config_exists(&path));
        assert_eq!(read_config_file(&path).unwrap(), "workspace = \"acme\"\n");

        // Directories are not config files
        assert!(!config_exists(dir.path()));
    }
}
