//! Unified error system for lock-group access control
//!
//! Decision outcomes (match, no-match, malformed request) are *not* errors;
//! they are carried by result types in `lockgroup-access`. This type covers
//! the faults around them: unreadable registries, bad configuration, failed
//! audit writes.

use serde::{Deserialize, Serialize};

/// Error shared by every lockgroup crate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum LockgroupError {
    /// A registry, log or config file does not exist
    #[error("Not found: {message}")]
    NotFound {
        /// Path and context
        message: String,
    },

    /// The process may not read or write a file it needs
    #[error("Permission denied: {message}")]
    PermissionDenied {
        /// Path and context
        message: String,
    },

    /// Registry read, audit append or evidence capture failed
    #[error("Storage error: {message}")]
    Storage {
        /// What was being read or written
        message: String,
    },

    /// Configuration could not be loaded or failed validation
    #[error("Config error: {message}")]
    Config {
        /// Offending key or file
        message: String,
    },
}

impl LockgroupError {
    /// Missing file
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Access refused by the filesystem
    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::PermissionDenied {
            message: message.into(),
        }
    }

    /// Any other I/O fault
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Unusable configuration
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

/// Result alias used across the workspace
pub type Result<T> = std::result::Result<T, LockgroupError>;

impl From<std::io::Error> for LockgroupError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::not_found(err.to_string()),
            std::io::ErrorKind::PermissionDenied => Self::permission_denied(err.to_string()),
            _ => Self::storage(err.to_string()),
        }
    }
}

impl From<toml::de::Error> for LockgroupError {
    fn from(err: toml::de::Error) -> Self {
        Self::config(err.to_string())
    }
}
