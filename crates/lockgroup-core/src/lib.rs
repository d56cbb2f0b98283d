//! Lockgroup Core - shared foundations
//!
//! Types every other crate in the workspace builds on:
//! - [`LockgroupError`]: the unified error type
//! - [`GuiId`], [`TerminalId`], [`GroupId`]: registry identifiers
//! - [`LockgroupConfig`]: layered configuration (defaults, TOML file, environment)

#![forbid(unsafe_code)]

/// Layered configuration and validation
pub mod config;

/// Unified error handling
pub mod errors;

/// Registry identifier newtypes
pub mod identifiers;

pub use config::{LayeredConfig, LockgroupConfig};
pub use errors::{LockgroupError, Result};
pub use identifiers::{GroupId, GuiId, TerminalId};
