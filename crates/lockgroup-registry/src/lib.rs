//! # Lockgroup Registry
//!
//! Plain-text registries mapping terminals to lock groups and credentials.
//!
//! - Terminal registry: `terminalId guiId groupId` per line
//! - Credential registry: `terminalId credential1 credential2 ...` per line
//!
//! Both are parsed from a full in-memory snapshot. Malformed lines are dropped
//! one at a time and never abort a lookup. Duplicate keys resolve to the
//! first matching line in file order.

#![forbid(unsafe_code)]

pub mod credential;
pub mod loader;
pub mod records;
pub mod terminal;

pub use credential::CredentialRegistry;
pub use loader::{FileRegistryLoader, RegistryLoader, StaticRegistryLoader};
pub use records::{
    parse_credential_line, parse_terminal_line, CredentialRecord, LineError, TerminalRecord,
};
pub use terminal::TerminalRegistry;
