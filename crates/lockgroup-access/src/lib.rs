//! # Lockgroup Access
//!
//! Access decisions for a multi-terminal lock installation.
//!
//! - [`VerificationEngine`]: GUI identifier + credential -> open / stay shut
//! - [`LockGroupResolver`]: GUI identifier -> lock group, for status and close
//! - [`audit`]: one append-only line per verification attempt
//! - [`peripherals`]: keypad, camera and actuator seams
//!
//! Registries are read through an injected
//! [`RegistryLoader`](lockgroup_registry::RegistryLoader) on every call; nothing
//! is cached between invocations.

#![forbid(unsafe_code)]

pub mod audit;
pub mod engine;
pub mod invocation;
pub mod peripherals;
pub mod resolver;

pub use audit::{AuditEntry, AuditRecord, AuditSink, FileAuditLog, MemoryAuditLog};
pub use engine::{VerificationEngine, VerificationOutcome, VerificationResult};
pub use invocation::{decode_arguments, GroupRequest, MalformedRequest, VerifyRequest};
pub use resolver::{GroupStatus, LockGroupResolver};
