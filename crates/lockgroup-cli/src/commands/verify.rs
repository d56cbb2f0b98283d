//! `lockgroup verify <guiId> <credential>`

use lockgroup_access::{decode_arguments, AuditSink, VerificationEngine};
use lockgroup_core::LockgroupConfig;
use lockgroup_registry::RegistryLoader;
use std::ffi::OsString;

/// Exit 1 when the credential opens the terminal's lock group
pub fn run(config: &LockgroupConfig, args: &[OsString]) -> i32 {
    decide(&super::engine(config), args)
}

/// Verify raw arguments; undecodable ones are audited as incorrect format
pub(crate) fn decide<L: RegistryLoader, A: AuditSink>(
    engine: &VerificationEngine<L, A>,
    raw: &[OsString],
) -> i32 {
    let (args, undecodable) = decode_arguments(raw);
    let result = match undecodable {
        Some(reason) => engine.reject_malformed(&args, &reason),
        None => engine.verify_args(&args),
    };
    result.exit_code()
}
