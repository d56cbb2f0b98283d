//! `lockgroup close <guiId>`

use lockgroup_access::decode_arguments;
use lockgroup_access::peripherals::WriterActuator;
use lockgroup_core::LockgroupConfig;
use std::ffi::OsString;
use std::io::Write;

/// Write the close directive to `output` when the group resolves
///
/// Always exits 0; the directive on stdout is the only signal.
pub fn run<W: Write>(config: &LockgroupConfig, raw: &[OsString], output: W) -> i32 {
    let (args, undecodable) = decode_arguments(raw);
    if let Some(reason) = undecodable {
        tracing::warn!(%reason, "Incorrect close request format");
        return 0;
    }

    let actuator = WriterActuator::new(output);
    if super::resolver(config).close_args(&args, &actuator).is_none() {
        tracing::debug!(?args, "No lock group to close");
    }
    0
}
