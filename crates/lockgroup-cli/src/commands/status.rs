//! `lockgroup status <guiId>`

use lockgroup_access::decode_arguments;
use lockgroup_core::LockgroupConfig;
use std::ffi::OsString;

/// Exit 1 when the GUI identifier belongs to a registered terminal
pub fn run(config: &LockgroupConfig, raw: &[OsString]) -> i32 {
    let (args, undecodable) = decode_arguments(raw);
    if let Some(reason) = undecodable {
        tracing::warn!(%reason, "Incorrect status request format");
        return 0;
    }
    super::resolver(config).status_args(&args).exit_code()
}
