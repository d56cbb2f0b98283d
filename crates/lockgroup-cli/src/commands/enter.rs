//! `lockgroup enter <guiId>`
//!
//! Keypad mode: the terminal pipes raw keystrokes on stdin and the credential
//! is whatever arrives before the terminator key.

use lockgroup_access::peripherals::capture_credential;
use lockgroup_access::{decode_arguments, AuditSink, GroupRequest, VerificationEngine};
use lockgroup_core::config::KeypadConfig;
use lockgroup_core::LockgroupConfig;
use lockgroup_registry::RegistryLoader;
use std::ffi::OsString;
use std::io::{BufReader, Read};

/// Verify a credential typed on the keypad; exit codes as for `verify`
pub fn run<R: Read>(config: &LockgroupConfig, args: &[OsString], input: R) -> i32 {
    decide(&super::engine(config), &config.keypad, args, input)
}

pub(crate) fn decide<L: RegistryLoader, A: AuditSink, R: Read>(
    engine: &VerificationEngine<L, A>,
    keypad: &KeypadConfig,
    raw: &[OsString],
    input: R,
) -> i32 {
    let (args, undecodable) = decode_arguments(raw);
    let parsed = match undecodable {
        Some(reason) => Err(reason),
        None => GroupRequest::from_args(&args),
    };
    let request = match parsed {
        Ok(request) => request,
        Err(reason) => return engine.reject_malformed(&args, &reason).exit_code(),
    };

    // Line breaks come from the pipe, not the keypad
    let mut keys = BufReader::new(input)
        .bytes()
        .map_while(|byte| byte.ok())
        .map(char::from)
        .filter(|key| !matches!(key, '\n' | '\r'));

    match capture_credential(&mut keys, keypad) {
        Some(credential) => engine.verify(request.gui_id, &credential).exit_code(),
        None => {
            tracing::warn!(gui_id = %request.gui_id, "Keypad entry abandoned before terminator");
            0
        }
    }
}
