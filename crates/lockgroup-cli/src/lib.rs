//! lockgroup command-line interface
//!
//! Terminal software shells out to `lockgroup` and reads the exit code:
//! 1 opens (or reports a known group), 0 means no. Operation arguments are
//! collected raw so malformed invocations reach the engine and get audited
//! instead of being rejected by the parser. Invocations that cannot be run
//! at all (no usable configuration, a command line clap refuses) still leave
//! an audit line for `verify` and `enter` before answering 0.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lockgroup_access::{decode_arguments, MalformedRequest};
use lockgroup_core::config::{prefixed_vars, AuditConfig, KeypadConfig};
use lockgroup_core::{LayeredConfig, LockgroupConfig};
use std::ffi::OsString;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

pub mod commands;

/// Config file read when `--config` is not given
pub const DEFAULT_CONFIG: &str = "lockgroup.toml";

/// Parsed command line
#[derive(Parser, Debug)]
#[command(name = "lockgroup")]
#[command(
    about = "Lock-group access verification for multi-terminal installations",
    long_about = None
)]
pub struct Cli {
    /// Operation to run
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,
}

/// Operations the terminal software can request
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Check a credential: `verify <guiId> <credential>`
    Verify {
        /// Operation arguments, passed through unchecked
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<OsString>,
    },

    /// Report whether a GUI identifier is registered: `status <guiId>`
    Status {
        /// Operation arguments, passed through unchecked
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<OsString>,
    },

    /// Print the close directive for a GUI identifier's group: `close <guiId>`
    Close {
        /// Operation arguments, passed through unchecked
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<OsString>,
    },

    /// Read a keypad entry from stdin and verify it: `enter <guiId>`
    Enter {
        /// Operation arguments, passed through unchecked
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<OsString>,
    },
}

/// Load configuration from `path`, then environment overrides
pub fn load_config(path: &Path) -> Result<LockgroupConfig> {
    LockgroupConfig::load_layered(Some(path))
        .with_context(|| format!("loading configuration from {}", path.display()))
}

/// Install the stderr subscriber; stdout carries close directives only
pub fn init_logging(verbose: bool, level: &str) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Audit settings for an invocation whose full configuration is unusable
///
/// Takes the `[audit]` section when the file still parses, then any
/// `LOCKGROUP_AUDIT_*` override that applies cleanly. Falls back to the
/// defaults otherwise.
pub fn fallback_audit(path: &Path) -> AuditConfig {
    let mut config = if path.exists() {
        LockgroupConfig::load_from_file(path).unwrap_or_default()
    } else {
        LockgroupConfig::default()
    };

    if let Ok(vars) = prefixed_vars(std::env::vars_os()) {
        let audit_vars = vars
            .into_iter()
            .filter(|(name, _)| name.starts_with("LOCKGROUP_AUDIT_"));
        for var in audit_vars {
            if let Err(error) = config.merge_with_vars([var]) {
                tracing::debug!(%error, "Ignoring audit override");
            }
        }
    }

    if config.audit.log_path.as_os_str().is_empty() {
        return AuditConfig::default();
    }
    config.audit
}

/// Answer `command` without registries
///
/// Nothing resolves, so the exit code is always 0, but `verify` and `enter`
/// still append their audit line to `audit`.
pub fn deny<R: Read>(command: &Command, audit: &AuditConfig, input: R) -> i32 {
    let engine = commands::denying_engine(audit);
    match command {
        Command::Verify { args } => commands::verify::decide(&engine, args),
        Command::Enter { args } => {
            commands::enter::decide(&engine, &KeypadConfig::default(), args, input)
        }
        Command::Status { .. } | Command::Close { .. } => 0,
    }
}

/// Audit a `verify` or `enter` command line the parser rejected
///
/// `raw` is the full argument vector, program name first. Everything after
/// the operation name is recorded as an incorrect-format attempt; command
/// lines naming neither operation are not attempts. Returns the exit code.
pub fn deny_unparsed(raw: &[OsString], message: &str) -> i32 {
    let Some(operation) = raw
        .iter()
        .skip(1)
        .position(|arg| arg == "verify" || arg == "enter")
        .map(|index| index + 1)
    else {
        return 0;
    };

    let (args, _) = decode_arguments(&raw[operation + 1..]);
    let audit = fallback_audit(&config_hint(&raw[..operation]));
    let reason = MalformedRequest::Unparsable {
        message: message.to_string(),
    };
    commands::denying_engine(&audit)
        .reject_malformed(&args, &reason)
        .exit_code()
}

fn config_hint(globals: &[OsString]) -> PathBuf {
    globals
        .windows(2)
        .find(|pair| pair[0] == "-c" || pair[0] == "--config")
        .map(|pair| PathBuf::from(&pair[1]))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG))
}

/// Run a parsed invocation against the process's stdin and stdout
pub fn run(cli: Cli) -> i32 {
    let stdin = std::io::stdin();
    let config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(error) => {
            init_logging(cli.verbose, "info");
            tracing::error!(error = %format!("{error:#}"), "Configuration unusable, denying");
            return deny(&cli.command, &fallback_audit(&cli.config), stdin.lock());
        }
    };
    init_logging(cli.verbose, &config.logging.level);

    let stdout = std::io::stdout();
    dispatch(&cli.command, &config, stdin.lock(), stdout.lock())
}

/// Execute `command` and return the process exit code
pub fn dispatch<R: Read, W: Write>(
    command: &Command,
    config: &LockgroupConfig,
    input: R,
    output: W,
) -> i32 {
    match command {
        Command::Verify { args } => commands::verify::run(config, args),
        Command::Status { args } => commands::status::run(config, args),
        Command::Close { args } => commands::close::run(config, args, output),
        Command::Enter { args } => commands::enter::run(config, args, input),
    }
}
