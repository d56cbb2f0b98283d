//! Configuration for the access-control subsystem
//!
//! Every path here is resolved relative to the working directory of the
//! invoking process, matching how terminal software has always launched the
//! checker from its scripts directory.

mod traits;
mod validation;

pub use traits::{prefixed_vars, LayeredConfig, ENV_PREFIX};
pub use validation::{ConfigValidator, SectionValidator, ValidationError};

use crate::LockgroupError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LockgroupConfig {
    /// Registry source files
    pub registry: RegistryConfig,
    /// Audit log sink
    pub audit: AuditConfig,
    /// Photo evidence captured per verification attempt
    pub evidence: EvidenceConfig,
    /// Credential entry keypad
    pub keypad: KeypadConfig,
    /// Diagnostic logging
    pub logging: LoggingConfig,
}

/// Registry source files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
    /// `terminalId guiId groupId` per line
    pub terminals_path: PathBuf,
    /// `terminalId credential...` per line
    pub credentials_path: PathBuf,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            terminals_path: PathBuf::from("computers.txt"),
            credentials_path: PathBuf::from("pincodes.txt"),
        }
    }
}

/// Audit log sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuditConfig {
    /// Append-only text file receiving one line per verification
    pub log_path: PathBuf,
    /// Prefix each line with an RFC 3339 timestamp
    pub timestamps: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            log_path: PathBuf::from("../logs/logs.txt"),
            timestamps: true,
        }
    }
}

/// Photo evidence captured per verification attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EvidenceConfig {
    /// Whether to invoke the camera at all
    pub enabled: bool,
    /// Capture program; receives the output path as its final argument
    pub program: Option<String>,
    /// Extra arguments placed before the output path
    pub args: Vec<String>,
    /// Directory photos are written to
    pub output_dir: PathBuf,
}

impl Default for EvidenceConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            program: None,
            args: Vec::new(),
            output_dir: PathBuf::from("../logs"),
        }
    }
}

/// Credential entry keypad
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeypadConfig {
    /// Key that ends credential entry
    pub terminator: char,
    /// Keys past this length are dropped
    pub max_length: usize,
}

impl Default for KeypadConfig {
    fn default() -> Self {
        Self {
            terminator: '#',
            max_length: 15,
        }
    }
}

/// Diagnostic logging
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `tracing` filter directive (`info`, `debug`, `lockgroup_access=trace`, ...)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl LayeredConfig for LockgroupConfig {
    fn load_from_file(path: &Path) -> Result<Self, LockgroupError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            LockgroupError::config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;
        toml::from_str(&content).map_err(|e| {
            LockgroupError::config(format!("Invalid TOML in {}: {e}", path.display()))
        })
    }

    fn set_from_string(&mut self, key: &str, value: &str) -> Result<(), LockgroupError> {
        match key {
            "registry.terminals_path" => self.registry.terminals_path = PathBuf::from(value),
            "registry.credentials_path" => self.registry.credentials_path = PathBuf::from(value),
            "audit.log_path" => self.audit.log_path = PathBuf::from(value),
            "audit.timestamps" => self.audit.timestamps = parse_bool(key, value)?,
            "evidence.enabled" => self.evidence.enabled = parse_bool(key, value)?,
            "evidence.program" => {
                self.evidence.program = (!value.is_empty()).then(|| value.to_string());
            }
            "evidence.args" => {
                self.evidence.args = value.split_whitespace().map(str::to_string).collect();
            }
            "evidence.output_dir" => self.evidence.output_dir = PathBuf::from(value),
            "keypad.terminator" => {
                let mut chars = value.chars();
                self.keypad.terminator = match (chars.next(), chars.next()) {
                    (Some(c), None) => c,
                    _ => {
                        return Err(LockgroupError::config(format!(
                            "{key} must be a single character"
                        )))
                    }
                };
            }
            "keypad.max_length" => {
                self.keypad.max_length = value
                    .parse()
                    .map_err(|_| LockgroupError::config(format!("Invalid integer for {key}")))?;
            }
            "logging.level" => self.logging.level = value.to_string(),
            _ => {
                return Err(LockgroupError::config(format!(
                    "Unknown configuration key: {key}"
                )))
            }
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), LockgroupError> {
        let mut validator = ConfigValidator::new();

        validator
            .section("registry")
            .require("terminals_path", &self.registry.terminals_path.to_string_lossy())
            .require(
                "credentials_path",
                &self.registry.credentials_path.to_string_lossy(),
            );

        validator
            .section("audit")
            .require("log_path", &self.audit.log_path.to_string_lossy());

        validator
            .section("keypad")
            .within("max_length", self.keypad.max_length, 1..=64)
            .check(
                "terminator",
                !self.keypad.terminator.is_whitespace(),
                "cannot be whitespace",
            );

        if self.evidence.enabled {
            validator
                .section("evidence")
                .require("program", self.evidence.program.as_deref().unwrap_or(""));
        }

        validator.finish()
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, LockgroupError> {
    value
        .parse()
        .map_err(|_| LockgroupError::config(format!("Invalid boolean for {key}")))
}
