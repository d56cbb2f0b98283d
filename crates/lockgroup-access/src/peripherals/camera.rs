//! Still-photo evidence for verification attempts
//!
//! Photos are filed under a key derived from the attempt timestamp so they
//! line up with the audit log. They play no part in the decision.

use chrono::{DateTime, Local};
use lockgroup_core::config::EvidenceConfig;
use lockgroup_core::{LockgroupError, Result};
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Camera able to take one still per attempt
pub trait EvidenceCamera {
    /// Capture a photo filed under `key`, returning where it was written
    fn capture(&self, key: &str) -> Result<PathBuf>;
}

/// Filesystem-safe key for an attempt timestamp
pub fn evidence_key(timestamp: &DateTime<Local>) -> String {
    timestamp.format("%Y-%m-%d_%H-%M-%S%.6f").to_string()
}

/// Runs an external capture program (`raspistill -o`, `libcamera-still -o`, ...)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandCamera {
    program: String,
    args: Vec<String>,
    output_dir: PathBuf,
}

impl CommandCamera {
    /// Create a camera invoking `program args... <output_dir>/<key>.jpg`
    pub fn new(
        program: impl Into<String>,
        args: Vec<String>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            program: program.into(),
            args,
            output_dir: output_dir.into(),
        }
    }

    /// Camera from the `[evidence]` section, `None` when disabled
    pub fn from_config(config: &EvidenceConfig) -> Option<Self> {
        if !config.enabled {
            return None;
        }
        let program = config.program.as_ref()?;
        Some(Self::new(program, config.args.clone(), &config.output_dir))
    }
}

impl EvidenceCamera for CommandCamera {
    fn capture(&self, key: &str) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(format!("{key}.jpg"));

        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(&path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .status()
            .map_err(|e| {
                LockgroupError::storage(format!("failed to start {}: {e}", self.program))
            })?;

        if status.success() {
            Ok(path)
        } else {
            Err(LockgroupError::storage(format!(
                "{} exited with {status}",
                self.program
            )))
        }
    }
}
