//! Audit log for verification attempts
//!
//! Every call to the verification engine appends exactly one human-readable
//! line. The file sink holds an exclusive advisory lock for the duration of
//! each append so lines from concurrent invocations never interleave.

use chrono::{DateTime, Local, SecondsFormat};
use fs2::FileExt;
use lockgroup_core::config::AuditConfig;
use lockgroup_core::{LockgroupError, Result, TerminalId};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// What a single audit line records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuditEntry {
    /// The request could not be interpreted; no registry was consulted
    IncorrectFormat {
        /// Raw arguments as received
        arguments: Vec<String>,
    },
    /// The supplied credential opened the terminal
    Match {
        /// Resolved terminal
        terminal: TerminalId,
        /// Normalized supplied credential
        credential: String,
    },
    /// No credential matched, or the terminal was never resolved
    NoMatch {
        /// Resolved terminal, if any
        terminal: Option<TerminalId>,
        /// Normalized supplied credential
        credential: String,
    },
}

impl fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditEntry::IncorrectFormat { arguments } => {
                write!(f, "Incorrect format, got arguments: {arguments:?}")
            }
            AuditEntry::Match {
                terminal,
                credential,
            } => write!(f, "Got match with [{terminal}, {credential}]"),
            AuditEntry::NoMatch {
                terminal: Some(terminal),
                credential,
            } => write!(f, "Did not get match with [{terminal}, {credential}]"),
            AuditEntry::NoMatch {
                terminal: None,
                credential,
            } => write!(f, "Did not get match with [unresolved, {credential}]"),
        }
    }
}

/// An audit entry stamped with the moment of the attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditRecord {
    /// When the attempt was decided
    pub timestamp: DateTime<Local>,
    /// What was decided
    pub entry: AuditEntry,
}

impl AuditRecord {
    /// Stamp `entry` with the current local time
    pub fn now(entry: AuditEntry) -> Self {
        Self {
            timestamp: Local::now(),
            entry,
        }
    }

    /// Render as a single line, optionally timestamp-prefixed, newline terminated
    pub fn render(&self, timestamps: bool) -> String {
        // Credentials come from argv and could carry a newline; one record is one line.
        let body: String = self
            .entry
            .to_string()
            .chars()
            .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
            .collect();
        if timestamps {
            format!(
                "{} {body}\n",
                self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, false)
            )
        } else {
            format!("{body}\n")
        }
    }
}

/// Append-only destination for audit records
pub trait AuditSink {
    /// Append one record; must not leave a partial line behind on failure
    fn append(&self, record: &AuditRecord) -> Result<()>;
}

impl<S: AuditSink + ?Sized> AuditSink for &S {
    fn append(&self, record: &AuditRecord) -> Result<()> {
        (**self).append(record)
    }
}

impl<S: AuditSink + ?Sized> AuditSink for Box<S> {
    fn append(&self, record: &AuditRecord) -> Result<()> {
        (**self).append(record)
    }
}

/// Releases the advisory lock on every exit path
struct ExclusiveLock<'a> {
    file: &'a File,
}

impl<'a> ExclusiveLock<'a> {
    fn acquire(file: &'a File, path: &Path) -> Result<Self> {
        FileExt::lock_exclusive(file).map_err(|e| {
            LockgroupError::storage(format!("failed to lock audit log {}: {e}", path.display()))
        })?;
        Ok(Self { file })
    }
}

impl Drop for ExclusiveLock<'_> {
    fn drop(&mut self) {
        if let Err(error) = FileExt::unlock(self.file) {
            tracing::warn!(%error, "Failed to release audit log lock");
        }
    }
}

/// Audit log backed by an append-only text file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAuditLog {
    path: PathBuf,
    timestamps: bool,
}

impl FileAuditLog {
    /// Create a file sink writing timestamped lines to `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            timestamps: true,
        }
    }

    /// Create a file sink from the `[audit]` configuration section
    pub fn from_config(config: &AuditConfig) -> Self {
        Self::new(&config.log_path).with_timestamps(config.timestamps)
    }

    /// Toggle the timestamp prefix
    pub fn with_timestamps(mut self, timestamps: bool) -> Self {
        self.timestamps = timestamps;
        self
    }

    /// Log file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> Result<File> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                LockgroupError::storage(format!(
                    "failed to open audit log {}: {e}",
                    self.path.display()
                ))
            })
    }
}

impl AuditSink for FileAuditLog {
    fn append(&self, record: &AuditRecord) -> Result<()> {
        let file = self.open()?;
        let _lock = ExclusiveLock::acquire(&file, &self.path)?;

        let line = record.render(self.timestamps);
        let mut writer = &file;
        writer.write_all(line.as_bytes()).map_err(|e| {
            LockgroupError::storage(format!("failed to append audit entry: {e}"))
        })?;
        writer.flush()?;
        file.sync_data()?;
        Ok(())
    }
}

/// In-memory audit sink
#[derive(Debug, Default)]
pub struct MemoryAuditLog {
    records: Mutex<Vec<AuditRecord>>,
}

impl MemoryAuditLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every appended record
    pub fn records(&self) -> Vec<AuditRecord> {
        self.records.lock().clone()
    }

    /// Snapshot of every appended entry
    pub fn entries(&self) -> Vec<AuditEntry> {
        self.records
            .lock()
            .iter()
            .map(|record| record.entry.clone())
            .collect()
    }

    /// Number of appended records
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    /// Whether nothing has been appended
    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

impl AuditSink for MemoryAuditLog {
    fn append(&self, record: &AuditRecord) -> Result<()> {
        self.records.lock().push(record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn entries_render_like_the_historic_log() {
        let entry = AuditEntry::Match {
            terminal: TerminalId(101),
            credential: "1234".to_string(),
        };
        assert_eq!(entry.to_string(), "Got match with [101, 1234]");

        let entry = AuditEntry::NoMatch {
            terminal: Some(TerminalId(101)),
            credential: "0000".to_string(),
        };
        assert_eq!(entry.to_string(), "Did not get match with [101, 0000]");

        let entry = AuditEntry::NoMatch {
            terminal: None,
            credential: "1234".to_string(),
        };
        assert_eq!(entry.to_string(), "Did not get match with [unresolved, 1234]");

        let entry = AuditEntry::IncorrectFormat {
            arguments: vec!["5".to_string()],
        };
        assert_eq!(entry.to_string(), "Incorrect format, got arguments: [\"5\"]");
    }

    #[test]
    fn render_is_always_one_line() {
        let record = AuditRecord::now(AuditEntry::NoMatch {
            terminal: None,
            credential: "12\n34".to_string(),
        });
        let line = record.render(false);
        assert_eq!(line, "Did not get match with [unresolved, 12 34]\n");

        let stamped = record.render(true);
        assert_eq!(stamped.lines().count(), 1);
        assert!(stamped.ends_with("Did not get match with [unresolved, 12 34]\n"));
    }

    #[test]
    fn file_log_appends_and_creates_parent() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("logs").join("logs.txt");
        let log = FileAuditLog::new(&path).with_timestamps(false);

        log.append(&AuditRecord::now(AuditEntry::Match {
            terminal: TerminalId(1),
            credential: "a".to_string(),
        }))
        .unwrap();
        log.append(&AuditRecord::now(AuditEntry::IncorrectFormat {
            arguments: Vec::new(),
        }))
        .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "Got match with [1, a]\nIncorrect format, got arguments: []\n"
        );
    }

    #[test]
    fn memory_log_records_in_order() {
        let log = MemoryAuditLog::new();
        assert!(log.is_empty());
        (&log)
            .append(&AuditRecord::now(AuditEntry::IncorrectFormat {
                arguments: vec![],
            }))
            .unwrap();
        assert_eq!(log.len(), 1);
        assert!(matches!(
            log.entries()[0],
            AuditEntry::IncorrectFormat { .. }
        ));
    }
}
