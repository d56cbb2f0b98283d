//! Group-close directives and the actuator that carries them out

use lockgroup_core::{GroupId, LockgroupError, Result};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;

/// Instruction to close the lock of one group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloseDirective {
    /// Group whose lock should close
    pub group: GroupId,
}

impl fmt::Display for CloseDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Closed lock of group: {}", self.group)
    }
}

/// Physical lock driver
pub trait LockActuator {
    /// Carry out a close directive
    fn close(&self, directive: &CloseDirective) -> Result<()>;
}

impl<A: LockActuator + ?Sized> LockActuator for &A {
    fn close(&self, directive: &CloseDirective) -> Result<()> {
        (**self).close(directive)
    }
}

/// Announces directives as text lines for a downstream relay driver
#[derive(Debug)]
pub struct WriterActuator<W: Write> {
    writer: Mutex<W>,
}

impl<W: Write> WriterActuator<W> {
    /// Wrap a writer
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Recover the writer
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl WriterActuator<std::io::Stdout> {
    /// Actuator printing directives on stdout
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> LockActuator for WriterActuator<W> {
    fn close(&self, directive: &CloseDirective) -> Result<()> {
        let mut writer = self.writer.lock();
        writeln!(writer, "{directive}")
            .and_then(|()| writer.flush())
            .map_err(|e| LockgroupError::storage(format!("failed to emit close directive: {e}")))
    }
}

/// Keeps every directive it receives
#[derive(Debug, Default)]
pub struct RecordingActuator {
    directives: Mutex<Vec<CloseDirective>>,
}

impl RecordingActuator {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Directives received so far
    pub fn directives(&self) -> Vec<CloseDirective> {
        self.directives.lock().clone()
    }
}

impl LockActuator for RecordingActuator {
    fn close(&self, directive: &CloseDirective) -> Result<()> {
        self.directives.lock().push(*directive);
        Ok(())
    }
}
