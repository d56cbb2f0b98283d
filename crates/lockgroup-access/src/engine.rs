//! Verification engine
//!
//! Decides whether a supplied credential opens the terminal behind a GUI
//! identifier. Each call loads fresh registry snapshots through the injected
//! loader and appends exactly one audit record before returning.

use crate::audit::{AuditEntry, AuditRecord, AuditSink};
use crate::invocation::{MalformedRequest, VerifyRequest};
use crate::peripherals::{evidence_key, EvidenceCamera};
use lockgroup_core::{GuiId, TerminalId};
use lockgroup_registry::RegistryLoader;
use serde::{Deserialize, Serialize};

/// How an attempt was classified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerificationOutcome {
    /// A stored credential equals the supplied one
    Matched,
    /// Wrong argument count or non-integer GUI identifier
    MalformedRequest,
    /// GUI identifier is not in the terminal registry
    UnresolvedTerminal,
    /// Terminal resolved but no stored credential matched
    UnresolvedCredential,
}

/// Result of one verification attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationResult {
    /// Whether the lock group should open
    pub matched: bool,
    /// Terminal the GUI identifier resolved to
    pub resolved_terminal: Option<TerminalId>,
    /// Supplied credential with trailing whitespace stripped
    pub supplied_credential: String,
    /// Classification of the attempt
    pub outcome: VerificationOutcome,
    /// False when the audit append failed; the decision stands regardless
    pub audit_recorded: bool,
}

impl VerificationResult {
    fn new(
        outcome: VerificationOutcome,
        resolved_terminal: Option<TerminalId>,
        supplied_credential: String,
    ) -> Self {
        Self {
            matched: outcome == VerificationOutcome::Matched,
            resolved_terminal,
            supplied_credential,
            outcome,
            audit_recorded: false,
        }
    }

    /// Process exit code: 1 opens the lock, 0 does not
    pub fn exit_code(&self) -> i32 {
        i32::from(self.matched)
    }

    fn audit_entry(&self, arguments: &[String]) -> AuditEntry {
        match (self.outcome, self.resolved_terminal) {
            (VerificationOutcome::MalformedRequest, _) => AuditEntry::IncorrectFormat {
                arguments: arguments.to_vec(),
            },
            (VerificationOutcome::Matched, Some(terminal)) => AuditEntry::Match {
                terminal,
                credential: self.supplied_credential.clone(),
            },
            (_, terminal) => AuditEntry::NoMatch {
                terminal,
                credential: self.supplied_credential.clone(),
            },
        }
    }
}

/// Credential verification over injected registries and audit sink
pub struct VerificationEngine<L, A> {
    loader: L,
    audit: A,
    camera: Option<Box<dyn EvidenceCamera>>,
}

impl<L: RegistryLoader, A: AuditSink> VerificationEngine<L, A> {
    /// Create an engine without evidence capture
    pub fn new(loader: L, audit: A) -> Self {
        Self {
            loader,
            audit,
            camera: None,
        }
    }

    /// Attach a camera photographing every attempt
    pub fn with_camera(mut self, camera: Box<dyn EvidenceCamera>) -> Self {
        self.camera = Some(camera);
        self
    }

    /// Verify positional `<guiId> <credential>` arguments
    pub fn verify_args(&self, args: &[String]) -> VerificationResult {
        match VerifyRequest::from_args(args) {
            Ok(request) => self.verify(request.gui_id, &request.credential),
            Err(reason) => self.reject_malformed(args, &reason),
        }
    }

    /// Record a request that could not be interpreted, without reading any registry
    pub fn reject_malformed(
        &self,
        args: &[String],
        reason: &MalformedRequest,
    ) -> VerificationResult {
        tracing::warn!(%reason, "Incorrect verification request format");
        let supplied = args
            .get(1)
            .map(|credential| credential.trim_end().to_string())
            .unwrap_or_default();
        let result = VerificationResult::new(VerificationOutcome::MalformedRequest, None, supplied);
        self.finish(result, args)
    }

    /// Verify `credential` against the terminal behind `gui_id`
    pub fn verify(&self, gui_id: GuiId, credential: &str) -> VerificationResult {
        let supplied = credential.trim_end().to_string();

        let terminals = self.loader.terminal_registry();
        let Some(terminal) = terminals.resolve_terminal(gui_id) else {
            tracing::debug!(%gui_id, "GUI identifier not in terminal registry");
            let result =
                VerificationResult::new(VerificationOutcome::UnresolvedTerminal, None, supplied);
            return self.finish(result, &[]);
        };

        let credentials = self.loader.credential_registry();
        let matched = credentials
            .record_for(terminal)
            .is_some_and(|record| record.accepts(&supplied));

        let outcome = if matched {
            VerificationOutcome::Matched
        } else {
            VerificationOutcome::UnresolvedCredential
        };
        self.finish(VerificationResult::new(outcome, Some(terminal), supplied), &[])
    }

    fn finish(&self, mut result: VerificationResult, arguments: &[String]) -> VerificationResult {
        let record = AuditRecord::now(result.audit_entry(arguments));

        result.audit_recorded = match self.audit.append(&record) {
            Ok(()) => true,
            Err(error) => {
                tracing::error!(%error, entry = %record.entry, "Audit append failed");
                false
            }
        };

        if let Some(camera) = &self.camera {
            match camera.capture(&evidence_key(&record.timestamp)) {
                Ok(path) => tracing::debug!(path = %path.display(), "Evidence captured"),
                Err(error) => tracing::warn!(%error, "Evidence capture failed"),
            }
        }

        tracing::info!(
            outcome = ?result.outcome,
            terminal = ?result.resolved_terminal.map(|t| t.value()),
            audit_recorded = result.audit_recorded,
            "Verification decided"
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::MemoryAuditLog;
    use lockgroup_registry::StaticRegistryLoader;

    fn engine(log: &MemoryAuditLog) -> VerificationEngine<StaticRegistryLoader, &MemoryAuditLog> {
        VerificationEngine::new(
            StaticRegistryLoader::new("101 5 1\n102 7 2\n", "101 1234 5678\n"),
            log,
        )
    }

    #[test]
    fn matching_credential_opens() {
        let log = MemoryAuditLog::new();
        let result = engine(&log).verify(GuiId(5), "1234");
        assert!(result.matched);
        assert_eq!(result.outcome, VerificationOutcome::Matched);
        assert_eq!(result.resolved_terminal, Some(TerminalId(101)));
        assert_eq!(result.exit_code(), 1);
        assert!(result.audit_recorded);
    }

    #[test]
    fn trailing_whitespace_is_stripped_before_compare() {
        let log = MemoryAuditLog::new();
        let result = engine(&log).verify(GuiId(5), "5678\n");
        assert!(result.matched);
        assert_eq!(result.supplied_credential, "5678");
    }

    #[test]
    fn leading_whitespace_is_significant() {
        let log = MemoryAuditLog::new();
        let result = engine(&log).verify(GuiId(5), " 1234");
        assert!(!result.matched);
        assert_eq!(result.outcome, VerificationOutcome::UnresolvedCredential);
    }

    #[test]
    fn malformed_arguments_log_incorrect_format() {
        let log = MemoryAuditLog::new();
        let result = engine(&log).verify_args(&["x".to_string(), "1234".to_string()]);
        assert_eq!(result.outcome, VerificationOutcome::MalformedRequest);
        assert_eq!(result.exit_code(), 0);
        assert_eq!(
            log.entries(),
            vec![AuditEntry::IncorrectFormat {
                arguments: vec!["x".to_string(), "1234".to_string()]
            }]
        );
    }
}
