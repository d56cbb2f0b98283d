//! Credential registry: terminal to valid credentials

use crate::records::{parse_credential_line, CredentialRecord};
use lockgroup_core::TerminalId;

/// Every well-formed credential record of one snapshot, in file order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialRegistry {
    records: Vec<CredentialRecord>,
}

impl CredentialRegistry {
    /// Parse a full registry snapshot, dropping malformed lines
    pub fn parse(text: &str) -> Self {
        let mut records = Vec::new();
        for (index, line) in text.lines().enumerate() {
            match parse_credential_line(line) {
                Ok(record) => records.push(record),
                Err(reason) => {
                    tracing::trace!(line = index + 1, %reason, "Skipping credential registry line");
                }
            }
        }
        Self { records }
    }

    /// Build from already-parsed records
    pub fn from_records(records: Vec<CredentialRecord>) -> Self {
        Self { records }
    }

    /// First record for `terminal_id`
    ///
    /// Later lines for the same terminal are ignored on purpose: list every
    /// credential of a terminal on its one line.
    pub fn record_for(&self, terminal_id: TerminalId) -> Option<&CredentialRecord> {
        self.records
            .iter()
            .find(|record| record.terminal_id == terminal_id)
    }

    /// Credentials valid for `terminal_id`, empty when the terminal has no line
    pub fn credentials_for(&self, terminal_id: TerminalId) -> &[String] {
        self.record_for(terminal_id)
            .map(|record| record.credentials.as_slice())
            .unwrap_or(&[])
    }

    /// Number of well-formed records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the snapshot held no usable record
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_credentials_in_file_order() {
        let registry = CredentialRegistry::parse("101 1234 5678\n");
        assert_eq!(registry.credentials_for(TerminalId(101)), ["1234", "5678"]);
    }

    #[test]
    fn unknown_terminal_has_no_credentials() {
        let registry = CredentialRegistry::parse("101 1234\n");
        assert!(registry.credentials_for(TerminalId(102)).is_empty());
    }

    #[test]
    fn only_first_line_per_terminal_counts() {
        let registry = CredentialRegistry::parse("101\n101 1234\n");
        assert!(registry.credentials_for(TerminalId(101)).is_empty());

        let registry = CredentialRegistry::parse("101 1111\n101 2222\n");
        assert_eq!(registry.credentials_for(TerminalId(101)), ["1111"]);
    }

    #[test]
    fn skips_lines_without_integer_head() {
        let registry = CredentialRegistry::parse("x 1234\n\n103 42\n");
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.credentials_for(TerminalId(103)), ["42"]);
    }
}
