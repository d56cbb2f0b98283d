//! Registry record types and their line parsers
//!
//! Each parser handles exactly one line and says why it rejected it. Callers
//! decide what a rejected line means; the registries drop them.

use lockgroup_core::{GroupId, GuiId, TerminalId};
use serde::{Deserialize, Serialize};

/// One line of the terminal registry: `terminalId guiId groupId`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalRecord {
    /// Physical terminal
    pub terminal_id: TerminalId,
    /// Identifier supplied by the terminal's front-end
    pub gui_id: GuiId,
    /// Lock group the terminal belongs to
    pub group_id: GroupId,
}

/// One line of the credential registry: `terminalId credential...`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    /// Terminal the credentials open
    pub terminal_id: TerminalId,
    /// Valid credentials in file order; may be empty
    pub credentials: Vec<String>,
}

impl CredentialRecord {
    /// Whether any stored credential equals `supplied` after trailing whitespace is stripped
    pub fn accepts(&self, supplied: &str) -> bool {
        let supplied = supplied.trim_end();
        let mut matched = false;
        for credential in &self.credentials {
            if credential.trim_end() == supplied {
                matched = true;
            }
        }
        matched
    }
}

/// Why a registry line was rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LineError {
    /// Line holds no tokens
    #[error("empty line")]
    Empty,
    /// Wrong number of whitespace-separated fields
    #[error("expected {expected} fields, found {found}")]
    FieldCount {
        /// Fields the format requires
        expected: usize,
        /// Fields present on the line
        found: usize,
    },
    /// A field that must be an integer is not one
    #[error("field `{field}` is not an integer: {value:?}")]
    NotAnInteger {
        /// Name of the offending field
        field: &'static str,
        /// Raw token
        value: String,
    },
}

fn integer_field<T: std::str::FromStr>(field: &'static str, token: &str) -> Result<T, LineError> {
    token.parse().map_err(|_| LineError::NotAnInteger {
        field,
        value: token.to_string(),
    })
}

/// Parse a terminal registry line
pub fn parse_terminal_line(line: &str) -> Result<TerminalRecord, LineError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    match fields.as_slice() {
        [] => Err(LineError::Empty),
        [terminal, gui, group] => Ok(TerminalRecord {
            terminal_id: integer_field("terminalId", terminal)?,
            gui_id: integer_field("guiId", gui)?,
            group_id: integer_field("groupId", group)?,
        }),
        other => Err(LineError::FieldCount {
            expected: 3,
            found: other.len(),
        }),
    }
}

/// Parse a credential registry line
pub fn parse_credential_line(line: &str) -> Result<CredentialRecord, LineError> {
    let mut tokens = line.split_whitespace();
    let terminal = tokens.next().ok_or(LineError::Empty)?;
    Ok(CredentialRecord {
        terminal_id: integer_field("terminalId", terminal)?,
        credentials: tokens.map(str::to_string).collect(),
    })
}
