//! Registry loaders
//!
//! A loader hands back the complete text of a registry source in one piece.
//! Resolution always runs against that in-memory snapshot, so an out-of-band
//! edit landing mid-invocation cannot tear a lookup.

use crate::{CredentialRegistry, TerminalRegistry};
use lockgroup_core::config::RegistryConfig;
use lockgroup_core::{LockgroupError, Result};
use std::path::{Path, PathBuf};

/// Source of registry snapshots injected into the engine and resolver
pub trait RegistryLoader {
    /// Full text of the terminal registry
    fn load_terminals(&self) -> Result<String>;

    /// Full text of the credential registry
    fn load_credentials(&self) -> Result<String>;

    /// Parsed terminal registry; an unreadable source yields an empty registry
    fn terminal_registry(&self) -> TerminalRegistry {
        match self.load_terminals() {
            Ok(text) => TerminalRegistry::parse(&text),
            Err(error) => {
                tracing::warn!(%error, "Terminal registry unreadable, treating as empty");
                TerminalRegistry::default()
            }
        }
    }

    /// Parsed credential registry; an unreadable source yields an empty registry
    fn credential_registry(&self) -> CredentialRegistry {
        match self.load_credentials() {
            Ok(text) => CredentialRegistry::parse(&text),
            Err(error) => {
                tracing::warn!(%error, "Credential registry unreadable, treating as empty");
                CredentialRegistry::default()
            }
        }
    }
}

impl<L: RegistryLoader + ?Sized> RegistryLoader for &L {
    fn load_terminals(&self) -> Result<String> {
        (**self).load_terminals()
    }

    fn load_credentials(&self) -> Result<String> {
        (**self).load_credentials()
    }
}

/// Reads both registries from plain-text files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRegistryLoader {
    terminals_path: PathBuf,
    credentials_path: PathBuf,
}

impl FileRegistryLoader {
    /// Create a loader for the given files
    pub fn new(terminals_path: impl Into<PathBuf>, credentials_path: impl Into<PathBuf>) -> Self {
        Self {
            terminals_path: terminals_path.into(),
            credentials_path: credentials_path.into(),
        }
    }

    /// Create a loader from the `[registry]` configuration section
    pub fn from_config(config: &RegistryConfig) -> Self {
        Self::new(&config.terminals_path, &config.credentials_path)
    }

    /// Terminal registry path
    pub fn terminals_path(&self) -> &Path {
        &self.terminals_path
    }

    /// Credential registry path
    pub fn credentials_path(&self) -> &Path {
        &self.credentials_path
    }

    fn read_snapshot(path: &Path) -> Result<String> {
        let bytes = std::fs::read(path).map_err(|e| {
            let error = LockgroupError::from(e);
            tracing::debug!(path = %path.display(), %error, "Registry read failed");
            error
        })?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl RegistryLoader for FileRegistryLoader {
    fn load_terminals(&self) -> Result<String> {
        Self::read_snapshot(&self.terminals_path)
    }

    fn load_credentials(&self) -> Result<String> {
        Self::read_snapshot(&self.credentials_path)
    }
}

/// Serves fixed in-memory registry text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticRegistryLoader {
    terminals: String,
    credentials: String,
}

impl StaticRegistryLoader {
    /// Create a loader over the given registry texts
    pub fn new(terminals: impl Into<String>, credentials: impl Into<String>) -> Self {
        Self {
            terminals: terminals.into(),
            credentials: credentials.into(),
        }
    }
}

impl RegistryLoader for StaticRegistryLoader {
    fn load_terminals(&self) -> Result<String> {
        Ok(self.terminals.clone())
    }

    fn load_credentials(&self) -> Result<String> {
        Ok(self.credentials.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lockgroup_core::{GuiId, TerminalId};

    #[test]
    fn static_loader_serves_snapshots() {
        let loader = StaticRegistryLoader::new("101 5 1\n", "101 1234\n");
        let terminals = loader.terminal_registry();
        assert_eq!(terminals.resolve_terminal(GuiId(5)), Some(TerminalId(101)));
        assert_eq!(
            loader.credential_registry().credentials_for(TerminalId(101)),
            ["1234"]
        );
    }

    #[test]
    fn missing_files_degrade_to_empty_registries() {
        let loader =
            FileRegistryLoader::new("/nonexistent/computers.txt", "/nonexistent/pincodes.txt");
        assert!(matches!(
            loader.load_terminals(),
            Err(LockgroupError::NotFound { .. })
        ));
        assert!(loader.terminal_registry().is_empty());
        assert!(loader.credential_registry().is_empty());
    }
}
