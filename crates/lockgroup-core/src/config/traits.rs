//! Core configuration traits

use crate::LockgroupError;
use std::ffi::OsString;
use std::path::Path;

/// Prefix for environment overrides (`LOCKGROUP_REGISTRY_TERMINALS_PATH`, ...)
pub const ENV_PREFIX: &str = "LOCKGROUP_";

/// Core trait for lockgroup configuration types
pub trait LayeredConfig: Clone + Default + Sized {
    /// Load configuration from a TOML file
    fn load_from_file(path: &Path) -> Result<Self, LockgroupError>;

    /// Apply `key = value` overrides, keys being dotted paths (`audit.log_path`)
    fn set_from_string(&mut self, key: &str, value: &str) -> Result<(), LockgroupError>;

    /// Validate the configuration
    fn validate(&self) -> Result<(), LockgroupError>;

    /// Merge overrides taken from `(name, value)` pairs carrying [`ENV_PREFIX`]
    fn merge_with_vars<I>(&mut self, vars: I) -> Result<(), LockgroupError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (name, value) in vars {
            if let Some(rest) = name.strip_prefix(ENV_PREFIX) {
                let key = env_key_to_path(rest);
                self.set_from_string(&key, &value)?;
            }
        }
        Ok(())
    }

    /// Merge with the process environment
    fn merge_with_env(&mut self) -> Result<(), LockgroupError> {
        self.merge_with_vars(prefixed_vars(std::env::vars_os())?)
    }

    /// Defaults, then the file when present, then the environment, then validation
    fn load_layered(path: Option<&Path>) -> Result<Self, LockgroupError> {
        let mut config = match path {
            Some(path) if path.exists() => Self::load_from_file(path)?,
            Some(path) => {
                tracing::debug!(path = %path.display(), "Config file absent, using defaults");
                Self::default()
            }
            None => Self::default(),
        };
        config.merge_with_env()?;
        config.validate()?;
        Ok(config)
    }
}

/// Keep the [`ENV_PREFIX`] variables of a raw environment
///
/// Names that are not UTF-8 cannot carry the prefix and are skipped; a
/// prefixed variable whose value is not UTF-8 is a configuration error.
pub fn prefixed_vars<I>(vars: I) -> Result<Vec<(String, String)>, LockgroupError>
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    let mut prefixed = Vec::new();
    for (name, value) in vars {
        let Some(name) = name.to_str() else {
            continue;
        };
        if !name.starts_with(ENV_PREFIX) {
            continue;
        }
        let value = value
            .into_string()
            .map_err(|_| LockgroupError::config(format!("{name} is not valid UTF-8")))?;
        prefixed.push((name.to_string(), value));
    }
    Ok(prefixed)
}

/// `REGISTRY_TERMINALS_PATH` -> `registry.terminals_path`
///
/// Only the first underscore separates section from field; field names keep
/// their own underscores.
fn env_key_to_path(key: &str) -> String {
    let lower = key.to_ascii_lowercase();
    match lower.split_once('_') {
        Some((section, field)) => format!("{section}.{field}"),
        None => lower,
    }
}
