//! Layered configuration loading against real files

use lockgroup_core::config::{LayeredConfig, LockgroupConfig};
use lockgroup_core::LockgroupError;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn missing_file_falls_back_to_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("absent.toml");

    let config = LockgroupConfig::load_layered(Some(&path)).unwrap();
    assert_eq!(config, LockgroupConfig::default());
}

#[test]
fn file_values_override_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("lockgroup.toml");
    std::fs::write(
        &path,
        r#"
[registry]
terminals_path = "/srv/lock/computers.txt"
credentials_path = "/srv/lock/pincodes.txt"

[keypad]
terminator = "*"
max_length = 8
"#,
    )
    .unwrap();

    let config = LockgroupConfig::load_from_file(&path).unwrap();
    assert_eq!(
        config.registry.terminals_path,
        PathBuf::from("/srv/lock/computers.txt")
    );
    assert_eq!(config.keypad.terminator, '*');
    assert_eq!(config.keypad.max_length, 8);
    assert!(config.validate().is_ok());
}

#[test]
fn malformed_file_is_a_config_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.toml");
    std::fs::write(&path, "[registry\nterminals_path = 1").unwrap();

    let err = LockgroupConfig::load_from_file(&path).unwrap_err();
    assert!(matches!(err, LockgroupError::Config { .. }));
}

#[test]
fn invalid_values_fail_validation_after_load() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("invalid.toml");
    std::fs::write(&path, "[audit]\nlog_path = \"\"\n").unwrap();

    let err = LockgroupConfig::load_from_file(&path)
        .unwrap()
        .validate()
        .unwrap_err();
    assert!(err.to_string().contains("audit.log_path"));
}
