//! Registry loading from files on disk

use lockgroup_core::{GroupId, GuiId, TerminalId};
use lockgroup_registry::{FileRegistryLoader, RegistryLoader};
use proptest::prelude::*;
use tempfile::TempDir;

fn write_registries(dir: &TempDir, terminals: &str, credentials: &str) -> FileRegistryLoader {
    let terminals_path = dir.path().join("computers.txt");
    let credentials_path = dir.path().join("pincodes.txt");
    std::fs::write(&terminals_path, terminals).unwrap();
    std::fs::write(&credentials_path, credentials).unwrap();
    FileRegistryLoader::new(terminals_path, credentials_path)
}

#[test]
fn resolves_from_files() {
    let temp_dir = TempDir::new().unwrap();
    let loader = write_registries(&temp_dir, "101 5 1\n102 7 2\n", "101 1234 5678\n");

    let terminals = loader.terminal_registry();
    assert_eq!(terminals.resolve_terminal(GuiId(5)), Some(TerminalId(101)));
    assert_eq!(terminals.resolve_group(GuiId(7)), Some(GroupId(2)));

    let credentials = loader.credential_registry();
    assert_eq!(credentials.credentials_for(TerminalId(101)), ["1234", "5678"]);
    assert!(credentials.credentials_for(TerminalId(102)).is_empty());
}

#[test]
fn crlf_and_invalid_utf8_lines_are_tolerated() {
    let temp_dir = TempDir::new().unwrap();
    let terminals_path = temp_dir.path().join("computers.txt");
    let mut bytes = b"\xff\xfe bad line\r\n".to_vec();
    bytes.extend_from_slice(b"101 5 1\r\n");
    std::fs::write(&terminals_path, bytes).unwrap();
    let loader = FileRegistryLoader::new(&terminals_path, temp_dir.path().join("missing.txt"));

    let terminals = loader.terminal_registry();
    assert_eq!(terminals.len(), 1);
    assert_eq!(terminals.resolve_terminal(GuiId(5)), Some(TerminalId(101)));
    assert!(loader.credential_registry().is_empty());
}

#[test]
fn snapshot_is_independent_of_later_edits() {
    let temp_dir = TempDir::new().unwrap();
    let loader = write_registries(&temp_dir, "101 5 1\n", "");

    let snapshot = loader.terminal_registry();
    std::fs::write(loader.terminals_path(), "999 5 9\n").unwrap();

    assert_eq!(snapshot.resolve_terminal(GuiId(5)), Some(TerminalId(101)));
    assert_eq!(
        loader.terminal_registry().resolve_terminal(GuiId(5)),
        Some(TerminalId(999))
    );
}

proptest! {
    /// Inserting garbage lines anywhere never changes what valid lines resolve to
    #[test]
    fn garbage_lines_never_mask_valid_records(
        gui in 0i64..1000,
        terminal in 0i64..1000,
        group in 0i64..50,
        noise in proptest::collection::vec("[a-z ]{0,12}", 0..6),
    ) {
        let mut text = String::new();
        for line in &noise {
            text.push_str(line);
            text.push('\n');
        }
        text.push_str(&format!("{terminal} {gui} {group}\n"));
        for line in &noise {
            text.push_str(line);
            text.push('\n');
        }

        let registry = lockgroup_registry::TerminalRegistry::parse(&text);
        prop_assert_eq!(registry.resolve_terminal(GuiId(gui)), Some(TerminalId(terminal)));
        prop_assert_eq!(registry.resolve_group(GuiId(gui)), Some(GroupId(group)));
    }
}
