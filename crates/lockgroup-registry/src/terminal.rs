//! Terminal registry: GUI identifier to terminal and lock group

use crate::records::{parse_terminal_line, TerminalRecord};
use lockgroup_core::{GroupId, GuiId, TerminalId};

/// Every well-formed terminal record of one snapshot, in file order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TerminalRegistry {
    records: Vec<TerminalRecord>,
}

impl TerminalRegistry {
    /// Parse a full registry snapshot, dropping malformed lines
    pub fn parse(text: &str) -> Self {
        let mut records = Vec::new();
        for (index, line) in text.lines().enumerate() {
            match parse_terminal_line(line) {
                Ok(record) => records.push(record),
                Err(reason) => {
                    tracing::trace!(line = index + 1, %reason, "Skipping terminal registry line");
                }
            }
        }
        Self { records }
    }

    /// Build from already-parsed records
    pub fn from_records(records: Vec<TerminalRecord>) -> Self {
        Self { records }
    }

    /// First record whose GUI identifier equals `gui_id`
    pub fn record_for(&self, gui_id: GuiId) -> Option<&TerminalRecord> {
        self.records.iter().find(|record| record.gui_id == gui_id)
    }

    /// Terminal owning `gui_id`
    pub fn resolve_terminal(&self, gui_id: GuiId) -> Option<TerminalId> {
        self.record_for(gui_id).map(|record| record.terminal_id)
    }

    /// Lock group governing `gui_id`
    pub fn resolve_group(&self, gui_id: GuiId) -> Option<GroupId> {
        self.record_for(gui_id).map(|record| record.group_id)
    }

    /// Well-formed records
    pub fn records(&self) -> &[TerminalRecord] {
        &self.records
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
    fn resolves_terminal_and_group() {
        let registry = TerminalRegistry::parse("101 5 1\n102 7 2\n");
        assert_eq!(registry.resolve_terminal(GuiId(5)), Some(TerminalId(101)));
        assert_eq!(registry.resolve_group(GuiId(7)), Some(GroupId(2)));
        assert_eq!(registry.resolve_terminal(GuiId(6)), None);
    }

    #[test]
    fn first_duplicate_gui_id_wins() {
        let registry = TerminalRegistry::parse("201 9 3\n202 9 4\n");
        assert_eq!(registry.resolve_terminal(GuiId(9)), Some(TerminalId(201)));
        assert_eq!(registry.resolve_group(GuiId(9)), Some(GroupId(3)));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn corrupt_lines_do_not_hide_valid_ones() {
        let registry = TerminalRegistry::parse("garbage\n\n101 5\n101 x 1\n103 8 1\n");
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.resolve_terminal(GuiId(8)), Some(TerminalId(103)));
    }

    #[test]
    fn empty_snapshot_resolves_nothing() {
        let registry = TerminalRegistry::parse("");
        assert!(registry.is_empty());
        assert_eq!(registry.resolve_group(GuiId(1)), None);
    }
}
