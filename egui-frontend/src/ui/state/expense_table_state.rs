//! # Expense Table State Module
//!
//! Rows pushed by the presenter plus the user's row selection.

use shared::{TableSnapshot, ViewEvent};
use std::collections::BTreeSet;

#[derive(Debug, Default)]
pub struct ExpenseTableState {
    pub snapshot: TableSnapshot,
    /// Primary keys of the selected rows
    pub selected: BTreeSet<String>,
}

impl ExpenseTableState {
    /// Replace the rows, dropping selections whose row is gone
    pub fn set_data(&mut self, snapshot: TableSnapshot) {
        self.selected.retain(|pk| snapshot.row_by_key(pk).is_some());
        self.snapshot = snapshot;
    }

    pub fn is_selected(&self, pk: &str) -> bool {
        self.selected.contains(pk)
    }

    pub fn toggle(&mut self, pk: &str) {
        if !self.selected.remove(pk) {
            self.selected.insert(pk.to_string());
        }
    }

    /// The selected row, when exactly one is selected
    pub fn single_selection(&self) -> Option<&[String]> {
        match self.selected.len() {
            1 => self.selected.iter().next().and_then(|pk| self.snapshot.row_by_key(pk)),
            _ => None,
        }
    }

    /// Delete event for the current selection; clears it
    pub fn take_delete_event(&mut self) -> Option<ViewEvent> {
        if self.selected.is_empty() {
            return None;
        }
        let pks = std::mem::take(&mut self.selected).into_iter().collect();
        Some(ViewEvent::ExpensesDeleted(pks))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(keys: &[&str]) -> TableSnapshot {
        let rows = keys
            .iter()
            .map(|pk| vec![pk.to_string(), "01-01-2024".to_string(), "1.00".to_string()])
            .collect();
        TableSnapshot::new(&["Date", "Amount"], rows)
    }

    #[test]
    fn test_selection() {
        let mut state = ExpenseTableState::default();
        state.set_data(snapshot(&["1", "2", "3"]));

        state.toggle("2");
        assert!(state.is_selected("2"));
        assert_eq!(state.single_selection().unwrap()[0], "2");

        state.toggle("3");
        assert!(state.single_selection().is_none());

        state.toggle("3");
        assert_eq!(state.single_selection().unwrap()[0], "2");
    }

    #[test]
    fn test_new_data_drops_stale_selection() {
        let mut state = ExpenseTableState::default();
        state.set_data(snapshot(&["1", "2"]));
        state.toggle("1");
        state.toggle("2");

        state.set_data(snapshot(&["2"]));
        assert_eq!(state.selected.len(), 1);
        assert!(state.is_selected("2"));
    }

    #[test]
    fn test_delete_event() {
        let mut state = ExpenseTableState::default();
        state.set_data(snapshot(&["4", "5"]));
        assert!(state.take_delete_event().is_none());

        state.toggle("5");
        state.toggle("4");
        assert_eq!(
            state.take_delete_event(),
            Some(ViewEvent::ExpensesDeleted(vec!["4".to_string(), "5".to_string()]))
        );
        assert!(state.selected.is_empty());
    }
}
