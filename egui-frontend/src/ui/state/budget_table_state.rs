//! # Budget Table State Module
//!
//! Holds the budget rows and the limit values being edited in place.

use rust_decimal::Decimal;
use shared::{TableSnapshot, ViewEvent};
use std::collections::HashMap;
use std::str::FromStr;

/// Column of the limit cell in a budget row (`[pk, period, spent, limit]`)
const LIMIT_COLUMN: usize = 3;

#[derive(Debug, Default)]
pub struct BudgetTableState {
    pub snapshot: TableSnapshot,
    /// Text currently typed in each limit cell, keyed by budget pk
    pub limit_edits: HashMap<String, String>,
}

/// A committed limit that is not a non-negative number becomes "0"
pub fn normalize_limit(text: &str) -> String {
    let candidate = text.trim().replace(',', ".");
    match Decimal::from_str(&candidate) {
        Ok(limit) if limit >= Decimal::ZERO => candidate,
        _ => "0".to_string(),
    }
}

impl BudgetTableState {
    pub fn set_data(&mut self, snapshot: TableSnapshot) {
        self.limit_edits = snapshot
            .rows
            .iter()
            .filter_map(|row| Some((row.first()?.clone(), row.get(LIMIT_COLUMN)?.clone())))
            .collect();
        self.snapshot = snapshot;
    }

    /// Editable text for a budget's limit cell
    pub fn limit_text(&mut self, pk: &str) -> &mut String {
        self.limit_edits.entry(pk.to_string()).or_default()
    }

    /// Event for a finished edit, or `None` when the value did not change
    pub fn commit(&mut self, pk: &str) -> Option<ViewEvent> {
        let stored = self.snapshot.row_by_key(pk)?.get(LIMIT_COLUMN)?.clone();
        let typed = self.limit_edits.get(pk).cloned().unwrap_or_default();
        if typed.trim() == stored {
            return None;
        }

        let limit = normalize_limit(&typed);
        self.limit_edits.insert(pk.to_string(), limit.clone());
        Some(ViewEvent::BudgetLimitUpdated { pk: pk.to_string(), limit })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> BudgetTableState {
        let mut state = BudgetTableState::default();
        state.set_data(TableSnapshot::new(
            &["Period", "Spent", "Limit"],
            vec![vec!["1".into(), "Day".into(), "0.00".into(), "50.00".into()]],
        ));
        state
    }

    #[test]
    fn test_normalize_limit() {
        assert_eq!(normalize_limit(" 120,5 "), "120.5");
        assert_eq!(normalize_limit("0"), "0");
        assert_eq!(normalize_limit("-3"), "0");
        assert_eq!(normalize_limit("lots"), "0");
        assert_eq!(normalize_limit(""), "0");
    }

    #[test]
    fn test_unchanged_limit_is_not_sent() {
        let mut state = state();
        assert_eq!(state.limit_text("1"), "50.00");
        assert!(state.commit("1").is_none());
    }

    #[test]
    fn test_commit_sends_normalized_limit() {
        let mut state = state();
        *state.limit_text("1") = "abc".to_string();
        assert_eq!(
            state.commit("1"),
            Some(ViewEvent::BudgetLimitUpdated { pk: "1".to_string(), limit: "0".to_string() })
        );
        assert_eq!(state.limit_edits["1"], "0");
    }

    #[test]
    fn test_commit_unknown_row() {
        assert!(state().commit("9").is_none());
    }
}
