//! # Category State Module
//!
//! Category rows, the names offered by the expense dialog, and the inputs of
//! the category editor window.

use shared::{TableSnapshot, ViewEvent};

#[derive(Debug, Default)]
pub struct CategoryPanelState {
    pub snapshot: TableSnapshot,
    /// Names for combo boxes, in table order
    pub options: Vec<String>,
    pub editor_open: bool,
    pub new_name: String,
    pub new_parent: Option<String>,
    /// pk of the category picked for deletion
    pub delete_choice: Option<String>,
}

impl CategoryPanelState {
    pub fn set_data(&mut self, snapshot: TableSnapshot) {
        if let Some(pk) = &self.delete_choice {
            if snapshot.row_by_key(pk).is_none() {
                self.delete_choice = None;
            }
        }
        self.snapshot = snapshot;
    }

    pub fn set_options(&mut self, options: Vec<String>) {
        if let Some(parent) = &self.new_parent {
            if !options.contains(parent) {
                self.new_parent = None;
            }
        }
        self.options = options;
    }

    /// Display name of a category row
    pub fn name_of(&self, pk: &str) -> Option<&str> {
        self.snapshot
            .row_by_key(pk)
            .and_then(|row| row.get(1))
            .map(String::as_str)
    }

    pub fn add_event(&mut self) -> Option<ViewEvent> {
        let name = self.new_name.trim();
        if name.is_empty() {
            return None;
        }
        let event = ViewEvent::CategoryAdded {
            name: name.to_string(),
            parent: self.new_parent.clone(),
        };
        self.new_name.clear();
        Some(event)
    }

    pub fn delete_event(&mut self) -> Option<ViewEvent> {
        self.delete_choice.take().map(ViewEvent::CategoryDeleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> CategoryPanelState {
        let mut state = CategoryPanelState::default();
        state.set_data(TableSnapshot::new(
            &["Name", "Parent"],
            vec![
                vec!["1".into(), "Food".into(), "".into()],
                vec!["2".into(), "Cafes".into(), "Food".into()],
            ],
        ));
        state.set_options(vec!["Food".into(), "Cafes".into()]);
        state
    }

    #[test]
    fn test_add_event() {
        let mut state = state();
        state.new_name = "   ".to_string();
        assert!(state.add_event().is_none());

        state.new_name = " Tea ".to_string();
        state.new_parent = Some("Food".to_string());
        assert_eq!(
            state.add_event(),
            Some(ViewEvent::CategoryAdded { name: "Tea".to_string(), parent: Some("Food".to_string()) })
        );
        assert!(state.new_name.is_empty());
    }

    #[test]
    fn test_delete_event_uses_choice() {
        let mut state = state();
        assert!(state.delete_event().is_none());

        state.delete_choice = Some("2".to_string());
        assert_eq!(state.name_of("2"), Some("Cafes"));
        assert_eq!(state.delete_event(), Some(ViewEvent::CategoryDeleted("2".to_string())));
        assert!(state.delete_choice.is_none());
    }

    #[test]
    fn test_stale_choices_are_cleared() {
        let mut state = state();
        state.delete_choice = Some("2".to_string());
        state.new_parent = Some("Cafes".to_string());

        state.set_data(TableSnapshot::new(&["Name", "Parent"], vec![vec!["1".into(), "Food".into(), "".into()]]));
        state.set_options(vec!["Food".into()]);

        assert!(state.delete_choice.is_none());
        assert!(state.new_parent.is_none());
    }
}
