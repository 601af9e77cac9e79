//! # UI State Module
//!
//! Plain state structs behind each panel. They hold no egui types, so their
//! behavior is tested without a window.

pub mod budget_table_state;
pub mod category_state;
pub mod expense_form_state;
pub mod expense_table_state;
pub mod status_state;

pub use budget_table_state::BudgetTableState;
pub use category_state::CategoryPanelState;
pub use expense_form_state::ExpenseFormState;
pub use expense_table_state::ExpenseTableState;
pub use status_state::StatusLine;
