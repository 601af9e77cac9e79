//! # UI Components Module
//!
//! Rendering code for each panel. Components are `impl EguiView` blocks that
//! draw from the view's state and raise `ViewEvent`s; none of them talk to the
//! presenter directly.
//!
//! ## Module Organization:
//! - `expense_table` - expense rows and the Add / Edit / Delete actions
//! - `category_panel` - category list and editor window
//! - `budget_table` - per-period budgets with editable limits
//! - `modals` - the expense entry dialog
//! - `styling` - global style and shared colors

pub mod budget_table;
pub mod category_panel;
pub mod expense_table;
pub mod modals;
pub mod styling;

pub use styling::{setup_style, ERROR_COLOR};
