//! # Modals Module
//!
//! Dialogs rendered on top of the main panels.

pub mod expense_entry;
