//! Interface the presenter pushes table data through.
//!
//! A view only ever receives complete snapshots; it never reads storage.

use shared::TableSnapshot;

pub trait BookkeeperView {
    fn set_category_data(&mut self, data: TableSnapshot);

    /// Category names offered by the expense entry dialog
    fn set_category_options(&mut self, names: Vec<String>);

    fn set_expense_data(&mut self, data: TableSnapshot);

    fn set_budget_data(&mut self, data: TableSnapshot);
}
