//! Types shared between the presenter and the egui view.
//!
//! Everything that crosses the view boundary is primitive data: primary keys
//! travel as strings, tables travel as rows of preformatted strings, and user
//! input travels as a structured field map.

use serde::{Deserialize, Serialize};

/// Full set of rows the presenter pushes to a panel after every mutation.
///
/// The first cell of every row is the primary key of the record; it is used in
/// callbacks and never displayed. `headers` describes the remaining cells.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableSnapshot {
    pub fn new(headers: &[&str], rows: Vec<Vec<String>>) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Primary key of the row at `index`
    pub fn primary_key(&self, index: usize) -> Option<&str> {
        self.rows
            .get(index)
            .and_then(|row| row.first())
            .map(String::as_str)
    }

    /// Find a row by its primary key
    pub fn row_by_key(&self, pk: &str) -> Option<&[String]> {
        self.rows
            .iter()
            .find(|row| row.first().map(String::as_str) == Some(pk))
            .map(Vec::as_slice)
    }

    /// Cells of a row without the leading primary key
    pub fn display_cells(row: &[String]) -> &[String] {
        row.get(1..).unwrap_or(&[])
    }
}

/// Fields collected by the expense entry dialog.
///
/// All values are the raw text the user typed; parsing happens in the
/// presenter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseInput {
    /// Date the expense happened; empty means today
    pub expense_date: String,
    /// Amount as typed, e.g. "12.50"
    pub amount: String,
    /// Category name, resolved to a key by exact match
    pub category: String,
    pub comment: String,
}

impl ExpenseInput {
    /// Amount and category are the mandatory fields
    pub fn is_mandatory_filled(&self) -> bool {
        !self.amount.trim().is_empty() && !self.category.trim().is_empty()
    }
}

/// The fixed set of user actions a view can raise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ViewEvent {
    ExpenseAdded(ExpenseInput),
    ExpenseUpdated { pk: String, input: ExpenseInput },
    ExpensesDeleted(Vec<String>),
    CategoryAdded { name: String, parent: Option<String> },
    CategoryDeleted(String),
    BudgetLimitUpdated { pk: String, limit: String },
}

impl ViewEvent {
    /// Short name used in log lines
    pub fn name(&self) -> &'static str {
        match self {
            ViewEvent::ExpenseAdded(_) => "expense_added",
            ViewEvent::ExpenseUpdated { .. } => "expense_updated",
            ViewEvent::ExpensesDeleted(_) => "expenses_deleted",
            ViewEvent::CategoryAdded { .. } => "category_added",
            ViewEvent::CategoryDeleted(_) => "category_deleted",
            ViewEvent::BudgetLimitUpdated { .. } => "budget_limit_updated",
        }
    }
}
