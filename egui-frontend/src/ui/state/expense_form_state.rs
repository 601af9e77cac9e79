//! # Expense Form State Module
//!
//! State and validation for the expense entry dialog.
//!
//! ## Responsibilities:
//! - Add vs. edit mode (edit remembers the expense pk)
//! - Prefilling from a selected expense row
//! - Widget constraints: mandatory amount and category, amount range and precision
//!
//! A failed check keeps the dialog open and sets `error`; only a valid form
//! produces a `ViewEvent`.

use bookkeeper_backend::domain::input::MAX_AMOUNT;
use bookkeeper_backend::domain::models::expense::COMMENT_MAX_LEN;
use bookkeeper_backend::domain::snapshots::DISPLAY_DATE_FORMAT;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use shared::{ExpenseInput, TableSnapshot, ViewEvent};
use std::str::FromStr;

/// Digits allowed after the decimal separator
pub const AMOUNT_DECIMALS: u32 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseFormMode {
    Add,
    /// Editing the expense with this pk
    Edit(String),
}

#[derive(Debug, Clone)]
pub struct ExpenseFormState {
    pub is_open: bool,
    pub mode: ExpenseFormMode,
    pub expense_date: NaiveDate,
    pub amount: String,
    pub category: String,
    pub comment: String,
    pub error: Option<String>,
}

impl ExpenseFormState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            is_open: false,
            mode: ExpenseFormMode::Add,
            expense_date: today,
            amount: String::new(),
            category: String::new(),
            comment: String::new(),
            error: None,
        }
    }

    /// Open an empty form for a new expense
    pub fn open_add(&mut self, today: NaiveDate) {
        *self = Self::new(today);
        self.is_open = true;
    }

    /// Open the form prefilled from an expense table row
    /// (`[pk, date, amount, category, comment]`)
    pub fn open_edit(&mut self, row: &[String], today: NaiveDate) {
        let cells = TableSnapshot::display_cells(row);
        let cell = |index: usize| cells.get(index).cloned().unwrap_or_default();

        *self = Self::new(today);
        self.mode = ExpenseFormMode::Edit(row.first().cloned().unwrap_or_default());
        self.expense_date = NaiveDate::parse_from_str(&cell(0), DISPLAY_DATE_FORMAT).unwrap_or(today);
        self.amount = cell(1);
        self.category = cell(2);
        self.comment = cell(3);
        self.is_open = true;
    }

    /// Closing discards the input
    pub fn close(&mut self) {
        self.is_open = false;
        self.error = None;
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            ExpenseFormMode::Add => "Add expense",
            ExpenseFormMode::Edit(_) => "Edit expense",
        }
    }

    /// Check the widget constraints and build the field map
    pub fn validate(&self) -> Result<ExpenseInput, String> {
        let input = ExpenseInput {
            expense_date: self.expense_date.format("%Y-%m-%d").to_string(),
            amount: self.amount.trim().replace(',', "."),
            category: self.category.trim().to_string(),
            comment: self.comment.trim().to_string(),
        };

        if !input.is_mandatory_filled() {
            return Err("Amount and category are required".to_string());
        }

        let amount = Decimal::from_str(&input.amount)
            .map_err(|_| format!("'{}' is not a number", self.amount.trim()))?;
        if amount < Decimal::ZERO || amount > Decimal::from(MAX_AMOUNT) {
            return Err(format!("Amount must be between 0 and {}", MAX_AMOUNT));
        }
        if amount.normalize().scale() > AMOUNT_DECIMALS {
            return Err(format!("Amount can have at most {} decimals", AMOUNT_DECIMALS));
        }

        if input.comment.chars().count() > COMMENT_MAX_LEN {
            return Err(format!("Comment is limited to {} characters", COMMENT_MAX_LEN));
        }

        Ok(input)
    }

    /// Validate and turn the form into the matching view event.
    /// On failure the error is kept for display and nothing is returned.
    pub fn submit(&mut self) -> Option<ViewEvent> {
        match self.validate() {
            Ok(input) => {
                let event = match &self.mode {
                    ExpenseFormMode::Add => ViewEvent::ExpenseAdded(input),
                    ExpenseFormMode::Edit(pk) => ViewEvent::ExpenseUpdated { pk: pk.clone(), input },
                };
                self.close();
                Some(event)
            }
            Err(message) => {
                self.error = Some(message);
                None
            }
        }
    }
}
