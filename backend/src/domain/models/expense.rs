//! Domain model for a single expense.

use chrono::{Local, NaiveDate, NaiveDateTime, Timelike};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::storage::errors::StorageError;
use crate::storage::schema::{FieldDef, FieldKind, FieldValue, RowValues};
use crate::storage::traits::Record;

/// Longest comment the store accepts
pub const COMMENT_MAX_LEN: usize = 120;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub pk: i64,
    pub amount: Decimal,
    /// pk of the category this expense belongs to
    pub category: i64,
    pub comment: String,
    /// When the record was created
    pub added_date: NaiveDateTime,
    /// When the expense actually happened
    pub expense_date: NaiveDate,
}

impl Expense {
    /// Create an unpersisted expense stamped with the current local time
    pub fn new(amount: Decimal, category: i64, comment: &str, expense_date: NaiveDate) -> Self {
        Self {
            pk: 0,
            amount,
            category,
            comment: comment.to_string(),
            added_date: Self::now(),
            expense_date,
        }
    }

    /// Current local time truncated to whole seconds
    pub fn now() -> NaiveDateTime {
        let now = Local::now().naive_local();
        now.with_nanosecond(0).unwrap_or(now)
    }
}

impl Record for Expense {
    const TABLE: &'static str = "expense";

    const FIELDS: &'static [FieldDef] = &[
        FieldDef::new("amount", FieldKind::Decimal),
        FieldDef::new("category", FieldKind::Integer),
        FieldDef::new("comment", FieldKind::Text { max_len: COMMENT_MAX_LEN }),
        FieldDef::new("added_date", FieldKind::DateTime),
        FieldDef::new("expense_date", FieldKind::Date),
    ];

    fn pk(&self) -> i64 {
        self.pk
    }

    fn set_pk(&mut self, pk: i64) {
        self.pk = pk;
    }

    fn field_values(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::from(self.amount),
            FieldValue::from(self.category),
            FieldValue::from(self.comment.clone()),
            FieldValue::from(self.added_date),
            FieldValue::from(self.expense_date),
        ]
    }

    fn from_row(pk: i64, mut row: RowValues) -> Result<Self, StorageError> {
        Ok(Self {
            pk,
            amount: row.take_decimal("amount")?,
            category: row.take_integer("category")?,
            comment: row.take_text("comment")?,
            added_date: row.take_datetime("added_date")?,
            expense_date: row.take_date("expense_date")?,
        })
    }
}
