use thiserror::Error;

use super::models::BudgetPeriod;
use crate::storage::errors::StorageError;

/// Errors the presenter reports back to the view
#[derive(Debug, Error)]
pub enum BookkeeperError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("unknown category '{0}'")]
    UnknownCategory(String),

    #[error("category '{0}' already exists")]
    DuplicateCategory(String),

    #[error("category name must not be empty")]
    EmptyCategoryName,

    #[error("category '{name}' is still used by {expenses} expense(s) and {children} subcategory(ies)")]
    CategoryInUse {
        name: String,
        expenses: usize,
        children: usize,
    },

    #[error("invalid amount '{0}': expected a number from 0 to 1000000")]
    InvalidAmount(String),

    #[error("total spent for the {period} budget does not fit in a decimal")]
    SpentOverflow { period: BudgetPeriod },

    #[error("invalid date '{0}': expected YYYY-MM-DD, DD-MM-YYYY or DD.MM.YYYY")]
    InvalidDate(String),

    #[error("invalid record key '{0}'")]
    InvalidKey(String),

    #[error("{kind} {pk} does not exist")]
    NotFound { kind: &'static str, pk: i64 },
}
