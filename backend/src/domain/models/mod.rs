//! Record types persisted by the repositories.

pub mod budget;
pub mod category;
pub mod expense;

pub use budget::{Budget, BudgetPeriod, PeriodWindow};
pub use category::Category;
pub use expense::Expense;
