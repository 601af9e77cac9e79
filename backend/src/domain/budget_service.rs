//! Budget aggregation.
//!
//! `Budget.spent` is a cache. It is recomputed from the expense table on every
//! refresh by summing amounts over the current window of each period.

use chrono::NaiveDate;
use log::{debug, info};
use rust_decimal::Decimal;

use crate::domain::errors::BookkeeperError;
use crate::domain::models::{Budget, BudgetPeriod, Expense};
use crate::storage::traits::Repository;

/// Sum of `amount` over expenses dated inside the window of `period` around `today`
pub fn spent_in_period(
    period: BudgetPeriod,
    expenses: &[Expense],
    today: NaiveDate,
) -> Result<Decimal, BookkeeperError> {
    let window = period.window(today);
    expenses
        .iter()
        .filter(|expense| window.contains(expense.expense_date))
        .try_fold(Decimal::ZERO, |total, expense| total.checked_add(expense.amount))
        .ok_or(BookkeeperError::SpentOverflow { period })
}

/// Recompute `spent` for every stored budget and write back the ones that changed.
///
/// Returns the number of budgets that were updated.
pub fn refresh_spent(
    budgets: &dyn Repository<Budget>,
    expenses: &dyn Repository<Expense>,
    today: NaiveDate,
) -> Result<usize, BookkeeperError> {
    let all_expenses = expenses.get_all(None)?;
    let mut updated = 0;

    for mut budget in budgets.get_all(None)? {
        let spent = spent_in_period(budget.period, &all_expenses, today)?;
        if spent == budget.spent {
            continue;
        }
        debug!("Budget {} spent {} -> {}", budget.period, budget.spent, spent);
        budget.spent = spent;
        budgets.update(&budget)?;
        updated += 1;
    }

    if updated > 0 {
        info!("Recomputed spent for {} budget(s)", updated);
    }
    Ok(updated)
}
