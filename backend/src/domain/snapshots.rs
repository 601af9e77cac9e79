//! # Snapshot Formatting
//!
//! Turns stored records into the preformatted rows the view displays. The
//! first cell of every row is the record's pk.

use log::warn;
use rust_decimal::Decimal;
use shared::TableSnapshot;
use std::collections::HashMap;

use crate::domain::models::{Budget, Category, Expense};

pub const EXPENSE_HEADERS: [&str; 4] = ["Date", "Amount", "Category", "Comment"];
pub const CATEGORY_HEADERS: [&str; 2] = ["Name", "Parent"];
pub const BUDGET_HEADERS: [&str; 3] = ["Period", "Spent", "Limit"];

/// Date layout used in the expense table
pub const DISPLAY_DATE_FORMAT: &str = "%d-%m-%Y";

pub fn format_money(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}

fn category_names(categories: &[Category]) -> HashMap<i64, &str> {
    categories.iter().map(|c| (c.pk, c.name.as_str())).collect()
}

/// Expense rows, newest `expense_date` first
pub fn expense_snapshot(expenses: &[Expense], categories: &[Category]) -> TableSnapshot {
    let names = category_names(categories);

    let mut sorted: Vec<&Expense> = expenses.iter().collect();
    sorted.sort_by(|a, b| b.expense_date.cmp(&a.expense_date).then(b.pk.cmp(&a.pk)));

    let rows = sorted
        .into_iter()
        .map(|expense| {
            let category = match names.get(&expense.category) {
                Some(name) => name.to_string(),
                None => {
                    warn!("Expense {} refers to missing category {}", expense.pk, expense.category);
                    format!("#{}", expense.category)
                }
            };
            vec![
                expense.pk.to_string(),
                expense.expense_date.format(DISPLAY_DATE_FORMAT).to_string(),
                format_money(expense.amount),
                category,
                expense.comment.clone(),
            ]
        })
        .collect();

    TableSnapshot::new(&EXPENSE_HEADERS, rows)
}

pub fn category_snapshot(categories: &[Category]) -> TableSnapshot {
    let names = category_names(categories);
    let rows = categories
        .iter()
        .map(|category| {
            let parent = category
                .parent
                .map(|pk| names.get(&pk).map_or_else(|| format!("#{}", pk), |n| n.to_string()))
                .unwrap_or_default();
            vec![category.pk.to_string(), category.name.clone(), parent]
        })
        .collect();

    TableSnapshot::new(&CATEGORY_HEADERS, rows)
}

/// Category names in pk order, for the expense dialog's combo box
pub fn category_options(categories: &[Category]) -> Vec<String> {
    categories.iter().map(|c| c.name.clone()).collect()
}

/// Budget rows in period order (day, week, month, year)
pub fn budget_snapshot(budgets: &[Budget]) -> TableSnapshot {
    let mut sorted: Vec<&Budget> = budgets.iter().collect();
    sorted.sort_by_key(|b| (b.period, b.pk));

    let rows = sorted
        .into_iter()
        .map(|budget| {
            vec![
                budget.pk.to_string(),
                budget.period.label().to_string(),
                format_money(budget.spent),
                format_money(budget.limit),
            ]
        })
        .collect();

    TableSnapshot::new(&BUDGET_HEADERS, rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::BudgetPeriod;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn category(pk: i64, name: &str, parent: Option<i64>) -> Category {
        Category { pk, ..Category::new(name, parent) }
    }

    fn expense(pk: i64, amount: Decimal, category: i64, day: u32) -> Expense {
        let date = NaiveDate::from_ymd_opt(2024, 4, day).unwrap();
        Expense { pk, ..Expense::new(amount, category, "note", date) }
    }

    #[test]
    fn test_expense_rows_newest_first() {
        let categories = vec![category(1, "Dairy", None)];
        let expenses = vec![
            expense(1, dec!(3.5), 1, 2),
            expense(2, dec!(12), 1, 20),
            expense(3, dec!(0.333), 99, 9),
        ];

        let snapshot = expense_snapshot(&expenses, &categories);
        assert_eq!(snapshot.headers, vec!["Date", "Amount", "Category", "Comment"]);
        assert_eq!(
            snapshot.rows,
            vec![
                vec!["2", "20-04-2024", "12.00", "Dairy", "note"],
                vec!["3", "09-04-2024", "0.33", "#99", "note"],
                vec!["1", "02-04-2024", "3.50", "Dairy", "note"],
            ]
        );
    }

    #[test]
    fn test_category_rows_show_parent_name() {
        let categories = vec![category(1, "Food", None), category(2, "Cafes", Some(1)), category(3, "Lost", Some(7))];
        let snapshot = category_snapshot(&categories);
        assert_eq!(snapshot.headers, vec!["Name", "Parent"]);
        assert_eq!(
            snapshot.rows,
            vec![vec!["1", "Food", ""], vec!["2", "Cafes", "Food"], vec!["3", "Lost", "#7"]]
        );
        assert_eq!(category_options(&categories), vec!["Food", "Cafes", "Lost"]);
    }

    #[test]
    fn test_budget_rows_in_period_order() {
        let mut year = Budget::new(BudgetPeriod::Year, dec!(50000));
        year.pk = 1;
        let mut day = Budget::new(BudgetPeriod::Day, dec!(100));
        day.pk = 2;
        day.spent = dec!(12.346);

        let snapshot = budget_snapshot(&[year, day]);
        assert_eq!(
            snapshot.rows,
            vec![vec!["2", "Day", "12.35", "100.00"], vec!["1", "Year", "0.00", "50000.00"]]
        );
    }
}
