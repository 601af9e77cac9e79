//! # Presenter
//!
//! Mediates between a `BookkeeperView` and the three repositories. The view
//! raises `ViewEvent`s; the presenter validates them, writes to storage and
//! pushes fresh snapshots back. The view never touches storage itself.
//!
//! ## Key Functions
//!
//! - `Presenter::new`: seed default data and push the initial snapshots
//! - `Presenter::handle`: single entry point for view events
//! - `Presenter::update_budget_spent_column`: recompute cached budget totals

use chrono::{Local, NaiveDate};
use log::{debug, info, warn};
use rust_decimal::Decimal;
use shared::{ExpenseInput, ViewEvent};
use std::collections::HashSet;

use super::budget_service;
use super::errors::BookkeeperError;
use super::input::{parse_amount, parse_expense_date, parse_key};
use super::models::{Budget, BudgetPeriod, Category, Expense};
use super::snapshots::{budget_snapshot, category_options, category_snapshot, expense_snapshot};
use super::view::BookkeeperView;
use crate::storage::schema::Where;
use crate::storage::traits::Repository;
use crate::storage::Repositories;

pub struct Presenter<V: BookkeeperView> {
    view: V,
    repos: Repositories,
}

impl<V: BookkeeperView> Presenter<V> {
    /// Seed missing default data, then push every snapshot to `view`.
    ///
    /// Default categories are only added to an empty category table. Budget
    /// rows are checked per period, so a partially seeded store is completed.
    pub fn new(view: V, repos: Repositories, default_categories: &[String]) -> Result<Self, BookkeeperError> {
        let mut presenter = Self { view, repos };
        presenter.seed_categories(default_categories)?;
        presenter.ensure_budgets()?;

        presenter.refresh_categories()?;
        presenter.refresh_expenses()?;
        presenter.refresh_budgets()?;
        info!("Presenter ready");
        Ok(presenter)
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn repositories(&self) -> &Repositories {
        &self.repos
    }

    /// Dispatch one view event to the matching operation
    pub fn handle(&mut self, event: ViewEvent) -> Result<(), BookkeeperError> {
        debug!("Handling view event {}", event.name());
        match event {
            ViewEvent::ExpenseAdded(input) => self.expense_add(&input).map(|_| ()),
            ViewEvent::ExpenseUpdated { pk, input } => self.expense_update(&pk, &input),
            ViewEvent::ExpensesDeleted(pks) => self.expense_delete(&pks),
            ViewEvent::CategoryAdded { name, parent } => {
                self.category_add(&name, parent.as_deref()).map(|_| ())
            }
            ViewEvent::CategoryDeleted(pk) => self.category_delete(&pk),
            ViewEvent::BudgetLimitUpdated { pk, limit } => self.budget_update(&pk, &limit),
        }
    }

    /// Record a new expense and return its pk
    pub fn expense_add(&mut self, input: &ExpenseInput) -> Result<i64, BookkeeperError> {
        let category = self.resolve_category(&input.category)?;
        let amount = parse_amount(&input.amount)?;
        let expense_date = parse_expense_date(&input.expense_date, Self::today())?;

        let mut expense = Expense::new(amount, category.pk, input.comment.trim(), expense_date);
        let pk = self.repos.expenses.add(&mut expense)?;
        info!("Added expense {} ({} in '{}' on {})", pk, amount, category.name, expense_date);

        self.refresh_expenses()?;
        self.refresh_budgets()?;
        Ok(pk)
    }

    /// Overwrite the editable fields of an existing expense; `added_date` is kept
    pub fn expense_update(&mut self, pk: &str, input: &ExpenseInput) -> Result<(), BookkeeperError> {
        let pk = parse_key(pk)?;
        let mut expense = self
            .repos
            .expenses
            .get(pk)?
            .ok_or(BookkeeperError::NotFound { kind: "expense", pk })?;

        let category = self.resolve_category(&input.category)?;
        expense.amount = parse_amount(&input.amount)?;
        expense.expense_date = parse_expense_date(&input.expense_date, Self::today())?;
        expense.category = category.pk;
        expense.comment = input.comment.trim().to_string();

        self.repos.expenses.update(&expense)?;
        info!("Updated expense {}", pk);

        self.refresh_expenses()?;
        self.refresh_budgets()
    }

    pub fn expense_delete(&mut self, pks: &[String]) -> Result<(), BookkeeperError> {
        let keys = pks
            .iter()
            .map(|pk| parse_key(pk))
            .collect::<Result<Vec<_>, _>>()?;
        for pk in &keys {
            self.repos.expenses.delete(*pk)?;
        }
        info!("Deleted {} expense(s)", keys.len());

        self.refresh_expenses()?;
        self.refresh_budgets()
    }

    /// Add a category, optionally under a parent given by name; returns its pk
    pub fn category_add(&mut self, name: &str, parent: Option<&str>) -> Result<i64, BookkeeperError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(BookkeeperError::EmptyCategoryName);
        }
        if self.find_category(name)?.is_some() {
            return Err(BookkeeperError::DuplicateCategory(name.to_string()));
        }

        let parent = match parent.map(str::trim).filter(|p| !p.is_empty()) {
            Some(parent_name) => Some(self.resolve_category(parent_name)?.pk),
            None => None,
        };

        let mut category = Category::new(name, parent);
        let pk = self.repos.categories.add(&mut category)?;
        info!("Added category {} '{}'", pk, name);

        self.refresh_categories()?;
        Ok(pk)
    }

    /// Delete a category that no expense and no other category refers to
    pub fn category_delete(&mut self, pk: &str) -> Result<(), BookkeeperError> {
        let pk = parse_key(pk)?;
        let Some(category) = self.repos.categories.get(pk)? else {
            warn!("Category {} is already gone", pk);
            return self.refresh_categories();
        };

        let expenses = self
            .repos
            .expenses
            .get_all(Some(&Where::new().field("category", pk)))?
            .len();
        let children = self
            .repos
            .categories
            .get_all(Some(&Where::new().field("parent", Some(pk))))?
            .len();
        if expenses > 0 || children > 0 {
            return Err(BookkeeperError::CategoryInUse {
                name: category.name,
                expenses,
                children,
            });
        }

        self.repos.categories.delete(pk)?;
        info!("Deleted category {} '{}'", pk, category.name);
        self.refresh_categories()
    }

    pub fn budget_update(&mut self, pk: &str, limit: &str) -> Result<(), BookkeeperError> {
        let pk = parse_key(pk)?;
        let mut budget = self
            .repos
            .budgets
            .get(pk)?
            .ok_or(BookkeeperError::NotFound { kind: "budget", pk })?;

        budget.limit = parse_amount(limit)?;
        self.repos.budgets.update(&budget)?;
        info!("Budget limit for {} set to {}", budget.period, budget.limit);

        self.refresh_budgets()
    }

    /// Recompute `spent` of every budget for today's windows.
    /// Returns how many budgets changed.
    pub fn update_budget_spent_column(&self) -> Result<usize, BookkeeperError> {
        self.update_budget_spent_column_at(Self::today())
    }

    pub fn update_budget_spent_column_at(&self, today: NaiveDate) -> Result<usize, BookkeeperError> {
        budget_service::refresh_spent(
            self.repos.budgets.as_ref(),
            self.repos.expenses.as_ref(),
            today,
        )
    }

    fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    fn find_category(&self, name: &str) -> Result<Option<Category>, BookkeeperError> {
        let filter = Where::new().field("name", name);
        Ok(self.repos.categories.get_all(Some(&filter))?.into_iter().next())
    }

    fn resolve_category(&self, name: &str) -> Result<Category, BookkeeperError> {
        let name = name.trim();
        self.find_category(name)?
            .ok_or_else(|| BookkeeperError::UnknownCategory(name.to_string()))
    }

    fn seed_categories(&self, names: &[String]) -> Result<(), BookkeeperError> {
        if !self.repos.categories.get_all(None)?.is_empty() {
            return Ok(());
        }

        info!("Category table is empty, seeding {} default categories", names.len());
        let mut seen = HashSet::new();
        for name in names.iter().map(|n| n.trim()) {
            if name.is_empty() || !seen.insert(name) {
                continue;
            }
            self.repos.categories.add(&mut Category::new(name, None))?;
        }
        Ok(())
    }

    fn ensure_budgets(&self) -> Result<(), BookkeeperError> {
        for period in BudgetPeriod::ALL {
            let filter = Where::new().field("period", period.label());
            if self.repos.budgets.get_all(Some(&filter))?.is_empty() {
                warn!("No budget row for period {}, creating one", period);
                self.repos.budgets.add(&mut Budget::new(period, Decimal::ZERO))?;
            }
        }
        Ok(())
    }

    fn refresh_categories(&mut self) -> Result<(), BookkeeperError> {
        let categories = self.repos.categories.get_all(None)?;
        debug!("Pushing {} category rows", categories.len());
        self.view.set_category_data(category_snapshot(&categories));
        self.view.set_category_options(category_options(&categories));
        Ok(())
    }

    fn refresh_expenses(&mut self) -> Result<(), BookkeeperError> {
        let expenses = self.repos.expenses.get_all(None)?;
        let categories = self.repos.categories.get_all(None)?;
        debug!("Pushing {} expense rows", expenses.len());
        self.view.set_expense_data(expense_snapshot(&expenses, &categories));
        Ok(())
    }

    fn refresh_budgets(&mut self) -> Result<(), BookkeeperError> {
        self.update_budget_spent_column()?;
        let budgets = self.repos.budgets.get_all(None)?;
        debug!("Pushing {} budget rows", budgets.len());
        self.view.set_budget_data(budget_snapshot(&budgets));
        Ok(())
    }
}
